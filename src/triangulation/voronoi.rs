//! Voronoi diagram as the clipped dual of a Delaunay triangulation.
//!
//! A Voronoi diagram partitions the plane into cells, where each cell contains
//! all points closer to its generating site than to any other site.
//!
//! # How It Works
//!
//! The Voronoi diagram is the dual of the Delaunay triangulation:
//! - Each Delaunay triangle's circumcenter becomes a Voronoi vertex; adjacent
//!   co-circular triangles share one
//! - Each Delaunay edge shared by two triangles becomes a Voronoi edge
//!   between their circumcenters
//! - Each hull edge becomes a ray, cut where it leaves the frame
//!
//! The result is a second [`Dcel`] whose outer boundary is a rectangle
//! around every site and circumcenter, with one face per site.
//!
//! # Example
//!
//! ```
//! use dualmesh::triangulation::{triangulate, voronoi, Site};
//!
//! let sites = vec![Site::new(1, 0, 0), Site::new(2, 10, 0), Site::new(3, 5, 8)];
//! let tri = triangulate(&sites).unwrap();
//! let diagram = voronoi(&tri).unwrap();
//!
//! // One circumcenter, three ray ends and four frame corners.
//! assert_eq!(diagram.num_vertices(), 8);
//! assert_eq!(diagram.num_boundary_points(), 7);
//!
//! // Three sites means three cells.
//! assert_eq!(diagram.num_faces(), 3);
//! assert!(diagram.face_of_site(2).is_some());
//! ```

use super::delaunay::{Site, Triangulation};
use crate::dcel::{Dcel, EdgeId, FaceId, VertexId, VertexTag};
use crate::error::MeshError;
use crate::kernel::{circumcenter, incircle, unit_normal};
use crate::primitives::{Point2, Ray2, Vec2};
use crate::tolerance::{compare_equal_eps, EPSILON};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::TAU;

/// Options for [`VoronoiBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Distance between the outermost site or circumcenter and the frame.
    pub margin: f64,
    /// Relative tolerance for merging circumcenters and matching frame
    /// points.
    pub epsilon: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            margin: 5.0,
            epsilon: EPSILON,
        }
    }
}

impl DiagramConfig {
    /// Sets the frame margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the comparison tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Axis-aligned rectangle the diagram is clipped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Frame {
    /// Bounding box of `points` grown by `margin` on every side.
    pub fn around(points: impl IntoIterator<Item = Point2<f64>>, margin: f64) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min, mut max) = (first, first);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self {
            min: Point2::new(min.x - margin, min.y - margin),
            max: Point2::new(max.x + margin, max.y + margin),
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `p` lies inside or on the rectangle.
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// Corners counter-clockwise from the top left.
    fn corners(&self) -> [Point2<f64>; 4] {
        [
            Point2::new(self.min.x, self.max.y),
            Point2::new(self.min.x, self.min.y),
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.max.x, self.max.y),
        ]
    }

    /// Length of `side`.
    #[inline]
    fn side_length(&self, side: Side) -> f64 {
        match side {
            Side::Top | Side::Bottom => self.width(),
            Side::Left | Side::Right => self.height(),
        }
    }

    /// Whether two points on the frame are within `eps` of each other,
    /// measured as a fraction of the frame's extent on each axis.
    fn same_spot(&self, p: Point2<f64>, q: Point2<f64>, eps: f64) -> bool {
        (p.x - q.x).abs() <= eps * self.width() && (p.y - q.y).abs() <= eps * self.height()
    }

    /// Moves `p` onto `side` if it lies within that side's extent.
    fn snap(&self, side: Side, p: Point2<f64>, eps: f64) -> Option<Point2<f64>> {
        let slack = eps * self.side_length(side);
        let within = |v: f64, lo: f64, hi: f64| v >= lo - slack && v <= hi + slack;
        match side {
            Side::Top | Side::Bottom => {
                let y = if side == Side::Top { self.max.y } else { self.min.y };
                within(p.x, self.min.x, self.max.x).then(|| Point2::new(p.x.clamp(self.min.x, self.max.x), y))
            }
            Side::Left | Side::Right => {
                let x = if side == Side::Left { self.min.x } else { self.max.x };
                within(p.y, self.min.y, self.max.y).then(|| Point2::new(x, p.y.clamp(self.min.y, self.max.y)))
            }
        }
    }
}

/// A side of the frame, walked clockwise along the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Coordinate that grows along the outside walk of this side.
    #[inline]
    fn progress(self, p: Point2<f64>) -> f64 {
        match self {
            Side::Top => p.x,
            Side::Right => -p.y,
            Side::Bottom => -p.x,
            Side::Left => p.y,
        }
    }
}

/// Orders Delaunay vertices for the top-to-bottom sweep.
#[derive(Debug, Clone, Copy)]
struct SweepKey {
    point: Point2<i64>,
    vertex: VertexId,
}

impl Ord for SweepKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .sweep_cmp(&other.point)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for SweepKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SweepKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SweepKey {}

/// Builds the Voronoi diagram of a finished triangulation.
#[derive(Debug, Clone, Copy)]
pub struct VoronoiBuilder<'a> {
    triangulation: &'a Triangulation,
    config: DiagramConfig,
}

impl<'a> VoronoiBuilder<'a> {
    pub fn new(triangulation: &'a Triangulation) -> Self {
        Self {
            triangulation,
            config: DiagramConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiagramConfig) -> Self {
        self.config = config;
        self
    }

    /// Computes circumcenters, sets up the frame and assembles every dual
    /// edge.
    pub fn build(self) -> Result<VoronoiDiagram, MeshError> {
        let tri = self.triangulation;
        let dt = tri.mesh();
        let eps = self.config.epsilon;

        let mut centers = vec![None; dt.faces.len()];
        for f in dt.faces() {
            let [a, b, c] = corners(dt, f)?;
            centers[f.index()] = Some(circumcenter(a, b, c)?);
        }
        let groups = merge_cocircular(dt, &centers, eps);

        let sites = tri.sites().iter().map(|s| s.point.to_f64());
        let frame = Frame::around(sites.chain(centers.iter().flatten().copied()), self.config.margin)
            .ok_or(MeshError::NotEnoughSites { count: 0 })?;
        tracing::debug!(
            min = %frame.min,
            max = %frame.max,
            circumcenters = dt.num_faces(),
            "voronoi frame ready"
        );

        let mut asm = Assembly::new(dt, frame, eps)?;
        asm.add_centers(&centers, &groups);
        asm.sweep()?;
        asm.finish(tri)
    }
}

/// Builds the Voronoi diagram of `triangulation` with the default options.
pub fn voronoi(triangulation: &Triangulation) -> Result<VoronoiDiagram, MeshError> {
    VoronoiBuilder::new(triangulation).build()
}

fn corners(dt: &Dcel<i64>, f: FaceId) -> Result<[Point2<f64>; 3], MeshError> {
    let c = dt.chain(f);
    let (a, b) = dt.segment(c);
    let p = dt.point(dt.origin(dt.prev(c)));
    if dt.next(dt.next(dt.next(c))) != c {
        return Err(MeshError::TopologyViolation {
            edge: c.index(),
            reason: "face is not a triangle",
        });
    }
    Ok([a.to_f64(), b.to_f64(), p.to_f64()])
}

/// Groups adjacent faces that share a circumcircle. Returns the group
/// representative of every face slot.
///
/// Two neighbors merge only when the far vertex across their shared edge is
/// exactly on the first face's circumcircle and the computed centers agree.
fn merge_cocircular(dt: &Dcel<i64>, centers: &[Option<Point2<f64>>], eps: f64) -> Vec<usize> {
    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let mut parent: Vec<usize> = (0..centers.len()).collect();
    for f in dt.faces() {
        for e in dt.face_edges(f) {
            let t = dt.twin(e);
            let Some(g) = dt.face(t) else {
                continue;
            };
            let (Some(p), Some(q)) = (centers[f.index()], centers[g.index()]) else {
                continue;
            };
            let (a, b) = dt.segment(e);
            let c = dt.point(dt.origin(dt.prev(e)));
            let d = dt.point(dt.origin(dt.prev(t)));
            let cocircular = match incircle(a, b, c, d) {
                Some(place) => place == Ordering::Equal && same_point(p, q, eps),
                None => p == q,
            };
            if cocircular {
                let (rf, rg) = (find(&mut parent, f.index()), find(&mut parent, g.index()));
                parent[rf.max(rg)] = rf.min(rg);
            }
        }
    }
    (0..centers.len()).map(|i| find(&mut parent, i)).collect()
}

#[inline]
fn same_point(p: Point2<f64>, q: Point2<f64>, eps: f64) -> bool {
    compare_equal_eps(p.x, q.x, eps) && compare_equal_eps(p.y, q.y, eps)
}

/// Working state while the diagram is stitched together.
struct Assembly<'a> {
    dt: &'a Dcel<i64>,
    mesh: Dcel<f64>,
    frame: Frame,
    eps: f64,
    /// Outside half-edge leaving the first corner of each side.
    anchors: [EdgeId; 4],
    /// Diagram vertex and position of each Delaunay face's circumcenter.
    centers: Vec<Option<(VertexId, Point2<f64>)>>,
    /// Diagram half-edge built for each Delaunay half-edge.
    dual: Vec<Option<EdgeId>>,
    visited: Vec<bool>,
}

impl<'a> Assembly<'a> {
    fn new(dt: &'a Dcel<i64>, frame: Frame, eps: f64) -> Result<Self, MeshError> {
        let mut mesh = Dcel::new();
        let corners: Vec<VertexId> = frame
            .corners()
            .iter()
            .map(|&p| mesh.add_vertex(p, VertexTag::Boundary))
            .collect();
        mesh.create_polygon(&corners)?;

        // Top, right, bottom and left sides start at TL, TR, BR and BL.
        let mut anchors = [EdgeId(0); 4];
        for (slot, &v) in anchors.iter_mut().zip(&[corners[0], corners[3], corners[2], corners[1]]) {
            *slot = mesh
                .incident_edges(v)
                .find(|&e| mesh.face(e).is_none())
                .ok_or(MeshError::TopologyViolation {
                    edge: 0,
                    reason: "frame corner has no outside edge",
                })?;
        }

        Ok(Self {
            dt,
            mesh,
            frame,
            eps,
            anchors,
            centers: vec![None; dt.faces.len()],
            dual: vec![None; dt.edges.len()],
            visited: vec![false; dt.edges.len()],
        })
    }

    /// Allocates one diagram vertex per circumcenter group.
    fn add_centers(&mut self, centers: &[Option<Point2<f64>>], groups: &[usize]) {
        let mut vertex_of_group: Vec<Option<VertexId>> = vec![None; centers.len()];
        for (i, center) in centers.iter().enumerate() {
            let root = groups[i];
            let (Some(_), Some(p)) = (center, centers[root]) else {
                continue;
            };
            let v = *vertex_of_group[root].get_or_insert_with(|| self.mesh.add_vertex(p, VertexTag::Circumcenter));
            self.centers[i] = Some((v, p));
        }
    }

    fn center(&self, f: FaceId) -> Result<(VertexId, Point2<f64>), MeshError> {
        self.centers[f.index()].ok_or(MeshError::TopologyViolation {
            edge: self.dt.chain(f).index(),
            reason: "face has no circumcenter",
        })
    }

    /// Visits sites from the top down, building each one's dual edges in
    /// counter-clockwise order. Edges with no attached endpoint yet are
    /// retried once the sweep is over.
    fn sweep(&mut self) -> Result<(), MeshError> {
        let dt = self.dt;
        let mut heap: BinaryHeap<SweepKey> = dt
            .vertices()
            .map(|v| SweepKey {
                point: dt.point(v),
                vertex: v,
            })
            .collect();

        let mut deferred = Vec::new();
        while let Some(SweepKey { vertex, .. }) = heap.pop() {
            for h in self.ring(vertex) {
                if !self.visited[h.index()] && !self.build_dual(h)? {
                    deferred.push(h);
                }
            }
        }

        while !deferred.is_empty() {
            let pending = deferred.len();
            let mut still = Vec::new();
            for h in deferred {
                if !self.visited[h.index()] && !self.build_dual(h)? {
                    still.push(h);
                }
            }
            if still.len() == pending {
                return Err(MeshError::TopologyViolation {
                    edge: still[0].index(),
                    reason: "dual edge cannot reach the diagram",
                });
            }
            deferred = still;
        }
        Ok(())
    }

    /// Outgoing Delaunay half-edges of `s` counter-clockwise, starting from
    /// one whose dual exists already or else from a hull edge.
    fn ring(&self, s: VertexId) -> Vec<EdgeId> {
        let dt = self.dt;
        let incident: Vec<EdgeId> = dt.incident_edges(s).collect();
        let on_hull = |h: EdgeId| dt.face(h).is_none() || dt.face(dt.twin(h)).is_none();
        let start = incident
            .iter()
            .copied()
            .find(|h| self.visited[h.index()])
            .or_else(|| incident.iter().copied().find(|&h| on_hull(h)))
            .or_else(|| incident.first().copied());
        let Some(start) = start else {
            return Vec::new();
        };

        let mut ring = Vec::with_capacity(incident.len());
        let mut h = start;
        for _ in 0..incident.len() {
            ring.push(h);
            h = dt.twin(dt.prev(h));
            if h == start {
                break;
            }
        }
        ring
    }

    /// Builds the dual of `h` and its twin. Returns `false` when neither
    /// endpoint is attached to the diagram yet.
    fn build_dual(&mut self, h: EdgeId) -> Result<bool, MeshError> {
        let t = self.dt.twin(h);
        let (u, v) = self.dual_endpoints(h)?;

        if u != v {
            if self.mesh.vertex(u).degree() == 0 && self.mesh.vertex(v).degree() == 0 {
                return Ok(false);
            }
            let d = self.connect(u, v)?;
            self.dual[h.index()] = Some(d);
            self.dual[t.index()] = Some(self.mesh.twin(d));
            tracing::trace!(delaunay = h.index(), diagram = d.index(), "built dual edge");
        }
        self.visited[h.index()] = true;
        self.visited[t.index()] = true;
        Ok(true)
    }

    /// Tail and head of the dual of `h = s -> t`, directed so that the cell
    /// of `s` is on its left.
    fn dual_endpoints(&mut self, h: EdgeId) -> Result<(VertexId, VertexId), MeshError> {
        let dt = self.dt;
        let t = dt.twin(h);
        let (s, e) = dt.segment(h);
        let (s, e) = (s.to_f64(), e.to_f64());
        let normal = |from, to| {
            unit_normal(from, to).ok_or(MeshError::TopologyViolation {
                edge: h.index(),
                reason: "zero-length Delaunay edge",
            })
        };

        match (dt.face(t), dt.face(h)) {
            (Some(right), Some(left)) => Ok((self.center(right)?.0, self.center(left)?.0)),
            (Some(right), None) => {
                let (tail, origin) = self.center(right)?;
                let head = self.clip_ray(Ray2::new(origin, normal(e, s)?))?;
                Ok((tail, head))
            }
            (None, Some(left)) => {
                let (head, origin) = self.center(left)?;
                let tail = self.clip_ray(Ray2::new(origin, normal(s, e)?))?;
                Ok((tail, head))
            }
            (None, None) => self.clip_line(Ray2::new(s.midpoint(e), normal(s, e)?)),
        }
    }

    /// Frame crossings of the line through `ray`, optionally only ahead of
    /// its origin. Coincident crossings at a corner count once.
    fn crossings(&self, ray: Ray2<f64>, forward_only: bool) -> Vec<(f64, Side, Point2<f64>)> {
        let fr = self.frame;
        let candidates = [
            (Side::Top, ray.parameter_at_y(fr.max.y)),
            (Side::Right, ray.parameter_at_x(fr.max.x)),
            (Side::Bottom, ray.parameter_at_y(fr.min.y)),
            (Side::Left, ray.parameter_at_x(fr.min.x)),
        ];

        let mut hits: Vec<(f64, Side, Point2<f64>)> = Vec::with_capacity(2);
        for (side, t) in candidates {
            let Some(t) = t else {
                continue;
            };
            if forward_only && t <= 0.0 {
                continue;
            }
            let Some(p) = fr.snap(side, ray.point_at(t), self.eps) else {
                continue;
            };
            if !hits.iter().any(|&(_, _, q)| fr.same_spot(p, q, self.eps)) {
                hits.push((t, side, p));
            }
        }
        hits
    }

    fn clip_ray(&mut self, ray: Ray2<f64>) -> Result<VertexId, MeshError> {
        match self.crossings(ray, true).as_slice() {
            &[(_, side, p)] => self.boundary_vertex(side, p),
            hits => Err(MeshError::BoundaryClipFailed { crossings: hits.len() }),
        }
    }

    /// Both frame points of an infinite bisector, the one ahead of the ray
    /// first.
    fn clip_line(&mut self, ray: Ray2<f64>) -> Result<(VertexId, VertexId), MeshError> {
        match self.crossings(ray, false).as_slice() {
            &[a, b] => {
                let (ahead, behind) = if a.0 > b.0 { (a, b) } else { (b, a) };
                let tail = self.boundary_vertex(ahead.1, ahead.2)?;
                let head = self.boundary_vertex(behind.1, behind.2)?;
                Ok((tail, head))
            }
            hits => Err(MeshError::BoundaryClipFailed { crossings: hits.len() }),
        }
    }

    /// The frame vertex at `q`, splitting the side's outside edge if there
    /// is none yet. Walks from the side's anchor corner.
    fn boundary_vertex(&mut self, side: Side, q: Point2<f64>) -> Result<VertexId, MeshError> {
        let anchor = self.anchors[side.index()];
        let start = self.mesh.origin(anchor);
        let base = side.progress(self.mesh.point(start));
        let slack = self.eps * self.frame.side_length(side);
        // Distance along the side from its first corner.
        let offset = side.progress(q) - base;
        if offset.abs() <= slack {
            return Ok(start);
        }

        let mut e = anchor;
        for _ in 0..self.mesh.edges.len() {
            let far = self.mesh.destination(e);
            let far_offset = side.progress(self.mesh.point(far)) - base;
            if (offset - far_offset).abs() <= slack {
                return Ok(far);
            }
            if offset < far_offset {
                let p = self.mesh.add_vertex(q, VertexTag::Boundary);
                self.mesh.insert_point_in_edge(p, e);
                tracing::trace!(point = %q, ?side, "inserted frame point");
                return Ok(p);
            }
            e = self.mesh.next(e);
        }
        Err(MeshError::BoundaryClipFailed { crossings: 0 })
    }

    /// Adds the edge `u -> v`, placing it at both ends in the angular gap
    /// its direction falls into.
    fn connect(&mut self, u: VertexId, v: VertexId) -> Result<EdgeId, MeshError> {
        let (pu, pv) = (self.mesh.point(u), self.mesh.point(v));
        let a = self.wedge(u, pv - pu);
        let b = self.wedge(v, pu - pv);

        match (a, b) {
            (Some(a), Some(b)) => Ok(self.mesh.insert_diagonal(a, b)?.0),
            (Some(a), None) => {
                let back = self.mesh.create_edge_p2e(v, a);
                Ok(self.mesh.twin(back))
            }
            (None, Some(b)) => Ok(self.mesh.create_edge_p2e(u, b)),
            (None, None) => Err(MeshError::TopologyViolation {
                edge: self.mesh.edges.len(),
                reason: "dual edge has no attached endpoint",
            }),
        }
    }

    /// First outgoing edge of `v` clockwise from `dir`.
    fn wedge(&self, v: VertexId, dir: Vec2<f64>) -> Option<EdgeId> {
        let alpha = dir.angle();
        self.mesh
            .incident_edges(v)
            .map(|e| {
                let (a, b) = self.mesh.segment(e);
                ((alpha - (b - a).angle()).rem_euclid(TAU), e)
            })
            .min_by(|x, y| x.0.total_cmp(&y.0))
            .map(|(_, e)| e)
    }

    fn finish(self, tri: &Triangulation) -> Result<VoronoiDiagram, MeshError> {
        self.mesh.validate()?;
        let dt = self.dt;

        let mut cells = Vec::with_capacity(tri.sites().len());
        let mut face_site = vec![None; self.mesh.faces.len()];
        for i in 0..tri.sites().len() {
            let v = tri.vertex_of(i).ok_or(MeshError::TopologyViolation {
                edge: 0,
                reason: "site missing from triangulation",
            })?;
            let cell = dt
                .incident_edges(v)
                .find_map(|h| self.dual[h.index()])
                .and_then(|d| self.mesh.face(d))
                .ok_or(MeshError::TopologyViolation {
                    edge: 0,
                    reason: "site has no cell",
                })?;
            if face_site[cell.index()].replace(i).is_some() {
                return Err(MeshError::TopologyViolation {
                    edge: self.mesh.chain(cell).index(),
                    reason: "two sites share a cell",
                });
            }
            cells.push(cell);
        }
        if self.mesh.num_faces() != cells.len() {
            return Err(MeshError::TopologyViolation {
                edge: 0,
                reason: "diagram face without a site",
            });
        }

        let diagram = VoronoiDiagram {
            mesh: self.mesh,
            frame: self.frame,
            sites: tri.sites().to_vec(),
            cells,
            face_site,
        };
        tracing::debug!(
            vertices = diagram.num_vertices(),
            edges = diagram.num_edges(),
            faces = diagram.num_faces(),
            boundary_points = diagram.num_boundary_points(),
            "voronoi diagram assembled"
        );
        Ok(diagram)
    }
}

/// A Voronoi diagram clipped to a rectangular frame.
#[derive(Debug, Clone)]
pub struct VoronoiDiagram {
    mesh: Dcel<f64>,
    frame: Frame,
    sites: Vec<Site>,
    /// Cell of each site, in input order.
    cells: Vec<FaceId>,
    /// Input index of the site owning each face slot.
    face_site: Vec<Option<usize>>,
}

impl VoronoiDiagram {
    #[inline]
    pub fn mesh(&self) -> &Dcel<f64> {
        &self.mesh
    }

    #[inline]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Undirected edges, frame sides included.
    pub fn num_edges(&self) -> usize {
        self.mesh.num_edges()
    }

    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Frame corners plus every point where a bisector meets the frame.
    pub fn num_boundary_points(&self) -> usize {
        self.mesh
            .vertices()
            .filter(|&v| self.mesh.vertex(v).tag() == VertexTag::Boundary)
            .count()
    }

    /// Cell of the site with identity `id`.
    pub fn face_of_site(&self, id: u32) -> Option<FaceId> {
        self.sites
            .iter()
            .position(|s| s.id == id)
            .map(|i| self.cells[i])
    }

    pub fn site_of_face(&self, f: FaceId) -> Option<Site> {
        self.face_site
            .get(f.index())
            .copied()
            .flatten()
            .map(|i| self.sites[i])
    }

    /// Corners of a cell counter-clockwise, starting from its chain.
    pub fn cell_polygon(&self, f: FaceId) -> Vec<Point2<f64>> {
        self.mesh
            .face_edges(f)
            .map(|e| self.mesh.point(self.mesh.origin(e)))
            .collect()
    }
}
