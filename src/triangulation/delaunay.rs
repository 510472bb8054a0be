//! Delaunay triangulation by incremental insertion with Lawson flips.
//!
//! Delaunay triangulation maximizes the minimum angle of all triangles. No
//! site lies strictly inside the circumcircle of any triangle.
//!
//! # Algorithm
//!
//! 1. Enclose every site in a large bounding triangle of three synthetic
//!    vertices.
//! 2. Insert sites one at a time. A site inside a triangle splits it in
//!    three; a site on an edge splits the two triangles sharing it in four.
//! 3. After each insertion, flip every edge opposite the new site whose far
//!    vertex lies inside the circumcircle, recursively.
//! 4. Remove the synthetic vertices and close any concave notch they leave
//!    on the hull.
//!
//! # Complexity
//!
//! - Time: O(n²) (point location scans every face)
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use dualmesh::triangulation::{triangulate, Site};
//!
//! let sites = vec![
//!     Site::new(1, 0, 0),
//!     Site::new(2, 10, 0),
//!     Site::new(3, 5, 8),
//!     Site::new(4, 5, 3),
//! ];
//!
//! let tri = triangulate(&sites).unwrap();
//! assert_eq!(tri.num_vertices(), 4);
//! assert_eq!(tri.num_faces(), 3);
//! assert_eq!(tri.num_edges(), 6);
//!
//! for t in tri.triangles() {
//!     assert_ne!(t.a, t.b);
//! }
//! ```

use crate::dcel::{Dcel, EdgeId, FaceId, VertexId, VertexTag};
use crate::error::MeshError;
use crate::kernel::{barycentric, circumcenter, distance, incircle};
use crate::primitives::Point2;
use crate::tolerance::{compare_equal_eps, orient2d, Orientation};
use std::cmp::Ordering;

/// An input point with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    /// Positive, unique identity.
    pub id: u32,
    pub point: Point2<i64>,
}

impl Site {
    #[inline]
    pub fn new(id: u32, x: i64, y: i64) -> Self {
        Self {
            id,
            point: Point2::new(x, y),
        }
    }
}

/// Tolerances and sizes used by [`DelaunayBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    /// Bounding triangle size as a multiple of the site extent.
    pub bounding_scale: i64,
    /// Relative tolerance under which a vertex counts as on a circumcircle.
    /// Only consulted when the exact integer test would overflow.
    pub incircle_epsilon: f64,
    /// Barycentric coordinates within this of zero put a site on an edge.
    pub locate_epsilon: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            bounding_scale: 10,
            incircle_epsilon: 1e-9,
            locate_epsilon: 1e-12,
        }
    }
}

impl TriangulationConfig {
    /// Sets the bounding triangle scale.
    pub fn with_bounding_scale(mut self, scale: i64) -> Self {
        self.bounding_scale = scale;
        self
    }

    /// Sets the in-circle tolerance.
    pub fn with_incircle_epsilon(mut self, eps: f64) -> Self {
        self.incircle_epsilon = eps;
        self
    }

    /// Sets the point location tolerance.
    pub fn with_locate_epsilon(mut self, eps: f64) -> Self {
        self.locate_epsilon = eps;
        self
    }
}

/// Progress of a [`DelaunayBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    BoundingTriangleReady,
    /// Locating and splicing in the site at this input index.
    Inserting(usize),
    /// Restoring the empty-circle property around the site at this index.
    Legalizing(usize),
    /// Synthetic vertices are gone and the hull is closed.
    Cleanup,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Inside(FaceId),
    OnEdge(EdgeId),
}

/// Which edges to re-test after a flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spread {
    /// Only the two edges that now face the inserted site.
    OppositeSite,
    /// All four sides of the flipped quadrilateral.
    Quadrilateral,
}

/// Step-by-step Delaunay construction.
///
/// [`triangulate`] runs every stage at once; the builder exposes them for
/// callers that want to inspect the mesh in between.
///
/// ```
/// use dualmesh::triangulation::{DelaunayBuilder, Site, Stage};
///
/// let mut builder = DelaunayBuilder::new(vec![
///     Site::new(1, 0, 0),
///     Site::new(2, 4, 0),
///     Site::new(3, 0, 4),
/// ]);
/// builder.prepare().unwrap();
/// assert_eq!(builder.mesh().num_faces(), 1);
///
/// builder.insert_next().unwrap();
/// assert_eq!(builder.stage(), Stage::Legalizing(0));
/// assert_eq!(builder.mesh().num_faces(), 3);
///
/// let tri = builder.finish().unwrap();
/// assert_eq!(tri.num_faces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DelaunayBuilder {
    config: TriangulationConfig,
    sites: Vec<Site>,
    mesh: Dcel<i64>,
    synthetic: Vec<VertexId>,
    site_vertices: Vec<VertexId>,
    stage: Stage,
}

impl DelaunayBuilder {
    /// Creates a builder over `sites` with the default configuration.
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            config: TriangulationConfig::default(),
            sites,
            mesh: Dcel::new(),
            synthetic: Vec::with_capacity(3),
            site_vertices: Vec::new(),
            stage: Stage::Uninitialized,
        }
    }

    pub fn with_config(mut self, config: TriangulationConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The mesh under construction, synthetic vertices included until
    /// cleanup.
    #[inline]
    pub fn mesh(&self) -> &Dcel<i64> {
        &self.mesh
    }

    /// Checks the input and builds the bounding triangle.
    pub fn prepare(&mut self) -> Result<(), MeshError> {
        if self.stage != Stage::Uninitialized {
            return Ok(());
        }
        check_sites(&self.sites)?;

        let corners = bounding_triangle(&self.sites, self.config.bounding_scale)?;
        let ids: Vec<VertexId> = corners
            .iter()
            .zip(0u8..)
            .map(|(&p, i)| self.mesh.add_vertex(p, VertexTag::Synthetic(i)))
            .collect();
        self.mesh.create_polygon(&ids)?;
        self.synthetic = ids;

        tracing::debug!(
            sites = self.sites.len(),
            top = %corners[0],
            left = %corners[1],
            right = %corners[2],
            "bounding triangle ready"
        );
        self.stage = Stage::BoundingTriangleReady;
        Ok(())
    }

    /// Inserts the next site in input order and legalizes around it.
    ///
    /// Returns `false` once every site has been inserted.
    pub fn insert_next(&mut self) -> Result<bool, MeshError> {
        self.prepare()?;
        if matches!(self.stage, Stage::Cleanup | Stage::Finalized) {
            return Ok(false);
        }
        let i = self.site_vertices.len();
        let Some(&site) = self.sites.get(i) else {
            return Ok(false);
        };

        self.stage = Stage::Inserting(i);
        let location = self.locate(site)?;
        let p = self.mesh.add_vertex(site.point, VertexTag::Site(site.id));
        let opposite = match location {
            Location::Inside(f) => self.split_face(p, f),
            Location::OnEdge(e) => self.split_edge(p, e)?,
        };

        self.stage = Stage::Legalizing(i);
        let flips = self.legalize(opposite, Spread::OppositeSite)?;
        tracing::debug!(site = site.id, point = %site.point, ?location, flips, "inserted site");

        self.site_vertices.push(p);
        Ok(true)
    }

    /// Inserts every remaining site.
    pub fn insert_all(&mut self) -> Result<(), MeshError> {
        while self.insert_next()? {}
        Ok(())
    }

    /// Removes the synthetic vertices and closes the hull.
    ///
    /// Inserts any sites still pending first.
    pub fn cleanup(&mut self) -> Result<(), MeshError> {
        self.insert_all()?;
        if matches!(self.stage, Stage::Cleanup | Stage::Finalized) {
            return Ok(());
        }

        for &v in &self.synthetic {
            let detached = self.mesh.remove_vertex(v);
            tracing::trace!(vertex = v.index(), detached, "removed synthetic vertex");
        }

        let filled = self.close_hull()?;
        if filled > 0 {
            tracing::warn!(filled, "closed concave notches left on the hull by the bounding triangle");
        }
        tracing::debug!(
            vertices = self.mesh.num_vertices(),
            edges = self.mesh.num_edges(),
            faces = self.mesh.num_faces(),
            "cleanup complete"
        );
        self.stage = Stage::Cleanup;
        Ok(())
    }

    /// Runs any remaining stages, validates the mesh and hands it over.
    pub fn finish(mut self) -> Result<Triangulation, MeshError> {
        self.cleanup()?;
        self.mesh.validate()?;
        self.stage = Stage::Finalized;
        Ok(Triangulation {
            mesh: self.mesh,
            sites: self.sites,
            site_vertices: self.site_vertices,
        })
    }

    /// Finds the face containing `site`, or the edge it lies on.
    fn locate(&self, site: Site) -> Result<Location, MeshError> {
        let q = site.point.to_f64();
        let eps = self.config.locate_epsilon;

        for f in self.mesh.faces() {
            let c = self.mesh.chain(f);
            let p1 = self.mesh.point(self.mesh.origin(c)).to_f64();
            let p2 = self.mesh.point(self.mesh.destination(c)).to_f64();
            let p3 = self.mesh.point(self.mesh.origin(self.mesh.prev(c))).to_f64();

            let Some(l) = barycentric(q, p1, p2, p3) else {
                continue;
            };
            if l.iter().any(|&x| x < -eps) {
                continue;
            }
            return match l.map(|x| x.abs() <= eps) {
                [false, false, false] => Ok(Location::Inside(f)),
                [true, false, false] => Ok(Location::OnEdge(self.mesh.next(c))),
                [false, true, false] => Ok(Location::OnEdge(self.mesh.prev(c))),
                [false, false, true] => Ok(Location::OnEdge(c)),
                _ => Err(MeshError::DuplicateSite {
                    site: site.id,
                    x: site.point.x,
                    y: site.point.y,
                }),
            };
        }

        Err(MeshError::PointLocationFailed {
            site: site.id,
            x: site.point.x,
            y: site.point.y,
        })
    }

    /// Fans `p` out to the three corners of `f`. Returns the edges now
    /// opposite `p`.
    fn split_face(&mut self, p: VertexId, f: FaceId) -> Vec<EdgeId> {
        let c0 = self.mesh.chain(f);
        let c1 = self.mesh.next(c0);
        let c2 = self.mesh.next(c1);

        self.mesh.create_edge_p2e(p, c0);
        self.mesh.create_edge_p2e(p, c1);
        self.mesh.create_edge_p2e(p, c2);

        self.mesh.set_face(c0, Some(f));
        self.mesh.new_face(c1);
        self.mesh.new_face(c2);
        vec![c0, c1, c2]
    }

    /// Splits `e` at `p` and closes each side back into triangles. Returns
    /// the edges now opposite `p`.
    fn split_edge(&mut self, p: VertexId, e: EdgeId) -> Result<Vec<EdgeId>, MeshError> {
        let t = self.mesh.twin(e);
        let (en, ep) = (self.mesh.next(e), self.mesh.prev(e));
        let (tn, tp) = (self.mesh.next(t), self.mesh.prev(t));
        let (fe, ft) = (self.mesh.face(e), self.mesh.face(t));

        let (_, n) = self.mesh.insert_point_in_edge(p, e);
        let m = self.mesh.twin(e);

        let mut opposite = Vec::with_capacity(4);
        if fe.is_some() {
            self.mesh.insert_diagonal(n, ep)?;
            opposite.extend([en, ep]);
        }
        if ft.is_some() {
            self.mesh.insert_diagonal(m, tp)?;
            opposite.extend([tn, tp]);
        }
        Ok(opposite)
    }

    /// Flips illegal edges until none of those reachable from `stack` is
    /// left. Returns the number of flips.
    fn legalize(&mut self, mut stack: Vec<EdgeId>, spread: Spread) -> Result<usize, MeshError> {
        let mut flips = 0;
        while let Some(e) = stack.pop() {
            if !self.is_illegal(e)? {
                continue;
            }
            let t = self.mesh.twin(e);
            let (en, ep) = (self.mesh.next(e), self.mesh.prev(e));
            let (tn, tp) = (self.mesh.next(t), self.mesh.prev(t));

            self.mesh.flip_edge(e)?;
            flips += 1;
            tracing::trace!(edge = e.index(), "flipped illegal edge");

            stack.push(tn);
            stack.push(tp);
            if spread == Spread::Quadrilateral {
                stack.push(en);
                stack.push(ep);
            }
        }
        Ok(flips)
    }

    /// Whether the far vertex across `e` lies strictly inside the
    /// circumcircle of the triangle on `e`'s left. Hull edges are legal.
    ///
    /// Decided exactly on the integer coordinates; the tolerant distance
    /// comparison only runs when the exact determinant does not fit.
    fn is_illegal(&self, e: EdgeId) -> Result<bool, MeshError> {
        let t = self.mesh.twin(e);
        if self.mesh.face(e).is_none() || self.mesh.face(t).is_none() {
            return Ok(false);
        }
        let a = self.mesh.point(self.mesh.origin(e));
        let b = self.mesh.point(self.mesh.origin(t));
        let c = self.mesh.point(self.mesh.origin(self.mesh.prev(e)));
        let d = self.mesh.point(self.mesh.origin(self.mesh.prev(t)));
        if let Some(place) = incircle(a, b, c, d) {
            return Ok(place == Ordering::Greater);
        }

        let center = circumcenter(a.to_f64(), b.to_f64(), c.to_f64())?;
        let radius = distance(center, a.to_f64());
        let dist = distance(center, d.to_f64());
        Ok(dist < radius && !compare_equal_eps(dist, radius, self.config.incircle_epsilon))
    }

    /// Fills concave notches on the outer boundary until it is convex.
    /// Returns the number of triangles added.
    fn close_hull(&mut self) -> Result<usize, MeshError> {
        let mut filled = 0;
        while let Some((e, from)) = self.find_notch() {
            let n = self.mesh.next(e);
            let (d, _) = self.mesh.insert_diagonal(from, e)?;
            filled += 1;
            self.legalize(vec![e, n, d], Spread::Quadrilateral)?;
        }
        Ok(filled)
    }

    /// An outside edge `u -> v` followed by `v -> w` that turns left with
    /// nothing inside triangle `(u, v, w)`. Returns it with the edge leaving
    /// `w`.
    fn find_notch(&self) -> Option<(EdgeId, EdgeId)> {
        let mesh = &self.mesh;
        let at = |v: VertexId| mesh.point(v).to_f64();

        for e in mesh.edges().filter(|&e| mesh.face(e).is_none()) {
            let n = mesh.next(e);
            let after = mesh.next(n);
            if after == e {
                continue;
            }
            let (u, v, w) = (mesh.origin(e), mesh.origin(n), mesh.origin(after));
            let (pu, pv, pw) = (at(u), at(v), at(w));
            if orient2d(pu, pv, pw, 0.0) != Orientation::CounterClockwise {
                continue;
            }
            let blocked = mesh.vertices().any(|x| {
                if x == u || x == v || x == w {
                    return false;
                }
                let px = at(x);
                orient2d(pu, pv, px, 0.0) != Orientation::Clockwise
                    && orient2d(pv, pw, px, 0.0) != Orientation::Clockwise
                    && orient2d(pw, pu, px, 0.0) != Orientation::Clockwise
            });
            if !blocked {
                return Some((e, after));
            }
        }
        None
    }
}

/// Rejects inputs no triangulation can be built from.
fn check_sites(sites: &[Site]) -> Result<(), MeshError> {
    let Some(first) = sites.first() else {
        return Err(MeshError::NotEnoughSites { count: 0 });
    };
    if sites.len() < 2 {
        return Err(MeshError::NotEnoughSites { count: sites.len() });
    }
    let Some(second) = sites.iter().find(|s| s.point != first.point) else {
        let dup = sites[1];
        return Err(MeshError::DuplicateSite {
            site: dup.id,
            x: dup.point.x,
            y: dup.point.y,
        });
    };

    let (a, b) = (first.point.to_f64(), second.point.to_f64());
    let collinear = sites
        .iter()
        .all(|s| orient2d(a, b, s.point.to_f64(), 0.0) == Orientation::Collinear);
    if collinear {
        if let Some(third) = sites.iter().find(|s| s.point != first.point && s.point != second.point) {
            return Err(MeshError::DegenerateCircumcenter(a, b, third.point.to_f64()));
        }
    }
    Ok(())
}

/// Counter-clockwise triangle `[top, left, right]` around the sites'
/// bounding box.
fn bounding_triangle(sites: &[Site], scale: i64) -> Result<[Point2<i64>; 3], MeshError> {
    let Some(first) = sites.first() else {
        return Err(MeshError::NotEnoughSites { count: 0 });
    };
    let mut min = first.point;
    let mut max = first.point;
    for s in sites {
        min.x = min.x.min(s.point.x);
        min.y = min.y.min(s.point.y);
        max.x = max.x.max(s.point.x);
        max.y = max.y.max(s.point.y);
    }
    let overflow = MeshError::CoordinateOverflow {
        min_x: min.x,
        min_y: min.y,
        max_x: max.x,
        max_y: max.y,
    };

    let corners = (|| {
        let cx = min.x.checked_add(max.x)?.div_euclid(2);
        let cy = min.y.checked_add(max.y)?.div_euclid(2);
        let d = max.x.checked_sub(min.x)?.max(max.y.checked_sub(min.y)?).max(1);
        let s = scale.max(1).checked_mul(d)?;
        Some([
            Point2::new(cx, cy.checked_add(s.checked_mul(2)?)?),
            Point2::new(cx.checked_sub(s)?, cy.checked_sub(s)?),
            Point2::new(cx.checked_add(s)?, cy.checked_sub(s)?),
        ])
    })();
    corners.ok_or(overflow)
}

/// Triangulates `sites` with the default configuration.
pub fn triangulate(sites: &[Site]) -> Result<Triangulation, MeshError> {
    DelaunayBuilder::new(sites.to_vec()).finish()
}

/// A triangle as three vertex ids in counter-clockwise order, starting
/// from its face's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
}

impl Triangle {
    /// Returns the three edges of this triangle as vertex pairs.
    #[inline]
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.a == v || self.b == v || self.c == v
    }
}

/// A finished Delaunay triangulation over integer sites.
#[derive(Debug, Clone)]
pub struct Triangulation {
    mesh: Dcel<i64>,
    sites: Vec<Site>,
    site_vertices: Vec<VertexId>,
}

impl Triangulation {
    #[inline]
    pub fn mesh(&self) -> &Dcel<i64> {
        &self.mesh
    }

    /// Sites in input order.
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Mesh vertex of the site at input index `i`.
    #[inline]
    pub fn vertex_of(&self, i: usize) -> Option<VertexId> {
        self.site_vertices.get(i).copied()
    }

    /// Site identity carried by `v`.
    #[inline]
    pub fn site_id(&self, v: VertexId) -> Option<u32> {
        self.mesh.vertex(v).tag().site()
    }

    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.mesh.num_edges()
    }

    pub fn num_faces(&self) -> usize {
        self.mesh.num_faces()
    }

    /// Every face as a triangle.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.mesh
            .faces()
            .map(|f| {
                let c = self.mesh.chain(f);
                Triangle {
                    a: self.mesh.origin(c),
                    b: self.mesh.destination(c),
                    c: self.mesh.origin(self.mesh.prev(c)),
                }
            })
            .collect()
    }

    /// Every half-edge as `(origin id, destination id)`, grouped by origin
    /// in input order, destinations ascending.
    pub fn incident_pairs(&self) -> Vec<(u32, u32)> {
        let mut pairs = Vec::with_capacity(2 * self.num_edges());
        for (site, &v) in self.sites.iter().zip(&self.site_vertices) {
            let mut targets: Vec<u32> = self
                .mesh
                .incident_edges(v)
                .filter_map(|e| self.site_id(self.mesh.destination(e)))
                .collect();
            targets.sort_unstable();
            pairs.extend(targets.into_iter().map(|t| (site.id, t)));
        }
        pairs
    }

    /// First triangle whose circumcircle strictly contains another vertex,
    /// with that vertex. `eps` is the relative tolerance on the radius.
    pub fn find_empty_circle_violation(&self, eps: f64) -> Result<Option<(FaceId, VertexId)>, MeshError> {
        for f in self.mesh.faces() {
            let corners: Vec<VertexId> = self.mesh.face_edges(f).map(|e| self.mesh.origin(e)).collect();
            let &[a, b, c] = corners.as_slice() else {
                return Err(MeshError::TopologyViolation {
                    edge: self.mesh.chain(f).index(),
                    reason: "face is not a triangle",
                });
            };
            let at = |v: VertexId| self.mesh.point(v).to_f64();
            let center = circumcenter(at(a), at(b), at(c))?;
            let radius = distance(center, at(a));

            for v in self.mesh.vertices() {
                if v == a || v == b || v == c {
                    continue;
                }
                let dist = distance(center, at(v));
                if dist < radius && !compare_equal_eps(dist, radius, eps) {
                    return Ok(Some((f, v)));
                }
            }
        }
        Ok(None)
    }
}
