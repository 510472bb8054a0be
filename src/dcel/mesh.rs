//! Arena storage, navigation and structural validation.

use super::{EdgeId, Face, FaceId, HalfEdge, Vertex, VertexId, VertexTag};
use crate::error::MeshError;
use crate::primitives::{Coordinate, Point2};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A planar mesh stored as a doubly-connected edge list.
///
/// `T` is the coordinate type: `i64` for triangulations of integer sites,
/// `f64` for Voronoi diagrams.
#[derive(Debug, Clone)]
pub struct Dcel<T> {
    pub(crate) vertices: Vec<Vertex<T>>,
    pub(crate) edges: Vec<HalfEdge>,
    pub(crate) faces: Vec<Face>,
}

impl<T> Default for Dcel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Dcel<T> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Adds an isolated vertex.
    pub fn add_vertex(&mut self, point: Point2<T>, tag: VertexTag) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            point,
            tag,
            incident: BTreeSet::new(),
            removed: false,
        });
        id
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex<T> {
        &self.vertices[v.0]
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> &HalfEdge {
        &self.edges[e.0]
    }

    #[inline]
    pub fn face_data(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    #[inline]
    pub fn origin(&self, e: EdgeId) -> VertexId {
        self.edges[e.0].origin
    }

    #[inline]
    pub fn destination(&self, e: EdgeId) -> VertexId {
        self.origin(self.twin(e))
    }

    #[inline]
    pub fn twin(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].twin
    }

    #[inline]
    pub fn next(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].next
    }

    #[inline]
    pub fn prev(&self, e: EdgeId) -> EdgeId {
        self.edges[e.0].prev
    }

    /// Face on the left of `e`.
    #[inline]
    pub fn face(&self, e: EdgeId) -> Option<FaceId> {
        self.edges[e.0].face
    }

    /// Canonical boundary half-edge of `f`.
    #[inline]
    pub fn chain(&self, f: FaceId) -> EdgeId {
        self.faces[f.0].chain
    }

    /// Walks the boundary cycle that contains `start`, beginning at `start`.
    pub fn cycle(&self, start: EdgeId) -> Cycle<'_, T> {
        Cycle {
            mesh: self,
            start,
            current: Some(start),
            remaining: self.edges.len(),
        }
    }

    /// Boundary of `f`, starting from its chain.
    pub fn face_edges(&self, f: FaceId) -> Cycle<'_, T> {
        self.cycle(self.chain(f))
    }

    /// Outgoing half-edges of `v`.
    pub fn incident_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.vertices[v.0].incident.iter().copied()
    }

    /// Live vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.removed)
            .map(|(i, _)| VertexId(i))
    }

    /// Live half-edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.removed)
            .map(|(i, _)| EdgeId(i))
    }

    /// Live faces in id order.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.removed)
            .map(|(i, _)| FaceId(i))
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// Number of undirected edges (half the live half-edges).
    pub fn num_edges(&self) -> usize {
        self.edges().count() / 2
    }

    pub fn num_faces(&self) -> usize {
        self.faces().count()
    }

    /// Checks every structural invariant of the edge list.
    ///
    /// - `twin(twin(e)) = e` and the two ends differ
    /// - `next(prev(e)) = prev(next(e)) = e`
    /// - `origin(next(e)) = destination(e)`
    /// - all edges of a cycle carry the same face, and a live face's chain is
    ///   a live edge on its own cycle
    /// - every vertex's incident set is exactly its live outgoing edges
    pub fn validate(&self) -> Result<(), MeshError> {
        let violation = |e: EdgeId, reason: &'static str| MeshError::TopologyViolation { edge: e.0, reason };
        let n = self.edges.len();

        for e in self.edges() {
            let he = &self.edges[e.0];
            if he.twin.0 >= n || he.next.0 >= n || he.prev.0 >= n {
                return Err(violation(e, "link out of range"));
            }
            let twin = &self.edges[he.twin.0];
            if twin.removed || self.edges[he.next.0].removed || self.edges[he.prev.0].removed {
                return Err(violation(e, "link to removed half-edge"));
            }
            if twin.twin != e {
                return Err(violation(e, "twin is not an involution"));
            }
            if twin.origin == he.origin {
                return Err(violation(e, "half-edge is a loop"));
            }
            if self.next(he.prev) != e || self.prev(he.next) != e {
                return Err(violation(e, "next and prev are not inverse"));
            }
            if self.origin(he.next) != self.destination(e) {
                return Err(violation(e, "next does not start at destination"));
            }
            if self.face(he.next) != he.face {
                return Err(violation(e, "face label changes along cycle"));
            }
            if let Some(f) = he.face {
                if f.0 >= self.faces.len() || self.faces[f.0].removed {
                    return Err(violation(e, "label names a removed face"));
                }
            }
            let origin = &self.vertices[he.origin.0];
            if origin.removed || !origin.incident.contains(&e) {
                return Err(violation(e, "missing from origin's incident set"));
            }
        }

        for f in self.faces() {
            let chain = self.chain(f);
            if chain.0 >= n || self.edges[chain.0].removed || self.face(chain) != Some(f) {
                return Err(violation(chain, "face chain is not on its boundary"));
            }
            if !self.closes(chain) {
                return Err(violation(chain, "boundary cycle does not close"));
            }
        }

        for v in self.vertices() {
            for e in self.incident_edges(v) {
                if e.0 >= n || self.edges[e.0].removed || self.origin(e) != v {
                    return Err(violation(e, "stale entry in incident set"));
                }
            }
        }

        Ok(())
    }

    fn closes(&self, start: EdgeId) -> bool {
        let mut e = start;
        for _ in 0..self.edges.len() {
            e = self.next(e);
            if e == start {
                return true;
            }
        }
        false
    }
}

impl<T: Coordinate> Dcel<T> {
    #[inline]
    pub fn point(&self, v: VertexId) -> Point2<T> {
        self.vertices[v.0].point
    }

    /// Both endpoints of `e`, origin first.
    #[inline]
    pub fn segment(&self, e: EdgeId) -> (Point2<T>, Point2<T>) {
        (self.point(self.origin(e)), self.point(self.destination(e)))
    }

    /// Live vertices sorted by descending sweep order (top to bottom, left
    /// to right).
    pub fn vertices_in_sweep_order(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices().collect();
        ids.sort_by(|&a, &b| self.sweep_cmp(b, a));
        ids
    }

    /// Sweep order of two vertices by position.
    #[inline]
    pub(crate) fn sweep_cmp(&self, a: VertexId, b: VertexId) -> Ordering {
        self.point(a).sweep_cmp(&self.point(b))
    }

    /// Builds a closed polygon through `ring`.
    ///
    /// The inner cycle follows `ring` and becomes a new face; the opposite
    /// cycle faces the outside. Pass the vertices counter-clockwise for the
    /// face to lie inside.
    pub fn create_polygon(&mut self, ring: &[VertexId]) -> Result<FaceId, MeshError> {
        if ring.len() < 3 {
            return Err(MeshError::TopologyViolation {
                edge: self.edges.len(),
                reason: "polygon needs at least three vertices",
            });
        }

        let inner: Vec<EdgeId> = (0..ring.len())
            .map(|i| self.create_edge_p2p(ring[i], ring[(i + 1) % ring.len()], None, None))
            .collect();

        for i in 0..inner.len() {
            let j = (i + 1) % inner.len();
            self.link(inner[i], inner[j]);
            let (ti, tj) = (self.twin(inner[i]), self.twin(inner[j]));
            self.link(tj, ti);
        }

        Ok(self.new_face(inner[0]))
    }
}

/// Iterator over one boundary cycle.
///
/// Stops when it returns to its start. A corrupted cycle that never closes
/// is cut off after visiting as many half-edges as the mesh holds.
pub struct Cycle<'a, T> {
    mesh: &'a Dcel<T>,
    start: EdgeId,
    current: Option<EdgeId>,
    remaining: usize,
}

impl<T> Iterator for Cycle<'_, T> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let e = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        let n = self.mesh.next(e);
        self.current = if n == self.start { None } else { Some(n) };
        Some(e)
    }
}
