//! Topology-changing operations.
//!
//! These are the only functions that rewrite `twin`, `next`, `prev`, face
//! labels or incident sets. After each one returns, the mesh satisfies
//! [`Dcel::validate`] again provided its preconditions held.

use super::{Dcel, EdgeId, Face, FaceId, HalfEdge, VertexId};
use crate::error::MeshError;
use crate::primitives::Coordinate;
use std::cmp::Ordering;

impl<T: Coordinate> Dcel<T> {
    #[inline]
    pub(crate) fn link(&mut self, a: EdgeId, b: EdgeId) {
        self.edges[a.0].next = b;
        self.edges[b.0].prev = a;
    }

    /// Creates the half-edge pair `from -> to` and returns the forward half.
    ///
    /// The forward half gets `left`, its twin gets `right`. The pair forms its
    /// own two-edge cycle; the caller stitches it into the surrounding cycles.
    pub fn create_edge_p2p(
        &mut self,
        from: VertexId,
        to: VertexId,
        left: Option<FaceId>,
        right: Option<FaceId>,
    ) -> EdgeId {
        let e = EdgeId(self.edges.len());
        let t = EdgeId(e.0 + 1);
        self.edges.push(HalfEdge {
            origin: from,
            twin: t,
            next: t,
            prev: t,
            face: left,
            removed: false,
        });
        self.edges.push(HalfEdge {
            origin: to,
            twin: e,
            next: e,
            prev: e,
            face: right,
            removed: false,
        });
        self.vertices[from.0].incident.insert(e);
        self.vertices[to.0].incident.insert(t);
        e
    }

    /// Creates a half-edge from `from` to the origin of `to_edge`, entering
    /// the cycle immediately before `to_edge`.
    ///
    /// If `from` already lies on that cycle the new edge splits it in two:
    /// the returned edge is on the part containing `to_edge`, its twin on the
    /// rest. Otherwise `from` must be isolated and becomes a leaf hanging into
    /// the cycle. Both halves inherit the face of `to_edge`; relabeling is up
    /// to the caller.
    pub fn create_edge_p2e(&mut self, from: VertexId, to_edge: EdgeId) -> EdgeId {
        let face = self.face(to_edge);
        let before = self.prev(to_edge);
        let out = self.cycle(to_edge).find(|&x| self.origin(x) == from);

        let e = self.create_edge_p2p(from, self.origin(to_edge), face, face);
        let t = self.twin(e);

        match out {
            Some(out) => {
                let into = self.prev(out);
                self.link(into, e);
                self.link(e, to_edge);
                self.link(before, t);
                self.link(t, out);
            }
            None => {
                self.link(before, t);
                self.link(t, e);
                self.link(e, to_edge);
            }
        }
        e
    }

    /// Stamps every edge of the cycle through `chain` with `face` and, for a
    /// real face, moves its chain to the edge with the greatest origin.
    pub fn set_face(&mut self, chain: EdgeId, face: Option<FaceId>) {
        let cycle: Vec<EdgeId> = self.cycle(chain).collect();
        let mut best = chain;
        for &e in &cycle {
            self.edges[e.0].face = face;
            if self.sweep_cmp(self.origin(e), self.origin(best)) == Ordering::Greater {
                best = e;
            }
        }
        if let Some(f) = face {
            self.faces[f.0].chain = best;
        }
    }

    /// Allocates a face for the cycle through `chain`.
    pub(crate) fn new_face(&mut self, chain: EdgeId) -> FaceId {
        let f = FaceId(self.faces.len());
        self.faces.push(Face {
            chain,
            removed: false,
        });
        self.set_face(chain, Some(f));
        f
    }

    fn refresh_chain(&mut self, e: EdgeId) {
        if let Some(f) = self.face(e) {
            self.set_face(e, Some(f));
        }
    }

    /// Splits `edge` (`a -> b`) at the isolated vertex `p`.
    ///
    /// `edge` is shortened to `a -> p` and its twin to `b -> p`; two new
    /// half-edges `p -> b` and `p -> a` complete the pairs. Returns
    /// `(a -> p, p -> b)`.
    pub fn insert_point_in_edge(&mut self, p: VertexId, edge: EdgeId) -> (EdgeId, EdgeId) {
        let e = edge;
        let t = self.twin(e);
        let (en, tn) = (self.next(e), self.next(t));
        let (fe, ft) = (self.face(e), self.face(t));

        let n = EdgeId(self.edges.len());
        let m = EdgeId(n.0 + 1);
        self.edges.push(HalfEdge {
            origin: p,
            twin: t,
            next: n,
            prev: n,
            face: fe,
            removed: false,
        });
        self.edges.push(HalfEdge {
            origin: p,
            twin: e,
            next: m,
            prev: m,
            face: ft,
            removed: false,
        });
        self.edges[e.0].twin = m;
        self.edges[t.0].twin = n;
        self.vertices[p.0].incident.extend([n, m]);

        self.link(e, n);
        self.link(n, en);
        self.link(t, m);
        self.link(m, tn);

        self.refresh_chain(e);
        self.refresh_chain(t);
        (e, n)
    }

    /// Connects the origin of `from` to the origin of `to` across the face
    /// they both bound.
    ///
    /// The new edge runs `origin(from) -> origin(to)` and heads the cycle
    /// that continues with `to`; that cycle gets a fresh face. The cycle
    /// through `from` keeps the old label, which may be the outside.
    pub fn insert_diagonal(&mut self, from: EdgeId, to: EdgeId) -> Result<(EdgeId, FaceId), MeshError> {
        if from == to || !self.cycle(from).any(|x| x == to) {
            return Err(MeshError::TopologyViolation {
                edge: to.0,
                reason: "diagonal endpoints are not on one cycle",
            });
        }
        let old = self.face(from);
        let (pf, pt) = (self.prev(from), self.prev(to));

        let d = self.create_edge_p2p(self.origin(from), self.origin(to), old, old);
        let dt = self.twin(d);
        self.link(pf, d);
        self.link(d, to);
        self.link(pt, dt);
        self.link(dt, from);

        self.set_face(from, old);
        let f = self.new_face(d);
        Ok((d, f))
    }

    /// Replaces the diagonal of the quadrilateral formed by the two
    /// triangles on either side of `e`.
    ///
    /// With `e = a -> b` in triangle `(a, b, c)` and its twin in `(b, a, d)`,
    /// afterwards `e = d -> c` and its twin is `c -> d`. Both faces are
    /// kept; `e` stays in the first. Fails on a hull edge or a non-triangle.
    pub fn flip_edge(&mut self, e: EdgeId) -> Result<(), MeshError> {
        let t = self.twin(e);
        let (f1, f2) = match (self.face(e), self.face(t)) {
            (Some(f1), Some(f2)) if f1 != f2 => (f1, f2),
            _ => {
                return Err(MeshError::TopologyViolation {
                    edge: e.0,
                    reason: "only an edge between two faces can be flipped",
                })
            }
        };
        let (en, ep) = (self.next(e), self.prev(e));
        let (tn, tp) = (self.next(t), self.prev(t));
        if self.next(en) != ep || self.next(tn) != tp {
            return Err(MeshError::TopologyViolation {
                edge: e.0,
                reason: "flipped edge must separate two triangles",
            });
        }

        let (a, b) = (self.origin(e), self.origin(t));
        let (c, d) = (self.origin(ep), self.origin(tp));

        self.vertices[a.0].incident.remove(&e);
        self.vertices[b.0].incident.remove(&t);
        self.edges[e.0].origin = d;
        self.edges[t.0].origin = c;
        self.vertices[d.0].incident.insert(e);
        self.vertices[c.0].incident.insert(t);

        self.link(e, ep);
        self.link(ep, tn);
        self.link(tn, e);
        self.link(t, tp);
        self.link(tp, en);
        self.link(en, t);

        self.set_face(e, Some(f1));
        self.set_face(t, Some(f2));
        Ok(())
    }

    /// Deletes `v` together with every edge incident on it.
    ///
    /// Edges are detached one pair at a time. Each detachment merges the
    /// faces on its two sides: two real faces merge into the one on the
    /// left of the outgoing half-edge, and any face merged with the outside
    /// becomes outside. Returns the number of edges removed.
    pub fn remove_vertex(&mut self, v: VertexId) -> usize {
        let mut detached = 0;
        while let Some(e) = self.vertices[v.0].incident.iter().next().copied() {
            self.detach_edge(e);
            detached += 1;
        }
        self.vertices[v.0].removed = true;
        detached
    }

    fn detach_edge(&mut self, e: EdgeId) {
        let t = self.twin(e);
        let (ep, en) = (self.prev(e), self.next(e));
        let (tp, tn) = (self.prev(t), self.next(t));
        let (fe, ft) = (self.face(e), self.face(t));

        // Leaf ends: the edge turns around at its origin or its destination.
        let rest: Vec<EdgeId> = match (ep == t, en == t) {
            (true, true) => Vec::new(),
            (true, false) => {
                self.link(tp, en);
                vec![tp]
            }
            (false, true) => {
                self.link(ep, tn);
                vec![ep]
            }
            (false, false) => {
                self.link(ep, tn);
                self.link(tp, en);
                vec![ep, tp]
            }
        };

        let survivor = match (fe, ft) {
            (Some(a), Some(b)) => {
                if a != b {
                    self.faces[b.0].removed = true;
                }
                Some(a)
            }
            (Some(a), None) | (None, Some(a)) => {
                self.faces[a.0].removed = true;
                None
            }
            (None, None) => None,
        };

        for &r in &rest {
            self.set_face(r, survivor);
        }
        if let (Some(f), true) = (survivor, rest.is_empty()) {
            self.faces[f.0].removed = true;
        }

        let (a, b) = (self.origin(e), self.origin(t));
        self.vertices[a.0].incident.remove(&e);
        self.vertices[b.0].incident.remove(&t);
        self.edges[e.0].removed = true;
        self.edges[t.0].removed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcel::VertexTag;
    use crate::primitives::Point2;

    fn square() -> (Dcel<i64>, [VertexId; 4], FaceId) {
        let mut mesh = Dcel::new();
        let v = [
            mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1)),
            mesh.add_vertex(Point2::new(4, 0), VertexTag::Site(2)),
            mesh.add_vertex(Point2::new(4, 4), VertexTag::Site(3)),
            mesh.add_vertex(Point2::new(0, 4), VertexTag::Site(4)),
        ];
        let f = mesh.create_polygon(&v).unwrap();
        (mesh, v, f)
    }

    fn edge_from(mesh: &Dcel<i64>, f: FaceId, v: VertexId) -> EdgeId {
        mesh.face_edges(f).find(|&e| mesh.origin(e) == v).unwrap()
    }

    #[test]
    fn test_isolated_edge_is_valid() {
        let mut mesh: Dcel<i64> = Dcel::new();
        let a = mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1));
        let b = mesh.add_vertex(Point2::new(1, 0), VertexTag::Site(2));
        let e = mesh.create_edge_p2p(a, b, None, None);
        assert_eq!(mesh.destination(e), b);
        assert_eq!(mesh.cycle(e).count(), 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_insert_diagonal_splits_square() {
        let (mut mesh, v, f) = square();
        let from = edge_from(&mesh, f, v[0]);
        let to = edge_from(&mesh, f, v[2]);
        let (d, g) = mesh.insert_diagonal(from, to).unwrap();

        assert_eq!(mesh.origin(d), v[0]);
        assert_eq!(mesh.destination(d), v[2]);
        assert_eq!(mesh.face(d), Some(g));
        assert_eq!(mesh.face(mesh.twin(d)), Some(f));
        assert_eq!(mesh.face_edges(f).count(), 3);
        assert_eq!(mesh.face_edges(g).count(), 3);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_insert_diagonal_rejects_other_cycle() {
        let (mut mesh, v, f) = square();
        let inner = edge_from(&mesh, f, v[0]);
        let outer = mesh.twin(edge_from(&mesh, f, v[2]));
        assert!(mesh.insert_diagonal(inner, outer).is_err());
    }

    #[test]
    fn test_insert_point_in_edge() {
        let (mut mesh, v, f) = square();
        let bottom = edge_from(&mesh, f, v[0]);
        let p = mesh.add_vertex(Point2::new(2, 0), VertexTag::Site(5));
        let (ap, pb) = mesh.insert_point_in_edge(p, bottom);

        assert_eq!(mesh.origin(ap), v[0]);
        assert_eq!(mesh.destination(ap), p);
        assert_eq!(mesh.origin(pb), p);
        assert_eq!(mesh.destination(pb), v[1]);
        assert_eq!(mesh.face_edges(f).count(), 5);
        assert_eq!(mesh.cycle(mesh.twin(ap)).count(), 5);
        assert_eq!(mesh.vertex(p).degree(), 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_insert_point_recanonicalizes_chain() {
        let (mut mesh, v, f) = square();
        let top = edge_from(&mesh, f, v[2]);
        let p = mesh.add_vertex(Point2::new(2, 4), VertexTag::Site(5));
        mesh.insert_point_in_edge(p, top);
        // (0, 4) is still the greatest, (2, 4) does not beat it.
        assert_eq!(mesh.origin(mesh.chain(f)), v[3]);
    }

    #[test]
    fn test_fan_from_interior_point() {
        let mut mesh: Dcel<i64> = Dcel::new();
        let a = mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1));
        let b = mesh.add_vertex(Point2::new(6, 0), VertexTag::Site(2));
        let c = mesh.add_vertex(Point2::new(0, 6), VertexTag::Site(3));
        let f = mesh.create_polygon(&[a, b, c]).unwrap();
        let p = mesh.add_vertex(Point2::new(1, 1), VertexTag::Site(4));

        let c0 = edge_from(&mesh, f, a);
        let c1 = mesh.next(c0);
        let c2 = mesh.next(c1);
        mesh.create_edge_p2e(p, c0);
        mesh.create_edge_p2e(p, c1);
        mesh.create_edge_p2e(p, c2);
        mesh.set_face(c0, Some(f));
        let f1 = mesh.new_face(c1);
        let f2 = mesh.new_face(c2);

        for face in [f, f1, f2] {
            assert_eq!(mesh.face_edges(face).count(), 3);
            assert!(mesh.face_edges(face).any(|e| mesh.origin(e) == p));
        }
        assert_eq!(mesh.vertex(p).degree(), 3);
        assert_eq!(mesh.num_edges(), 6);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_flip_edge() {
        let (mut mesh, v, f) = square();
        let from = edge_from(&mesh, f, v[0]);
        let to = edge_from(&mesh, f, v[2]);
        let (d, g) = mesh.insert_diagonal(from, to).unwrap();

        mesh.flip_edge(d).unwrap();
        let ends = [mesh.origin(d), mesh.destination(d)];
        assert!(ends.contains(&v[1]) && ends.contains(&v[3]));
        assert_eq!(mesh.face_edges(f).count(), 3);
        assert_eq!(mesh.face_edges(g).count(), 3);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.validate().is_ok());

        // Flipping back restores the first diagonal.
        mesh.flip_edge(d).unwrap();
        let ends = [mesh.origin(d), mesh.destination(d)];
        assert!(ends.contains(&v[0]) && ends.contains(&v[2]));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_flip_hull_edge_fails() {
        let (mut mesh, v, f) = square();
        let e = edge_from(&mesh, f, v[0]);
        assert!(mesh.flip_edge(e).is_err());
    }

    #[test]
    fn test_remove_interior_vertex_merges_faces() {
        let mut mesh: Dcel<i64> = Dcel::new();
        let a = mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1));
        let b = mesh.add_vertex(Point2::new(6, 0), VertexTag::Site(2));
        let c = mesh.add_vertex(Point2::new(0, 6), VertexTag::Site(3));
        let f = mesh.create_polygon(&[a, b, c]).unwrap();
        let p = mesh.add_vertex(Point2::new(1, 1), VertexTag::Synthetic(0));
        let c0 = edge_from(&mesh, f, a);
        let (c1, c2) = (mesh.next(c0), mesh.next(mesh.next(c0)));
        mesh.create_edge_p2e(p, c0);
        mesh.create_edge_p2e(p, c1);
        mesh.create_edge_p2e(p, c2);
        mesh.set_face(c0, Some(f));
        mesh.new_face(c1);
        mesh.new_face(c2);

        assert_eq!(mesh.remove_vertex(p), 3);
        assert!(mesh.vertex(p).is_removed());
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        let survivor = mesh.faces().next().unwrap();
        assert_eq!(mesh.face_edges(survivor).count(), 3);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_remove_hull_vertex_merges_into_outside() {
        let (mut mesh, v, f) = square();
        let from = edge_from(&mesh, f, v[0]);
        let to = edge_from(&mesh, f, v[2]);
        mesh.insert_diagonal(from, to).unwrap();

        mesh.remove_vertex(v[1]);
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_remove_polygon_vertex_leaves_path() {
        let mut mesh: Dcel<i64> = Dcel::new();
        let a = mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1));
        let b = mesh.add_vertex(Point2::new(6, 0), VertexTag::Site(2));
        let c = mesh.add_vertex(Point2::new(0, 6), VertexTag::Site(3));
        mesh.create_polygon(&[a, b, c]).unwrap();

        mesh.remove_vertex(a);
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 1);
        assert!(mesh.validate().is_ok());

        mesh.remove_vertex(b);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.vertex(c).degree(), 0);
        assert!(mesh.validate().is_ok());
    }
}
