//! Doubly-connected edge list.
//!
//! Every undirected edge is stored as two opposite half-edges. A half-edge
//! knows its origin, its twin, the next and previous half-edges around the
//! face on its left, and that face (`None` for the outside of the mesh).
//!
//! Vertices, half-edges and faces live in arenas owned by [`Dcel`] and are
//! addressed by index. Deleted entities are tombstoned rather than
//! compacted, so ids stay stable for the lifetime of a mesh.
//!
//! Topology is only ever changed through the edit primitives in this module
//! ([`Dcel::create_edge_p2p`], [`Dcel::create_edge_p2e`],
//! [`Dcel::insert_point_in_edge`], [`Dcel::insert_diagonal`],
//! [`Dcel::flip_edge`], [`Dcel::remove_vertex`]). Each returns the edges or
//! faces it created so callers never have to rediscover them.
//!
//! # Example
//!
//! ```
//! use dualmesh::dcel::{Dcel, VertexTag};
//! use dualmesh::Point2;
//!
//! let mut mesh = Dcel::new();
//! let a = mesh.add_vertex(Point2::new(0, 0), VertexTag::Site(1));
//! let b = mesh.add_vertex(Point2::new(4, 0), VertexTag::Site(2));
//! let c = mesh.add_vertex(Point2::new(0, 4), VertexTag::Site(3));
//!
//! let face = mesh.create_polygon(&[a, b, c]).unwrap();
//! assert_eq!(mesh.face_edges(face).count(), 3);
//! assert_eq!(mesh.num_edges(), 3);
//! assert!(mesh.validate().is_ok());
//! ```

mod edit;
mod mesh;

pub use mesh::{Cycle, Dcel};

use crate::primitives::Point2;
use std::collections::BTreeSet;
use std::fmt;

/// Index of a vertex in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Index of a half-edge in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// Index of a face in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub usize);

macro_rules! impl_index {
    ($($id:ident),*) => {$(
        impl $id {
            /// Arena position.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    )*};
}

impl_index!(VertexId, EdgeId, FaceId);

/// What a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexTag {
    /// An input site with its identity.
    Site(u32),
    /// One of the three corners of the Delaunay bounding triangle.
    Synthetic(u8),
    /// A Voronoi vertex: the circumcenter of one or more Delaunay triangles.
    Circumcenter,
    /// A corner of the Voronoi frame or a point where a bisector meets it.
    Boundary,
}

impl VertexTag {
    /// Site identity, if this is an input site.
    #[inline]
    pub fn site(self) -> Option<u32> {
        match self {
            VertexTag::Site(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_synthetic(self) -> bool {
        matches!(self, VertexTag::Synthetic(_))
    }
}

/// A mesh vertex.
///
/// Two vertices compare equal when their coordinates do; the tag and the
/// incident set are ignored.
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    pub(crate) point: Point2<T>,
    pub(crate) tag: VertexTag,
    /// Every live half-edge whose origin is this vertex.
    pub(crate) incident: BTreeSet<EdgeId>,
    pub(crate) removed: bool,
}

impl<T: Copy> Vertex<T> {
    #[inline]
    pub fn point(&self) -> Point2<T> {
        self.point
    }

    #[inline]
    pub fn tag(&self) -> VertexTag {
        self.tag
    }

    /// Outgoing half-edges in id order.
    pub fn incident(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.incident.iter().copied()
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.incident.len()
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl<T: PartialEq> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

/// One directed side of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfEdge {
    pub(crate) origin: VertexId,
    pub(crate) twin: EdgeId,
    pub(crate) next: EdgeId,
    pub(crate) prev: EdgeId,
    /// Face on the left; `None` outside the mesh.
    pub(crate) face: Option<FaceId>,
    pub(crate) removed: bool,
}

impl HalfEdge {
    #[inline]
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    #[inline]
    pub fn twin(&self) -> EdgeId {
        self.twin
    }

    #[inline]
    pub fn next(&self) -> EdgeId {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> EdgeId {
        self.prev
    }

    #[inline]
    pub fn face(&self) -> Option<FaceId> {
        self.face
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// A planar region bounded by one half-edge cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Canonical entry into the boundary: the half-edge with the greatest
    /// origin in sweep order.
    pub(crate) chain: EdgeId,
    pub(crate) removed: bool,
}

impl Face {
    #[inline]
    pub fn chain(&self) -> EdgeId {
        self.chain
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
