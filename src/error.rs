//! Error types for mesh construction and text I/O.

use crate::primitives::Point2;
use thiserror::Error;

/// Fatal conditions raised while building or checking a mesh.
///
/// None of these are retried: the caller gets the error instead of a
/// partially built structure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A site could not be located inside any live face.
    #[error("site {site} at ({x}, {y}) is not inside any face")]
    PointLocationFailed {
        /// Identity of the site being inserted.
        site: u32,
        x: i64,
        y: i64,
    },

    /// A site coincides with a vertex already in the mesh.
    #[error("site {site} at ({x}, {y}) duplicates an existing vertex")]
    DuplicateSite {
        /// Identity of the site being inserted.
        site: u32,
        x: i64,
        y: i64,
    },

    /// A bisector produced the wrong number of frame crossings.
    #[error("bisector clipping found {crossings} boundary crossings")]
    BoundaryClipFailed {
        /// Number of distinct crossings found.
        crossings: usize,
    },

    /// Three collinear points have no circumcenter.
    #[error("points {0}, {1} and {2} are collinear and have no circumcenter")]
    DegenerateCircumcenter(Point2<f64>, Point2<f64>, Point2<f64>),

    /// Too few sites to build anything.
    #[error("need at least 2 sites, got {count}")]
    NotEnoughSites {
        /// Number of sites supplied.
        count: usize,
    },

    /// Sites are spread too far apart for the bounding triangle to fit
    /// in `i64`.
    #[error("site extent from ({min_x}, {min_y}) to ({max_x}, {max_y}) overflows the bounding triangle")]
    CoordinateOverflow {
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
    },

    /// A structural invariant of the edge list does not hold.
    #[error("half-edge {edge}: {reason}")]
    TopologyViolation {
        /// Arena index of the offending half-edge.
        edge: usize,
        /// Which invariant failed.
        reason: &'static str,
    },
}

/// Errors raised by the line-oriented text adapters.
#[derive(Debug, Error)]
pub enum TextFormatError {
    /// Reading or writing failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input is not a site list.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        message: String,
    },

    /// The sites were read but construction failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
