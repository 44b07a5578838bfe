//! Error types for the DLFL kernel.
//!
//! Every fallible operator validates its inputs before touching the mesh, so
//! an `Err` always means the container is unchanged.

use crate::mesh::{EdgeId, FaceId, VertexId};
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
///
/// All variants are local, recoverable conditions; the kernel never panics on
/// bad input. Unknown extrusion/subdivision *names* are deliberately not an
/// error — the name-based entry points treat them as silent no-ops so stale
/// callers stay compatible.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A referenced vertex ID does not exist in this container.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(VertexId),

    /// A referenced edge ID does not exist in this container.
    #[error("unknown edge {0:?}")]
    UnknownEdge(EdgeId),

    /// A referenced face ID does not exist in this container.
    #[error("unknown face {0:?}")]
    UnknownFace(FaceId),

    /// A (face, vertex) pair does not name a corner on that face's boundary.
    #[error("face {face:?} has no corner at vertex {vertex:?}")]
    CornerNotFound {
        /// The face that was searched.
        face: FaceId,
        /// The vertex that is not on its boundary.
        vertex: VertexId,
    },

    /// The operation's preconditions would produce an inconsistent structure.
    #[error("topology violation: {details}")]
    TopologyViolation {
        /// Description of the violated precondition.
        details: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create a topology-violation error.
    pub fn topology(details: impl Into<String>) -> Self {
        MeshError::TopologyViolation {
            details: details.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
