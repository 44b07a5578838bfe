//! Entity records for the DLFL mesh.
//!
//! A DLFL (doubly-linked face list) mesh stores four cross-referencing entity
//! kinds. Every reference between entities is an ID into the owning
//! container's arenas — entities never own each other, so retiring one cannot
//! dangle a Rust reference.
//!
//! # Structure
//!
//! - Each **face** stores its boundary as a circular list of **corners**
//!   (face-vertex pairs); `size` is the corner count of that cycle.
//! - Each **corner** knows its owning face, its vertex, its `next`/`prev`
//!   corners around the face, and the boundary edge leaving it toward the
//!   next corner's vertex.
//! - Each **edge** stores its two side corners, one per incident face
//!   traversal direction. Boundary-tolerant intermediate states may leave the
//!   second side unpopulated.
//! - Each **vertex** stores the set of corners incident on it; its valence is
//!   the size of that set.

use nalgebra::Point3;

use super::id::{CornerId, EdgeId, FaceId, VertexId};

/// A vertex in the mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Corners incident on this vertex, in attachment order.
    pub(crate) corners: Vec<CornerId>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            corners: Vec::new(),
        }
    }

    /// Create a new vertex from coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// The number of distinct corners referencing this vertex.
    #[inline]
    pub fn valence(&self) -> usize {
        self.corners.len()
    }

    /// Corners incident on this vertex.
    #[inline]
    pub fn corners(&self) -> &[CornerId] {
        &self.corners
    }
}

/// A face corner: the incidence of one face with one boundary vertex.
///
/// Corners are the unit of boundary traversal. A corner with an invalid
/// `edge` and `next == prev == self` is a *point sphere*: the degenerate
/// single-corner face that anchors an isolated vertex.
#[derive(Debug, Clone, Copy)]
pub struct Corner {
    /// The face this corner belongs to.
    pub face: FaceId,

    /// The vertex at this corner.
    pub vertex: VertexId,

    /// The boundary edge from this corner's vertex to the next corner's
    /// vertex. Invalid for a point-sphere corner.
    pub edge: EdgeId,

    /// The next corner around the face boundary.
    pub next: CornerId,

    /// The previous corner around the face boundary.
    pub prev: CornerId,
}

impl Corner {
    /// Create a corner for `vertex` on `face` with no links yet.
    pub fn new(face: FaceId, vertex: VertexId) -> Self {
        Self {
            face,
            vertex,
            edge: EdgeId::invalid(),
            next: CornerId::invalid(),
            prev: CornerId::invalid(),
        }
    }
}

/// An edge in the mesh.
///
/// `side_a` is the primary side and is always populated for edges created by
/// the kernel's own operators; `side_b` is the opposite traversal direction
/// and may be invalid on meshes built from an open boundary.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// The corner where this edge starts on its primary side.
    pub side_a: CornerId,

    /// The corner where this edge starts on its opposite side.
    pub side_b: CornerId,
}

impl Edge {
    /// Create an edge with only the primary side populated.
    pub fn new(side_a: CornerId) -> Self {
        Self {
            side_a,
            side_b: CornerId::invalid(),
        }
    }

    /// Both side corners, primary first.
    #[inline]
    pub fn sides(&self) -> [CornerId; 2] {
        [self.side_a, self.side_b]
    }

    /// The side corner opposite to `corner`, if `corner` is a side of this
    /// edge.
    pub fn other_side(&self, corner: CornerId) -> Option<CornerId> {
        if corner == self.side_a {
            Some(self.side_b)
        } else if corner == self.side_b {
            Some(self.side_a)
        } else {
            None
        }
    }

    /// Replace the side slot currently holding `from` with `to`.
    pub(crate) fn replace_side(&mut self, from: CornerId, to: CornerId) {
        if self.side_a == from {
            self.side_a = to;
        } else if self.side_b == from {
            self.side_b = to;
        }
    }
}

/// A face in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// One corner on the boundary cycle; walks start here.
    pub anchor: CornerId,

    /// Number of corners in the boundary cycle.
    pub size: usize,
}

impl Face {
    /// Create a face with no boundary yet.
    pub fn new() -> Self {
        Self {
            anchor: CornerId::invalid(),
            size: 0,
        }
    }

    /// Whether this face is a point sphere (single edgeless corner).
    #[inline]
    pub fn is_point_sphere(&self) -> bool {
        self.size == 1
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_creation() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.valence(), 0);
    }

    #[test]
    fn test_edge_other_side() {
        let a = CornerId::new(1);
        let b = CornerId::new(2);
        let mut e = Edge::new(a);
        e.side_b = b;

        assert_eq!(e.other_side(a), Some(b));
        assert_eq!(e.other_side(b), Some(a));
        assert_eq!(e.other_side(CornerId::new(3)), None);
    }

    #[test]
    fn test_edge_replace_side() {
        let a = CornerId::new(1);
        let b = CornerId::new(2);
        let c = CornerId::new(3);
        let mut e = Edge::new(a);
        e.side_b = b;

        e.replace_side(a, c);
        assert_eq!(e.side_a, c);
        assert_eq!(e.side_b, b);
    }
}
