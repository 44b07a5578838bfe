//! Core DLFL mesh data structures.
//!
//! The primary type is [`Mesh`], a doubly-linked face list: each face stores
//! its boundary as a circular list of corners (face-vertex pairs), and
//! vertices, edges, faces, and corners cross-reference each other by stable
//! integer IDs. The representation tolerates non-manifold intermediate
//! states (point spheres, doubled edges) so edit sequences can pass through
//! them.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe ID wrappers: [`VertexId`],
//! [`EdgeId`], [`FaceId`], and [`CornerId`]. IDs are allocated monotonically
//! per container and never reused.
//!
//! # Construction
//!
//! Meshes are built from face-vertex lists:
//!
//! ```
//! use dlfl::mesh::build_from_polygons;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2]];
//!
//! let mesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

mod builder;
mod container;
mod entities;
mod id;
mod walk;

pub use builder::build_from_polygons;
pub use container::{EdgeInfo, FaceInfo, Mesh, Selection, VertexInfo};
pub use entities::{Corner, Edge, Face, Vertex};
pub use id::{CornerId, EdgeId, FaceId, IdAllocator, VertexId};
pub use walk::Scope;

/// Shared fixture meshes for unit tests.
#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::builder::build_from_polygons;
    use super::container::Mesh;
    use nalgebra::Point3;

    /// A single unit quad in the z = 0 plane.
    pub fn single_quad() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2, 3]];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    /// Two triangles sharing the edge (0, 1).
    pub fn two_triangles() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![1, 0, 3]];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    /// A closed unit cube of six quads, outward CCW winding.
    pub fn quad_cube() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0), // 0
            Point3::new(1.0, 0.0, 0.0), // 1
            Point3::new(1.0, 1.0, 0.0), // 2
            Point3::new(0.0, 1.0, 0.0), // 3
            Point3::new(0.0, 0.0, 1.0), // 4
            Point3::new(1.0, 0.0, 1.0), // 5
            Point3::new(1.0, 1.0, 1.0), // 6
            Point3::new(0.0, 1.0, 1.0), // 7
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![2, 3, 7, 6], // back
            vec![0, 4, 7, 3], // left
            vec![1, 2, 6, 5], // right
        ];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    /// A closed tetrahedron of four triangles.
    pub fn tetrahedron() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![
            vec![0, 2, 1],
            vec![0, 1, 3],
            vec![1, 2, 3],
            vec![2, 0, 3],
        ];
        build_from_polygons(&vertices, &faces).unwrap()
    }
}
