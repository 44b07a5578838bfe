//! # dlfl
//!
//! A doubly-linked face list (DLFL) kernel for interactive polygon mesh
//! editing.
//!
//! A DLFL mesh stores each face as a circular cycle of corners, with every
//! corner cross-referencing its vertex, its edge, and its neighbours in the
//! cycle. The representation stays structurally valid through every editing
//! operation, which makes it a good substrate for interactive modeling:
//! operators can be chained freely without intermediate repair passes.
//!
//! ## Features
//!
//! - **DLFL data structure**: faces as corner cycles with type-safe IDs that
//!   are never reused
//! - **Topology operators**: edge insertion and deletion (exact inverses),
//!   edge collapse, edge splitting, isolated vertex handling
//! - **Face extrusion**: cubical, Doo-Sabin, dodecahedral, icosahedral,
//!   octahedral, stellate, and double-stellate strategies
//! - **Subdivision**: twenty-two whole-mesh schemes plus local single-face
//!   subdivision
//! - **Dual meshes**: centroid- or area-weighted dual construction
//!
//! ## Quick Start
//!
//! ```
//! use dlfl::prelude::*;
//! use nalgebra::Point3;
//!
//! // Build a tetrahedron.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![
//!     vec![0, 2, 1], // bottom
//!     vec![0, 1, 3], // front
//!     vec![1, 2, 3], // right
//!     vec![2, 0, 3], // left
//! ];
//! let mut mesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 4);
//!
//! // Smooth it once with Catmull-Clark.
//! subdivide(&mut mesh, &SubdivisionScheme::CatmullClark).unwrap();
//! assert_eq!(mesh.num_faces(), 12);
//!
//! // Every face is now a quad.
//! assert!(mesh.faces().all(|(_, face)| face.size == 4));
//! ```
//!
//! ## Editing Topology
//!
//! The primitive operators work on faces and vertices by ID and keep the
//! mesh valid at every step:
//!
//! ```
//! use dlfl::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(1.0, 1.0, 0.0),
//! #     Point3::new(0.0, 1.0, 0.0),
//! # ];
//! # let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]];
//! # let mut mesh = build_from_polygons(&vertices, &faces).unwrap();
//! // Split a quad into two triangles with a diagonal.
//! let face = mesh.face_ids().next().unwrap();
//! let corners = mesh.vertex_walk(face).unwrap();
//! insert_edge(&mut mesh, face, corners[0], face, corners[2]).unwrap();
//! assert_eq!(mesh.num_faces(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod mesh;

pub use algo::{
    collapse_edge, create_dual, create_vertex, delete_edge, extrude_face, extrude_face_by_name,
    insert_edge, remove_vertex, subdivide, subdivide_by_name, subdivide_edge, subdivide_edge_n,
    subdivide_face, ExtrudeKind, ExtrudeOptions, SubdivisionScheme,
};
pub use error::{MeshError, Result};
pub use mesh::{build_from_polygons, CornerId, EdgeId, FaceId, Mesh, Scope, VertexId};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use dlfl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        collapse_edge, create_dual, create_vertex, delete_edge, extrude_face,
        extrude_face_by_name, insert_edge, remove_vertex, subdivide, subdivide_by_name,
        subdivide_edge, subdivide_edge_n, subdivide_face, ExtrudeKind, ExtrudeOptions,
        SubdivisionScheme,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, Corner, CornerId, Edge, EdgeId, Face, FaceId, Mesh, Scope, Vertex,
        VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    fn tetrahedron() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![
            vec![0, 2, 1], // bottom
            vec![0, 1, 3], // front
            vec![1, 2, 3], // right
            vec![2, 0, 3], // left
        ];
        build_from_polygons(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_tetrahedron() {
        let mesh = tetrahedron();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.num_faces(), 4);
        // 4 faces * 3 corners.
        assert_eq!(mesh.num_corners(), 12);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_editing_pipeline_keeps_mesh_valid() {
        let mut mesh = tetrahedron();

        let face = mesh.face_ids().next().unwrap();
        extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &ExtrudeOptions::default()).unwrap();
        assert!(mesh.is_valid());

        subdivide(&mut mesh, &SubdivisionScheme::DooSabin { check: true }).unwrap();
        assert!(mesh.is_valid());

        create_dual(&mut mesh, false).unwrap();
        assert!(mesh.is_valid());

        let euler = mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
        assert_eq!(euler, 2);
    }
}
