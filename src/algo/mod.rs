//! Mesh editing algorithms.
//!
//! This module contains the operators that change topology, including:
//!
//! - **Edit**: edge insertion/deletion/collapse, edge splitting, isolated
//!   vertex creation and removal
//! - **Extrude**: the named face-extrusion strategies
//! - **Subdivide**: the whole-mesh subdivision schemes and single-face
//!   subdivision
//! - **Dual**: dual-mesh construction
//!
//! Every operator leaves the mesh structurally valid and clears the
//! selection when it mutates anything.

pub mod dual;
pub mod edit;
pub mod extrude;
pub mod subdivide;

pub use dual::create_dual;
pub use edit::{
    collapse_edge, create_vertex, delete_edge, insert_edge, remove_vertex, subdivide_edge,
    subdivide_edge_n,
};
pub use extrude::{extrude_face, extrude_face_by_name, ExtrudeKind, ExtrudeOptions};
pub use subdivide::{subdivide, subdivide_by_name, subdivide_face, SubdivisionScheme};
