//! Dual mesh construction.
//!
//! The dual swaps faces and vertices: one dual vertex per face (at its
//! centroid) and one dual face per vertex, tracing the faces around it in
//! rotation order. Requires a closed mesh; the result carries the same
//! orientation as the input, so taking the dual twice restores the original
//! connectivity (with centroid positions).

use nalgebra::Point3;
use tracing::debug;

use crate::error::{MeshError, Result};
use crate::geometry;
use crate::mesh::Mesh;

use super::subdivide::soup::{vertex_rotations, PolySoup};

/// Dual of a polygon soup. `accurate` places dual vertices at area-weighted
/// face centroids instead of plain vertex averages.
pub(crate) fn dual_of(soup: &PolySoup, accurate: bool) -> Result<PolySoup> {
    let rotations = vertex_rotations(soup)?;

    let positions: Vec<Point3<f64>> = (0..soup.faces.len())
        .map(|f| {
            if accurate {
                area_centroid(soup, f)
            } else {
                soup.face_centroid(f)
            }
        })
        .collect();

    let mut faces = Vec::with_capacity(soup.positions.len());
    for ring in &rotations {
        if ring.len() < 3 {
            return Err(MeshError::topology(
                "dual requires every vertex to be surrounded by at least three faces",
            ));
        }
        faces.push(ring.iter().map(|&(f, _)| f).collect());
    }
    Ok(PolySoup { positions, faces })
}

/// Area-weighted centroid over a triangle fan from the vertex average.
fn area_centroid(soup: &PolySoup, f: usize) -> Point3<f64> {
    let pts: Vec<Point3<f64>> = soup.faces[f]
        .iter()
        .map(|&v| soup.positions[v])
        .collect();
    let base = geometry::centroid(&pts);
    let mut weighted = nalgebra::Vector3::zeros();
    let mut total = 0.0;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        let area = (a - base).cross(&(b - base)).norm() / 2.0;
        let tri_centroid = (a.coords + b.coords + base.coords) / 3.0;
        weighted += tri_centroid * area;
        total += area;
    }
    if total < 1e-15 {
        return base;
    }
    Point3::from(weighted / total)
}

/// Replace the mesh with its dual. Rebuilds from scratch: all entity IDs are
/// reallocated. Clears selection.
pub fn create_dual(mesh: &mut Mesh, accurate: bool) -> Result<()> {
    debug!(accurate, "create dual");
    let soup = PolySoup::from_mesh(mesh)?;
    dual_of(&soup, accurate)?.apply_to(mesh)
}
