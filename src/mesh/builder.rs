//! Mesh construction from face-vertex lists.
//!
//! The builder turns a position list and polygon index lists into a fully
//! linked DLFL mesh: one corner per (face, boundary vertex) incidence, edges
//! paired across faces by their undirected endpoints. Whole-mesh remeshing
//! reuses the same pass through [`Mesh::rebuild_from_polygons`], which keeps
//! the container's ID allocators so retired IDs never come back.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::error::{MeshError, Result};

use super::container::Mesh;
use super::id::CornerId;

/// Build a DLFL mesh from vertices and polygon faces.
///
/// Face indices are counter-clockwise as seen from outside. Shared edges must
/// be traversed in opposite directions by their two faces; a directed edge
/// appearing twice means inconsistent winding or a non-manifold fan and is
/// rejected.
///
/// # Example
/// ```
/// use dlfl::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2]];
///
/// let mesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_faces(), 1);
/// assert_eq!(mesh.num_edges(), 3);
/// ```
pub fn build_from_polygons(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<Mesh> {
    validate_polygons(vertices, faces)?;
    let mut mesh = Mesh::new();
    populate(&mut mesh, vertices, faces);
    Ok(mesh)
}

/// Check a face-vertex list before any mutation happens.
pub(crate) fn validate_polygons(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<()> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
    for (fi, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::topology(format!(
                "face {fi} has fewer than 3 vertices"
            )));
        }
        for (i, &vi) in face.iter().enumerate() {
            if vi >= vertices.len() {
                return Err(MeshError::topology(format!(
                    "face {fi} references out-of-range vertex index {vi}"
                )));
            }
            let vj = face[(i + 1) % face.len()];
            if vi == vj {
                return Err(MeshError::topology(format!(
                    "face {fi} has a zero-length boundary edge at vertex {vi}"
                )));
            }
            let count = directed.entry((vi, vj)).or_insert(0);
            *count += 1;
            if *count > 1 {
                return Err(MeshError::topology(format!(
                    "directed edge ({vi}, {vj}) appears more than once: \
                     inconsistent winding or non-manifold input"
                )));
            }
        }
    }
    Ok(())
}

/// Create entities for a validated face-vertex list. Infallible by
/// construction: `validate_polygons` must have accepted the input.
pub(crate) fn populate(mesh: &mut Mesh, vertices: &[Point3<f64>], faces: &[Vec<usize>]) {
    let vertex_ids: Vec<_> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // First pass: faces and linked corner cycles.
    let mut face_corners: Vec<Vec<CornerId>> = Vec::with_capacity(faces.len());
    for face in faces {
        let fid = mesh.new_face();
        let corners: Vec<CornerId> = face
            .iter()
            .map(|&vi| mesh.new_corner(fid, vertex_ids[vi]))
            .collect();
        for i in 0..corners.len() {
            mesh.link(corners[i], corners[(i + 1) % corners.len()]);
        }
        if let Ok(f) = mesh.face_mut(fid) {
            f.anchor = corners[0];
            f.size = corners.len();
        }
        face_corners.push(corners);
    }

    // Second pass: pair corners into edges by undirected endpoints.
    let mut edge_map: HashMap<(usize, usize), crate::mesh::EdgeId> = HashMap::new();
    for (face, corners) in faces.iter().zip(&face_corners) {
        for (i, &c) in corners.iter().enumerate() {
            let a = face[i];
            let b = face[(i + 1) % face.len()];
            let key = if a < b { (a, b) } else { (b, a) };
            let eid = match edge_map.get(&key) {
                Some(&eid) => {
                    if let Ok(e) = mesh.edge_mut(eid) {
                        e.side_b = c;
                    }
                    eid
                }
                None => {
                    let eid = mesh.new_edge(c);
                    edge_map.insert(key, eid);
                    eid
                }
            };
            if let Ok(corner) = mesh.corner_mut(c) {
                corner.edge = eid;
            }
        }
    }
}

impl Mesh {
    /// Replace this mesh's topology in place with the given face-vertex
    /// lists, allocating fresh IDs from the existing counters.
    ///
    /// Validation happens before anything is touched; on error the mesh is
    /// unchanged. Clears the selection sets.
    pub fn rebuild_from_polygons(
        &mut self,
        vertices: &[Point3<f64>],
        faces: &[Vec<usize>],
    ) -> Result<()> {
        validate_polygons(vertices, faces)?;
        self.clear_entities();
        populate(self, vertices, faces);
        self.clear_selection();
        Ok(())
    }

    /// Extract the face-vertex representation of this mesh.
    ///
    /// Vertices come out in container order; faces with fewer than three
    /// corners (point spheres, 2-gon chain links) carry no surface and are
    /// skipped. Returns `(positions, faces)`.
    pub fn to_polygons(&self) -> Result<(Vec<Point3<f64>>, Vec<Vec<usize>>)> {
        let mut index = HashMap::with_capacity(self.num_vertices());
        let mut positions = Vec::with_capacity(self.num_vertices());
        for (vid, v) in self.vertices() {
            index.insert(vid, positions.len());
            positions.push(v.position);
        }

        let mut faces = Vec::with_capacity(self.num_faces());
        for (fid, f) in self.faces() {
            if f.size < 3 {
                continue;
            }
            let mut poly = Vec::with_capacity(f.size);
            for c in self.face_corners(fid)? {
                poly.push(index[&self.corner(c)?.vertex]);
            }
            faces.push(poly);
        }
        Ok((positions, faces))
    }
}
