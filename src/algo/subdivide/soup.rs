//! Flat polygon-soup staging for whole-mesh remeshing.
//!
//! Every whole-mesh scheme runs as extract -> transform -> rebuild: the mesh
//! is flattened to indexed polygons, a new soup is derived, and the mesh is
//! rebuilt from it. Rebuilding allocates fresh entity IDs throughout, which
//! is the contract for whole-mesh passes: no ID survives one.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::geometry;
use crate::mesh::Mesh;

/// Indexed polygons detached from the entity arenas.
#[derive(Debug, Clone)]
pub(crate) struct PolySoup {
    pub positions: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl PolySoup {
    /// Flatten a mesh. Fails on an empty mesh and on any face with fewer
    /// than three sides: point spheres and open chains cannot be remeshed.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self> {
        if mesh.num_faces() == 0 {
            return Err(MeshError::EmptyMesh);
        }
        let index: HashMap<_, _> = mesh
            .vertex_ids()
            .enumerate()
            .map(|(i, v)| (v, i))
            .collect();
        let positions = mesh.vertices().map(|(_, v)| v.position).collect();

        let mut faces = Vec::with_capacity(mesh.num_faces());
        for f in mesh.face_ids().collect::<Vec<_>>() {
            let walk = mesh.vertex_walk(f)?;
            if walk.len() < 3 {
                return Err(MeshError::topology(
                    "remeshing requires every face to have at least three sides",
                ));
            }
            faces.push(walk.into_iter().map(|v| index[&v]).collect());
        }
        Ok(Self { positions, faces })
    }

    /// Rebuild `mesh` from this soup, retiring every current entity.
    pub fn apply_to(self, mesh: &mut Mesh) -> Result<()> {
        mesh.rebuild_from_polygons(&self.positions, &self.faces)
    }

    pub fn face_centroid(&self, f: usize) -> Point3<f64> {
        let pts: Vec<_> = self.faces[f].iter().map(|&v| self.positions[v]).collect();
        geometry::centroid(&pts)
    }

    /// Centroids of every face, computed in parallel.
    pub fn face_centroids(&self) -> Vec<Point3<f64>> {
        self.faces
            .par_iter()
            .map(|face| {
                let pts: Vec<_> = face.iter().map(|&v| self.positions[v]).collect();
                geometry::centroid(&pts)
            })
            .collect()
    }

    /// Unit face normal, or zero for degenerate boundaries.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        let pts: Vec<_> = self.faces[f].iter().map(|&v| self.positions[v]).collect();
        geometry::newell_normal(&pts)
            .map(|u| u.into_inner())
            .unwrap_or_else(Vector3::zeros)
    }

    /// Twice-area vector of a face (Newell sum); its norm halved is the area.
    pub fn face_area(&self, f: usize) -> f64 {
        let pts: Vec<_> = self.faces[f].iter().map(|&v| self.positions[v]).collect();
        let mut sum = Vector3::zeros();
        for i in 0..pts.len() {
            let a = pts[i].coords;
            let b = pts[(i + 1) % pts.len()].coords;
            sum += a.cross(&b);
        }
        sum.norm() / 2.0
    }

    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// Fan-triangulate every non-triangle face.
    pub fn triangulated(&self) -> Self {
        let mut faces = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            if face.len() == 3 {
                faces.push(face.clone());
            } else {
                for i in 1..face.len() - 1 {
                    faces.push(vec![face[0], face[i], face[i + 1]]);
                }
            }
        }
        Self {
            positions: self.positions.clone(),
            faces,
        }
    }

    /// Deduplicated neighbor vertices per vertex.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.positions.len()];
        for face in &self.faces {
            let n = face.len();
            for i in 0..n {
                let (a, b) = (face[i], face[(i + 1) % n]);
                if !out[a].contains(&b) {
                    out[a].push(b);
                }
                if !out[b].contains(&a) {
                    out[b].push(a);
                }
            }
        }
        out
    }
}

/// Canonical unordered key for an edge.
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Index of the unique undirected edges of a soup with their incident faces.
pub(crate) struct EdgeTable {
    pub index: HashMap<(usize, usize), usize>,
    pub ends: Vec<(usize, usize)>,
    pub faces: Vec<[Option<usize>; 2]>,
}

impl EdgeTable {
    pub fn build(soup: &PolySoup) -> Result<Self> {
        let mut table = Self {
            index: HashMap::new(),
            ends: Vec::new(),
            faces: Vec::new(),
        };
        for (f, face) in soup.faces.iter().enumerate() {
            let n = face.len();
            for i in 0..n {
                let key = edge_key(face[i], face[(i + 1) % n]);
                let e = *table.index.entry(key).or_insert_with(|| {
                    table.ends.push(key);
                    table.faces.push([None, None]);
                    table.ends.len() - 1
                });
                let slots = &mut table.faces[e];
                if slots[0].is_none() {
                    slots[0] = Some(f);
                } else if slots[1].is_none() {
                    slots[1] = Some(f);
                } else {
                    return Err(MeshError::topology(format!(
                        "edge ({}, {}) borders more than two faces",
                        key.0, key.1
                    )));
                }
            }
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn get(&self, a: usize, b: usize) -> Option<usize> {
        self.index.get(&edge_key(a, b)).copied()
    }

    /// Like `get`, but a miss is a structural error.
    pub fn require(&self, a: usize, b: usize) -> Result<usize> {
        self.get(a, b).ok_or_else(|| {
            MeshError::topology("edge table lookup failed during remeshing")
        })
    }

    /// Whether every edge borders exactly two faces.
    pub fn is_closed(&self) -> bool {
        self.faces.iter().all(|f| f[1].is_some())
    }

    pub fn midpoints(&self, soup: &PolySoup) -> Vec<Point3<f64>> {
        self.ends
            .iter()
            .map(|&(a, b)| geometry::midpoint(soup.positions[a], soup.positions[b]))
            .collect()
    }
}

/// Ordered rotation of faces around each vertex.
///
/// For vertex `v`, each entry is `(face, prev)`: the face and the boundary
/// vertex preceding `v` in it. Successive faces share the edge `(v, prev)`,
/// and the order is consistent with the faces' winding, so rings built from
/// rotations come out with the same orientation everywhere. Requires a
/// closed mesh where no face visits a vertex twice; isolated vertices get an
/// empty rotation.
pub(crate) fn vertex_rotations(soup: &PolySoup) -> Result<Vec<Vec<(usize, usize)>>> {
    // Directed edge -> owning face, and (face, vertex) -> predecessor.
    let mut by_directed: HashMap<(usize, usize), usize> = HashMap::new();
    let mut prev_in: HashMap<(usize, usize), usize> = HashMap::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        for i in 0..n {
            let (a, b) = (face[i], face[(i + 1) % n]);
            if by_directed.insert((a, b), f).is_some() {
                return Err(MeshError::topology(format!(
                    "directed edge ({a}, {b}) appears twice; windings conflict"
                )));
            }
            if prev_in.insert((f, b), a).is_some() {
                return Err(MeshError::topology(format!(
                    "face {f} visits vertex {b} more than once"
                )));
            }
        }
    }

    let mut rotations = vec![Vec::new(); soup.positions.len()];
    let mut seed = vec![None; soup.positions.len()];
    for (&(f, v), &p) in &prev_in {
        if seed[v].is_none() {
            seed[v] = Some((f, p));
        }
    }

    for v in 0..soup.positions.len() {
        let Some((f0, p0)) = seed[v] else {
            continue;
        };
        let (mut f, mut p) = (f0, p0);
        loop {
            rotations[v].push((f, p));
            // Step across the incoming edge (p, v) to the neighboring face.
            let Some(&g) = by_directed.get(&(v, p)) else {
                return Err(MeshError::topology(
                    "vertex rotation requires a closed mesh",
                ));
            };
            let q = prev_in[&(g, v)];
            if (g, q) == (f0, p0) {
                break;
            }
            if rotations[v].len() > soup.faces.len() {
                return Err(MeshError::topology(
                    "vertex rotation does not close; structure is corrupt",
                ));
            }
            (f, p) = (g, q);
        }
    }
    Ok(rotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_fixtures::{quad_cube, tetrahedron, two_triangles};

    #[test]
    fn test_soup_round_trip() {
        let mut mesh = quad_cube();
        let soup = PolySoup::from_mesh(&mesh).unwrap();
        assert_eq!(soup.positions.len(), 8);
        assert_eq!(soup.faces.len(), 6);

        soup.apply_to(&mut mesh).unwrap();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_edges(), 12);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_edge_table_on_cube() {
        let soup = PolySoup::from_mesh(&quad_cube()).unwrap();
        let et = EdgeTable::build(&soup).unwrap();
        assert_eq!(et.len(), 12);
        assert!(et.is_closed());
        assert!(et.get(0, 1).is_some());
        assert!(et.get(0, 6).is_none());
    }

    #[test]
    fn test_edge_table_open_mesh() {
        let soup = PolySoup::from_mesh(&two_triangles()).unwrap();
        let et = EdgeTable::build(&soup).unwrap();
        assert_eq!(et.len(), 5);
        assert!(!et.is_closed());
    }

    #[test]
    fn test_vertex_rotations_on_cube() {
        let soup = PolySoup::from_mesh(&quad_cube()).unwrap();
        let rotations = vertex_rotations(&soup).unwrap();
        for ring in &rotations {
            assert_eq!(ring.len(), 3);
        }
    }

    #[test]
    fn test_vertex_rotations_reject_open_mesh() {
        let soup = PolySoup::from_mesh(&two_triangles()).unwrap();
        assert!(vertex_rotations(&soup).is_err());
    }

    #[test]
    fn test_triangulated() {
        let soup = PolySoup::from_mesh(&quad_cube()).unwrap();
        let tri = soup.triangulated();
        assert!(tri.is_triangulated());
        assert_eq!(tri.faces.len(), 12);

        let already = PolySoup::from_mesh(&tetrahedron()).unwrap();
        assert_eq!(already.triangulated().faces.len(), 4);
    }

    #[test]
    fn test_face_area() {
        let soup = PolySoup::from_mesh(&quad_cube()).unwrap();
        for f in 0..soup.faces.len() {
            assert!((soup.face_area(f) - 1.0).abs() < 1e-12);
        }
    }
}
