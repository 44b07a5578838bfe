//! Smoothing subdivision schemes: Catmull-Clark, the Doo-Sabin family,
//! Loop, Root4, and sqrt(3).

use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::geometry;

use super::soup::{vertex_rotations, EdgeTable, PolySoup};

// ==================== Catmull-Clark ====================

pub(super) fn catmull_clark(soup: &PolySoup) -> Result<PolySoup> {
    let et = EdgeTable::build(soup)?;
    let face_pts = soup.face_centroids();

    // Edge points: face-average rule inside, plain midpoints on a boundary.
    let edge_pts: Vec<Point3<f64>> = (0..et.len())
        .map(|e| {
            let (a, b) = et.ends[e];
            let m = geometry::midpoint(soup.positions[a], soup.positions[b]);
            match et.faces[e] {
                [Some(f1), Some(f2)] => Point3::from(
                    (m.coords * 2.0 + face_pts[f1].coords + face_pts[f2].coords) / 4.0,
                ),
                _ => m,
            }
        })
        .collect();

    // Per-vertex incidence, then the (F + 2R + (n-3)P) / n rule.
    let nv = soup.positions.len();
    let mut vert_edges = vec![Vec::new(); nv];
    for e in 0..et.len() {
        let (a, b) = et.ends[e];
        vert_edges[a].push(e);
        vert_edges[b].push(e);
    }
    let mut vert_faces = vec![Vec::new(); nv];
    for (f, face) in soup.faces.iter().enumerate() {
        for &v in face {
            vert_faces[v].push(f);
        }
    }

    let vertex_pts: Vec<Point3<f64>> = (0..nv)
        .into_par_iter()
        .map(|v| {
            let p = soup.positions[v];
            let boundary: Vec<usize> = vert_edges[v]
                .iter()
                .copied()
                .filter(|&e| et.faces[e][1].is_none())
                .collect();
            if !boundary.is_empty() {
                // Crease rule along the boundary curve.
                let mut sum = p.coords * 6.0;
                for &e in boundary.iter().take(2) {
                    let (a, b) = et.ends[e];
                    let other = if a == v { b } else { a };
                    sum += soup.positions[other].coords;
                }
                return Point3::from(sum / 8.0);
            }
            let n = vert_edges[v].len() as f64;
            let f_avg = geometry::centroid(
                &vert_faces[v].iter().map(|&f| face_pts[f]).collect::<Vec<_>>(),
            );
            let r_avg = geometry::centroid(
                &vert_edges[v]
                    .iter()
                    .map(|&e| {
                        let (a, b) = et.ends[e];
                        geometry::midpoint(soup.positions[a], soup.positions[b])
                    })
                    .collect::<Vec<_>>(),
            );
            Point3::from((f_avg.coords + r_avg.coords * 2.0 + p.coords * (n - 3.0)) / n)
        })
        .collect();

    // Layout: vertex points, then edge points, then face points.
    let ne = et.len();
    let mut positions = vertex_pts;
    positions.extend(edge_pts);
    positions.extend(face_pts);

    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let k = face.len();
        for i in 0..k {
            let v = face[i];
            let e_in = et.get(face[(i + k - 1) % k], v).ok_or_else(bad_edge)?;
            let e_out = et.get(v, face[(i + 1) % k]).ok_or_else(bad_edge)?;
            faces.push(vec![v, nv + e_out, nv + ne + f, nv + e_in]);
        }
    }
    Ok(PolySoup { positions, faces })
}

fn bad_edge() -> MeshError {
    MeshError::topology("edge table lookup failed during remeshing")
}

// ==================== Doo-Sabin family ====================

/// Shared combinatorics of the Doo-Sabin-like schemes: one new vertex per
/// face corner, with new faces per old face, per old edge, and per old
/// vertex. `corner_pos` gives the new position for corner `i` of face `f`.
pub(super) fn doo_sabin_core<P>(soup: &PolySoup, corner_pos: P) -> Result<PolySoup>
where
    P: Fn(&PolySoup, usize, usize) -> Point3<f64>,
{
    let et = EdgeTable::build(soup)?;
    if !et.is_closed() {
        return Err(MeshError::topology(
            "corner-point remeshing requires a closed mesh",
        ));
    }
    let rotations = vertex_rotations(soup)?;

    // Global index per corner, plus (face, vertex) -> corner lookup.
    let mut corner_base = Vec::with_capacity(soup.faces.len());
    let mut total = 0;
    for face in &soup.faces {
        corner_base.push(total);
        total += face.len();
    }
    let corner_at = |f: usize, v: usize| -> Result<usize> {
        soup.faces[f]
            .iter()
            .position(|&x| x == v)
            .map(|i| corner_base[f] + i)
            .ok_or_else(bad_edge)
    };

    let positions: Vec<Point3<f64>> = soup
        .faces
        .iter()
        .enumerate()
        .flat_map(|(f, face)| (0..face.len()).map(move |i| (f, i)))
        .map(|(f, i)| corner_pos(soup, f, i))
        .collect();

    let mut faces = Vec::new();
    // Face faces keep the old winding.
    for (f, face) in soup.faces.iter().enumerate() {
        faces.push((0..face.len()).map(|i| corner_base[f] + i).collect());
    }
    // Edge quads between the two incident faces.
    let directed: std::collections::HashMap<(usize, usize), usize> = soup
        .faces
        .iter()
        .enumerate()
        .flat_map(|(f, face)| {
            let n = face.len();
            (0..n).map(move |i| ((face[i], face[(i + 1) % n]), f))
        })
        .collect();
    for e in 0..et.len() {
        let (a, b) = et.ends[e];
        let f1 = *directed.get(&(a, b)).ok_or_else(bad_edge)?;
        let f2 = *directed.get(&(b, a)).ok_or_else(bad_edge)?;
        faces.push(vec![
            corner_at(f1, b)?,
            corner_at(f1, a)?,
            corner_at(f2, a)?,
            corner_at(f2, b)?,
        ]);
    }
    // Vertex rings in rotation order.
    for (v, ring) in rotations.iter().enumerate() {
        if ring.is_empty() {
            continue;
        }
        let mut poly = Vec::with_capacity(ring.len());
        for &(f, _) in ring {
            poly.push(corner_at(f, v)?);
        }
        faces.push(poly);
    }

    Ok(PolySoup { positions, faces })
}

/// Classic Doo-Sabin corner weights for an n-gon.
fn doo_sabin_corner(soup: &PolySoup, f: usize, i: usize) -> Point3<f64> {
    let face = &soup.faces[f];
    let n = face.len();
    let mut sum = nalgebra::Vector3::zeros();
    for (j, &v) in face.iter().enumerate() {
        let m = (j + n - i) % n;
        let alpha = if m == 0 {
            0.25 + 5.0 / (4.0 * n as f64)
        } else {
            (3.0 + 2.0 * (2.0 * std::f64::consts::PI * m as f64 / n as f64).cos())
                / (4.0 * n as f64)
        };
        sum += soup.positions[v].coords * alpha;
    }
    Point3::from(sum)
}

/// Bilinear corner rule: average of corner, adjacent edge midpoints, and the
/// face centroid.
fn bilinear_corner(soup: &PolySoup, f: usize, i: usize) -> Point3<f64> {
    let face = &soup.faces[f];
    let n = face.len();
    let p = soup.positions[face[i]];
    let prev = soup.positions[face[(i + n - 1) % n]];
    let next = soup.positions[face[(i + 1) % n]];
    let c = soup.face_centroid(f);
    Point3::from(
        (p.coords
            + geometry::midpoint(p, prev).coords
            + geometry::midpoint(p, next).coords
            + c.coords)
            / 4.0,
    )
}

pub(super) fn doo_sabin(soup: &PolySoup, check: bool) -> Result<PolySoup> {
    if check {
        let et = EdgeTable::build(soup)?;
        if !et.is_closed() {
            return Err(MeshError::topology(
                "doo-sabin check failed: mesh is not closed",
            ));
        }
    }
    doo_sabin_core(soup, doo_sabin_corner)
}

pub(super) fn doo_sabin_bc(soup: &PolySoup, check: bool) -> Result<PolySoup> {
    if check {
        let et = EdgeTable::build(soup)?;
        if !et.is_closed() {
            return Err(MeshError::topology(
                "doo-sabin check failed: mesh is not closed",
            ));
        }
    }
    doo_sabin_core(soup, bilinear_corner)
}

/// Bilinear corner rule with an inset scale about the face centroid and a
/// blend back toward the original corner.
pub(super) fn doo_sabin_bc_new(soup: &PolySoup, scale: f64, length: f64) -> Result<PolySoup> {
    doo_sabin_core(soup, move |soup, f, i| {
        let c = soup.face_centroid(f);
        let base = bilinear_corner(soup, f, i);
        let scaled = geometry::scale_about(base, c, scale);
        geometry::lerp(scaled, soup.positions[soup.faces[f][i]], length)
    })
}

/// Corner cutting: corners move halfway toward the midpoint of their two
/// adjacent boundary edge midpoints.
pub(super) fn corner_cut(soup: &PolySoup, offset: f64) -> Result<PolySoup> {
    doo_sabin_core(soup, move |soup, f, i| {
        let face = &soup.faces[f];
        let n = face.len();
        let p = soup.positions[face[i]];
        let m_prev = geometry::midpoint(p, soup.positions[face[(i + n - 1) % n]]);
        let m_next = geometry::midpoint(p, soup.positions[face[(i + 1) % n]]);
        geometry::lerp(p, geometry::midpoint(m_prev, m_next), offset)
    })
}

// ==================== Loop ====================

pub(super) fn loop_scheme(soup: &PolySoup) -> Result<PolySoup> {
    let tri = if soup.is_triangulated() {
        soup.clone()
    } else {
        soup.triangulated()
    };
    let et = EdgeTable::build(&tri)?;
    let nv = tri.positions.len();

    // Edge points: 3/8 ends + 1/8 wings inside, midpoint on a boundary.
    let edge_pts: Vec<Point3<f64>> = (0..et.len())
        .map(|e| {
            let (a, b) = et.ends[e];
            match et.faces[e] {
                [Some(f1), Some(f2)] => {
                    let wing = |f: usize| {
                        tri.faces[f]
                            .iter()
                            .copied()
                            .find(|&v| v != a && v != b)
                            .unwrap_or(a)
                    };
                    let (c, d) = (wing(f1), wing(f2));
                    Point3::from(
                        (tri.positions[a].coords + tri.positions[b].coords) * 0.375
                            + (tri.positions[c].coords + tri.positions[d].coords) * 0.125,
                    )
                }
                _ => geometry::midpoint(tri.positions[a], tri.positions[b]),
            }
        })
        .collect();

    // Boundary neighbor pairs for the crease rule.
    let mut boundary_nbrs = vec![Vec::new(); nv];
    for e in 0..et.len() {
        if et.faces[e][1].is_none() {
            let (a, b) = et.ends[e];
            boundary_nbrs[a].push(b);
            boundary_nbrs[b].push(a);
        }
    }
    let neighbors = tri.neighbors();

    let vertex_pts: Vec<Point3<f64>> = (0..nv)
        .into_par_iter()
        .map(|v| {
            let p = tri.positions[v];
            if !boundary_nbrs[v].is_empty() {
                let mut sum = p.coords * 0.75;
                for &u in boundary_nbrs[v].iter().take(2) {
                    sum += tri.positions[u].coords * 0.125;
                }
                return Point3::from(sum);
            }
            let n = neighbors[v].len();
            if n == 0 {
                return p;
            }
            let nf = n as f64;
            let inner = 0.375 + 0.25 * (2.0 * std::f64::consts::PI / nf).cos();
            let beta = (0.625 - inner * inner) / nf;
            let mut sum = p.coords * (1.0 - nf * beta);
            for &u in &neighbors[v] {
                sum += tri.positions[u].coords * beta;
            }
            Point3::from(sum)
        })
        .collect();

    one_to_four(&tri, &et, vertex_pts, edge_pts)
}

/// Root-4 subdivision: the 1-to-4 triangle split with linear midpoints and a
/// Laplacian relaxation of the old vertices by `weight`.
pub(super) fn root4(soup: &PolySoup, weight: f64) -> Result<PolySoup> {
    let tri = if soup.is_triangulated() {
        soup.clone()
    } else {
        soup.triangulated()
    };
    let et = EdgeTable::build(&tri)?;
    let edge_pts = et.midpoints(&tri);
    let neighbors = tri.neighbors();

    let vertex_pts: Vec<Point3<f64>> = tri
        .positions
        .par_iter()
        .enumerate()
        .map(|(v, &p)| {
            if neighbors[v].is_empty() {
                return p;
            }
            let avg = geometry::centroid(
                &neighbors[v]
                    .iter()
                    .map(|&u| tri.positions[u])
                    .collect::<Vec<_>>(),
            );
            geometry::lerp(p, avg, weight)
        })
        .collect();

    one_to_four(&tri, &et, vertex_pts, edge_pts)
}

/// The common 1-to-4 split over relocated vertex and edge points.
fn one_to_four(
    tri: &PolySoup,
    et: &EdgeTable,
    vertex_pts: Vec<Point3<f64>>,
    edge_pts: Vec<Point3<f64>>,
) -> Result<PolySoup> {
    let nv = vertex_pts.len();
    let mut positions = vertex_pts;
    positions.extend(edge_pts);

    let mut faces = Vec::with_capacity(tri.faces.len() * 4);
    for face in &tri.faces {
        let (a, b, c) = (face[0], face[1], face[2]);
        let eab = nv + et.get(a, b).ok_or_else(bad_edge)?;
        let ebc = nv + et.get(b, c).ok_or_else(bad_edge)?;
        let eca = nv + et.get(c, a).ok_or_else(bad_edge)?;
        faces.push(vec![a, eab, eca]);
        faces.push(vec![b, ebc, eab]);
        faces.push(vec![c, eca, ebc]);
        faces.push(vec![eab, ebc, eca]);
    }
    Ok(PolySoup { positions, faces })
}

// ==================== sqrt(3) ====================

pub(super) fn sqrt3(soup: &PolySoup) -> Result<PolySoup> {
    let tri = if soup.is_triangulated() {
        soup.clone()
    } else {
        soup.triangulated()
    };
    let et = EdgeTable::build(&tri)?;
    let face_pts = tri.face_centroids();
    let neighbors = tri.neighbors();
    let nv = tri.positions.len();

    // Old vertices relax with the Kobbelt weight.
    let vertex_pts: Vec<Point3<f64>> = (0..nv)
        .into_par_iter()
        .map(|v| {
            let p = tri.positions[v];
            let n = neighbors[v].len();
            if n == 0 {
                return p;
            }
            let alpha = (4.0 - 2.0 * (2.0 * std::f64::consts::PI / n as f64).cos()) / 9.0;
            let avg = geometry::centroid(
                &neighbors[v]
                    .iter()
                    .map(|&u| tri.positions[u])
                    .collect::<Vec<_>>(),
            );
            geometry::lerp(p, avg, alpha)
        })
        .collect();

    let mut positions = vertex_pts;
    positions.extend(face_pts);

    let directed: std::collections::HashMap<(usize, usize), usize> = tri
        .faces
        .iter()
        .enumerate()
        .flat_map(|(f, face)| {
            let n = face.len();
            (0..n).map(move |i| ((face[i], face[(i + 1) % n]), f))
        })
        .collect();

    // Every old edge flips across the two adjoining centroids.
    let mut faces = Vec::with_capacity(2 * et.len());
    for e in 0..et.len() {
        let (a, b) = et.ends[e];
        match (directed.get(&(a, b)), directed.get(&(b, a))) {
            (Some(&fa), Some(&fb)) => {
                faces.push(vec![a, nv + fb, nv + fa]);
                faces.push(vec![b, nv + fa, nv + fb]);
            }
            (Some(&fa), None) => faces.push(vec![a, b, nv + fa]),
            (None, Some(&fb)) => faces.push(vec![b, a, nv + fb]),
            (None, None) => return Err(bad_edge()),
        }
    }
    Ok(PolySoup { positions, faces })
}
