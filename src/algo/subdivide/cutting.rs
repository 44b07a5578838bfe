//! Cutting and splitting schemes: simplest, vertex-cut, pentagon,
//! checkerboard, and linear vertex insertion.

use crate::error::Result;
use crate::geometry;

use super::soup::{vertex_rotations, EdgeTable, PolySoup};

/// Simplest (midpoint) subdivision: vertices become the edge midpoints, with
/// one face per old face and one per old vertex. On a cube this yields the
/// cuboctahedron.
pub(super) fn simplest(soup: &PolySoup) -> Result<PolySoup> {
    let et = EdgeTable::build(soup)?;
    let rotations = vertex_rotations(soup)?;
    let positions = et.midpoints(soup);

    let mut faces = Vec::with_capacity(soup.faces.len() + soup.positions.len());
    for face in &soup.faces {
        let n = face.len();
        let mut poly = Vec::with_capacity(n);
        for i in 0..n {
            poly.push(et.require(face[i], face[(i + 1) % n])?);
        }
        faces.push(poly);
    }
    for (v, ring) in rotations.iter().enumerate() {
        if ring.is_empty() {
            continue;
        }
        let mut poly = Vec::with_capacity(ring.len());
        for &(_, p) in ring {
            poly.push(et.require(v, p)?);
        }
        faces.push(poly);
    }
    Ok(PolySoup { positions, faces })
}

/// Vertex cutting (truncation): every corner of the mesh is sliced off at
/// `offset` along its edges, leaving a 2k-gon per face and a ring per vertex.
pub(super) fn vertex_cut(soup: &PolySoup, offset: f64) -> Result<PolySoup> {
    let et = EdgeTable::build(soup)?;
    let rotations = vertex_rotations(soup)?;

    // Two cut points per edge, one near each endpoint.
    let mut positions = Vec::with_capacity(2 * et.len());
    for e in 0..et.len() {
        let (a, b) = et.ends[e];
        positions.push(geometry::lerp(soup.positions[a], soup.positions[b], offset));
        positions.push(geometry::lerp(soup.positions[b], soup.positions[a], offset));
    }
    let cut_near = |e: usize, v: usize| -> usize {
        if et.ends[e].0 == v {
            2 * e
        } else {
            2 * e + 1
        }
    };

    let mut faces = Vec::with_capacity(soup.faces.len() + soup.positions.len());
    for face in &soup.faces {
        let n = face.len();
        let mut poly = Vec::with_capacity(2 * n);
        for i in 0..n {
            let (a, b) = (face[i], face[(i + 1) % n]);
            let e = et.require(a, b)?;
            poly.push(cut_near(e, a));
            poly.push(cut_near(e, b));
        }
        faces.push(poly);
    }
    for (v, ring) in rotations.iter().enumerate() {
        if ring.is_empty() {
            continue;
        }
        let mut poly = Vec::with_capacity(ring.len());
        for &(_, p) in ring {
            poly.push(cut_near(et.require(v, p)?, v));
        }
        faces.push(poly);
    }
    Ok(PolySoup { positions, faces })
}

/// Pentagonal subdivision: each face grows an inset ring at `offset` toward
/// its centroid, yielding one pentagon per corner and the inset core.
pub(super) fn pentagon(soup: &PolySoup, offset: f64) -> Result<PolySoup> {
    let et = EdgeTable::build(soup)?;
    let nv = soup.positions.len();

    let mut positions = soup.positions.clone();
    positions.extend(et.midpoints(soup));

    // Inset ring vertices are per face corner, appended as we go.
    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        let c = soup.face_centroid(f);
        let ring_base = positions.len();
        for i in 0..n {
            positions.push(geometry::lerp(soup.positions[face[i]], c, offset));
        }
        let mut mid = Vec::with_capacity(n);
        for i in 0..n {
            mid.push(nv + et.require(face[i], face[(i + 1) % n])?);
        }
        for i in 0..n {
            faces.push(vec![
                mid[(i + n - 1) % n],
                face[i],
                mid[i],
                ring_base + i,
                ring_base + (i + n - 1) % n,
            ]);
        }
        faces.push((ring_base..ring_base + n).collect());
    }
    Ok(PolySoup { positions, faces })
}

/// Checkerboard subdivision: one quad per corner against an inset 2k-gon per
/// face, alternating like a checker pattern. `thickness` is the corner quad
/// inset toward the centroid.
pub(super) fn checker(soup: &PolySoup, thickness: f64) -> Result<PolySoup> {
    let et = EdgeTable::build(soup)?;
    let nv = soup.positions.len();

    let mut positions = soup.positions.clone();
    positions.extend(et.midpoints(soup));

    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        let c = soup.face_centroid(f);
        let inset_base = positions.len();
        for i in 0..n {
            positions.push(geometry::lerp(soup.positions[face[i]], c, thickness));
        }
        let mut mid = Vec::with_capacity(n);
        for i in 0..n {
            mid.push(nv + et.require(face[i], face[(i + 1) % n])?);
        }
        let mut core = Vec::with_capacity(2 * n);
        for i in 0..n {
            faces.push(vec![mid[(i + n - 1) % n], face[i], mid[i], inset_base + i]);
            core.push(inset_base + i);
            core.push(mid[i]);
        }
        faces.push(core);
    }
    Ok(PolySoup { positions, faces })
}

/// Linear vertex insertion: a centroid vertex per face, fanned to triangles,
/// or with `use_quads` split through the edge midpoints into quads.
pub(super) fn linear_vertex(soup: &PolySoup, use_quads: bool) -> Result<PolySoup> {
    let nv = soup.positions.len();
    let centroids = soup.face_centroids();

    if !use_quads {
        let mut positions = soup.positions.clone();
        positions.extend(centroids);
        let mut faces = Vec::new();
        for (f, face) in soup.faces.iter().enumerate() {
            let n = face.len();
            for i in 0..n {
                faces.push(vec![face[i], face[(i + 1) % n], nv + f]);
            }
        }
        return Ok(PolySoup { positions, faces });
    }

    let et = EdgeTable::build(soup)?;
    let ne = et.len();
    let mut positions = soup.positions.clone();
    positions.extend(et.midpoints(soup));
    positions.extend(centroids);

    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        let mut mid = Vec::with_capacity(n);
        for i in 0..n {
            mid.push(nv + et.require(face[i], face[(i + 1) % n])?);
        }
        for i in 0..n {
            faces.push(vec![face[i], mid[i], nv + ne + f, mid[(i + n - 1) % n]]);
        }
    }
    Ok(PolySoup { positions, faces })
}
