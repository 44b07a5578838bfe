//! Stellation-style schemes: star, fractal, stellate, double stellate, and
//! dome.

use crate::error::Result;
use crate::geometry;

use super::soup::PolySoup;

/// Raise a pyramid over every face, with the apex height chosen per face.
fn stellate_each<H>(soup: &PolySoup, height: H) -> PolySoup
where
    H: Fn(&PolySoup, usize) -> f64,
{
    let nv = soup.positions.len();
    let mut positions = soup.positions.clone();
    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        let apex = soup.face_centroid(f) + soup.face_normal(f) * height(soup, f);
        positions.push(apex);
        for i in 0..n {
            faces.push(vec![face[i], face[(i + 1) % n], nv + f]);
        }
    }
    PolySoup { positions, faces }
}

/// Star subdivision: pyramids with a fixed apex offset.
pub(super) fn star(soup: &PolySoup, offset: f64) -> Result<PolySoup> {
    Ok(stellate_each(soup, |_, _| offset))
}

/// Fractal subdivision: pyramids whose height scales with the square root
/// of the face area, so detail shrinks with each application.
pub(super) fn fractal(soup: &PolySoup, offset: f64) -> Result<PolySoup> {
    Ok(stellate_each(soup, |s, f| offset * s.face_area(f).sqrt()))
}

/// Stellation of every face at half its mean edge length.
pub(super) fn stellate_all(soup: &PolySoup) -> Result<PolySoup> {
    Ok(stellate_each(soup, |s, f| {
        let face = &s.faces[f];
        let n = face.len();
        let total: f64 = (0..n)
            .map(|i| (s.positions[face[(i + 1) % n]] - s.positions[face[i]]).norm())
            .sum();
        total / (2.0 * n as f64)
    }))
}

/// Two stellation passes: `height` for the first, `height * curve` for the
/// pyramids raised on the result.
pub(super) fn double_stellate_all(soup: &PolySoup, height: f64, curve: f64) -> Result<PolySoup> {
    let once = star(soup, height)?;
    star(&once, height * curve)
}

/// Dome subdivision: each face is replaced by an inset ring of quads capped
/// with an apex fan. The ring sits at half the dome height, scaled by
/// `scale` about the centroid.
pub(super) fn dome(soup: &PolySoup, height: f64, scale: f64) -> Result<PolySoup> {
    let mut positions = soup.positions.clone();
    let mut faces = Vec::new();
    for (f, face) in soup.faces.iter().enumerate() {
        let n = face.len();
        let c = soup.face_centroid(f);
        let normal = soup.face_normal(f);
        let lift = normal * (height / 2.0);

        let ring_base = positions.len();
        for &v in face {
            positions.push(geometry::scale_about(soup.positions[v], c, scale) + lift);
        }
        let apex = positions.len();
        positions.push(c + normal * height);

        for i in 0..n {
            let j = (i + 1) % n;
            faces.push(vec![face[i], face[j], ring_base + j, ring_base + i]);
            faces.push(vec![ring_base + i, ring_base + j, apex]);
        }
    }
    Ok(PolySoup {
        positions,
        faces,
    })
}
