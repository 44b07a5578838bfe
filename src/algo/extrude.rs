//! Face extrusion strategies.
//!
//! Every strategy consumes one face and replaces it with a lifted patch of
//! new faces, locally: nothing outside the face's boundary is touched, and
//! all other entity IDs survive. Strategies that leave a cap face return its
//! ID (the cap inherits the extruded face's ID); the stellation strategies
//! consume the face entirely and return `None`.
//!
//! ```
//! use dlfl::{build_from_polygons, ExtrudeKind, ExtrudeOptions};
//! use nalgebra::Point3;
//!
//! let verts = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh = build_from_polygons(&verts, &[vec![0, 1, 2, 3]]).unwrap();
//! let face = mesh.face_ids().next().unwrap();
//!
//! let opts = ExtrudeOptions { distance: 1.0, ..Default::default() };
//! let cap = dlfl::extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &opts).unwrap();
//! assert_eq!(cap, Some(face));
//! assert_eq!(mesh.num_faces(), 5);
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use nalgebra::{Point3, Unit, Vector3};
use tracing::{debug, warn};

use crate::error::{MeshError, Result};
use crate::geometry;
use crate::mesh::{EdgeId, FaceId, Mesh, VertexId};

// ==================== Options ====================

/// Parameters shared by all extrusion strategies. Strategies that do not use
/// a field ignore it.
#[derive(Debug, Clone, Copy)]
pub struct ExtrudeOptions {
    /// Offset along the face normal, per segment run.
    pub distance: f64,
    /// Number of stacked extrusion segments.
    pub segments: usize,
    /// Rotation about the face normal per segment, in radians.
    pub twist: f64,
    /// Scale factor applied about the lifted centroid per segment.
    pub scale: f64,
    /// Dodecahedral only: prepend an aligned collar ring to each segment.
    pub hexagonalize: bool,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            distance: 2.0,
            segments: 1,
            twist: 0.0,
            scale: 1.0,
            hexagonalize: false,
        }
    }
}

/// The named extrusion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrudeKind {
    /// Straight prism walls of quads.
    Cubical,
    /// Beveled profile: two quad rings per segment.
    DooSabin,
    /// Pentagonal walls in two interleaved tiers.
    Dodecahedral,
    /// Two antiprism tiers narrowing toward a small cap.
    Icosahedral,
    /// Antiprism ring: triangulated walls against a half-step twisted cap.
    Octahedral,
    /// Pyramid on the face; no cap remains.
    Stellate,
    /// Pyramid whose side faces are themselves stellated; no cap remains.
    DoubleStellate,
}

impl ExtrudeKind {
    /// The wire name of this strategy.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cubical => "cubical",
            Self::DooSabin => "doo-sabin",
            Self::Dodecahedral => "dodeca",
            Self::Icosahedral => "icosa",
            Self::Octahedral => "octa",
            Self::Stellate => "stellate",
            Self::DoubleStellate => "double-stellate",
        }
    }
}

impl FromStr for ExtrudeKind {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cubical" => Ok(Self::Cubical),
            "doo-sabin" => Ok(Self::DooSabin),
            "dodeca" => Ok(Self::Dodecahedral),
            "icosa" => Ok(Self::Icosahedral),
            "octa" => Ok(Self::Octahedral),
            "stellate" => Ok(Self::Stellate),
            "double-stellate" => Ok(Self::DoubleStellate),
            other => Err(MeshError::invalid_param(
                "kind",
                other,
                "not a known extrusion strategy",
            )),
        }
    }
}

// ==================== Patch surgery ====================

/// A vertex slot in a replacement patch: either the i-th vertex of the old
/// boundary, or the i-th newly lifted vertex.
#[derive(Debug, Clone, Copy)]
enum PatchVert {
    Boundary(usize),
    Lifted(usize),
}

use PatchVert::{Boundary, Lifted};

/// Replace `face` with a patch of new polygons over its boundary.
///
/// Old boundary edges are reused: a patch polygon traversing boundary slot
/// `i` then `i + 1` takes over the old face's side of boundary edge `i`, so
/// neighbor faces are untouched. Every boundary edge must be covered by
/// exactly one patch polygon, in the old traversal direction. The polygon at
/// `cap` (when given) inherits the old face's ID; without a cap the old face
/// is retired.
fn apply_patch(
    mesh: &mut Mesh,
    face: FaceId,
    lifted: &[Point3<f64>],
    polys: &[Vec<PatchVert>],
    cap: Option<usize>,
) -> Result<Option<FaceId>> {
    let old_corners = mesh.face_corners(face)?;
    let k = old_corners.len();
    let mut boundary_verts = Vec::with_capacity(k);
    let mut boundary_edges = Vec::with_capacity(k);
    for &c in &old_corners {
        let corner = mesh.corner(c)?;
        boundary_verts.push(corner.vertex);
        boundary_edges.push(corner.edge);
    }

    let new_verts: Vec<VertexId> = lifted.iter().map(|&p| mesh.add_vertex(p)).collect();
    let resolve = |pv: PatchVert| -> VertexId {
        match pv {
            Boundary(i) => boundary_verts[i % k],
            Lifted(i) => new_verts[i],
        }
    };

    let mut covered = vec![false; k];
    let mut pending: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();

    for (j, poly) in polys.iter().enumerate() {
        let fid = match cap {
            Some(c) if c == j => face,
            _ => mesh.new_face(),
        };
        let n = poly.len();
        let corners: Vec<_> = poly
            .iter()
            .map(|&pv| mesh.new_corner(fid, resolve(pv)))
            .collect();
        for i in 0..n {
            mesh.link(corners[i], corners[(i + 1) % n]);
        }

        for i in 0..n {
            let (a, b) = (poly[i], poly[(i + 1) % n]);
            if let (Boundary(x), Boundary(y)) = (a, b) {
                if (x + 1) % k == y % k {
                    // Take over the old face's side of boundary edge x.
                    let x = x % k;
                    if covered[x] {
                        return Err(MeshError::topology(
                            "patch covers a boundary edge twice",
                        ));
                    }
                    covered[x] = true;
                    let e = boundary_edges[x];
                    mesh.edge_mut(e)?
                        .replace_side(old_corners[x], corners[i]);
                    mesh.corner_mut(corners[i])?.edge = e;
                    continue;
                }
            }
            // Interior edge: pair up opposite traversals by endpoint key.
            let (va, vb) = (resolve(a), resolve(b));
            let key = if va < vb { (va, vb) } else { (vb, va) };
            let e = match pending.remove(&key) {
                Some(e) => {
                    mesh.edge_mut(e)?.side_b = corners[i];
                    e
                }
                None => {
                    let e = mesh.new_edge(corners[i]);
                    pending.insert(key, e);
                    e
                }
            };
            mesh.corner_mut(corners[i])?.edge = e;
        }

        let f = mesh.face_mut(fid)?;
        f.anchor = corners[0];
        f.size = n;
    }

    if covered.iter().any(|&c| !c) {
        return Err(MeshError::topology(
            "patch leaves a boundary edge uncovered",
        ));
    }
    for &c in &old_corners {
        mesh.retire_corner(c);
    }
    match cap {
        Some(_) => Ok(Some(face)),
        None => {
            mesh.retire_face(face);
            Ok(None)
        }
    }
}

// ==================== Lifting geometry ====================

struct Frame {
    normal: Unit<Vector3<f64>>,
    centroid: Point3<f64>,
}

fn face_frame(mesh: &Mesh, face: FaceId) -> Result<Frame> {
    let normal = Unit::try_new(mesh.face_normal(face, true)?, 1e-12).ok_or_else(|| {
        MeshError::topology("face has a degenerate normal and cannot be extruded")
    })?;
    Ok(Frame {
        normal,
        centroid: mesh.face_centroid(face)?,
    })
}

/// Lift a set of base points along the frame normal, then twist and scale
/// them about the lifted centroid.
fn lift(frame: &Frame, base: &[Point3<f64>], distance: f64, twist: f64, scale: f64) -> Vec<Point3<f64>> {
    let offset = frame.normal.into_inner() * distance;
    let center = frame.centroid + offset;
    base.iter()
        .map(|&p| {
            let mut q = p + offset;
            if twist != 0.0 {
                q = geometry::rotate_about_axis(q, center, frame.normal, twist);
            }
            if scale != 1.0 {
                q = geometry::scale_about(q, center, scale);
            }
            q
        })
        .collect()
}

fn edge_midpoints(base: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let k = base.len();
    (0..k)
        .map(|i| geometry::midpoint(base[i], base[(i + 1) % k]))
        .collect()
}

// ==================== Ring builders ====================

/// One straight ring of quad walls; the cap is aligned with the boundary.
fn ring_quads(mesh: &mut Mesh, face: FaceId, lifted: Vec<Point3<f64>>) -> Result<FaceId> {
    let k = lifted.len();
    let mut polys: Vec<Vec<PatchVert>> = (0..k)
        .map(|i| vec![Boundary(i), Boundary(i + 1), Lifted((i + 1) % k), Lifted(i)])
        .collect();
    polys.push((0..k).map(Lifted).collect());
    let cap = polys.len() - 1;
    apply_patch(mesh, face, &lifted, &polys, Some(cap))?;
    Ok(face)
}

/// One antiprism ring: the cap sits half an edge step twisted, with two wall
/// triangles per boundary edge.
fn ring_antiprism(mesh: &mut Mesh, face: FaceId, lifted: Vec<Point3<f64>>) -> Result<FaceId> {
    let k = lifted.len();
    let mut polys: Vec<Vec<PatchVert>> = Vec::with_capacity(2 * k + 1);
    for i in 0..k {
        polys.push(vec![Boundary(i), Boundary(i + 1), Lifted(i)]);
        polys.push(vec![Boundary(i + 1), Lifted((i + 1) % k), Lifted(i)]);
    }
    polys.push((0..k).map(Lifted).collect());
    let cap = polys.len() - 1;
    apply_patch(mesh, face, &lifted, &polys, Some(cap))?;
    Ok(face)
}

/// One dodecahedral ring: two interleaved tiers of pentagonal walls. The
/// lower tier vertices sit above the boundary vertices, the upper tier and
/// the cap above the boundary edge midpoints.
fn ring_pentagons(
    mesh: &mut Mesh,
    face: FaceId,
    opts: &ExtrudeOptions,
    frame: &Frame,
    base: &[Point3<f64>],
) -> Result<FaceId> {
    let k = base.len();
    let mids = edge_midpoints(base);
    let d = opts.distance;
    let s = opts.scale;
    let tier = |f: f64| 1.0 + (s - 1.0) * f;

    // Lifted layout: [w_0..w_k) above vertices, [x_0..x_k) and [t_0..t_k)
    // above edge midpoints.
    let mut lifted = lift(frame, base, d / 3.0, opts.twist / 3.0, tier(1.0 / 3.0));
    lifted.extend(lift(frame, &mids, 2.0 * d / 3.0, 2.0 * opts.twist / 3.0, tier(2.0 / 3.0)));
    lifted.extend(lift(frame, &mids, d, opts.twist, s));
    let w = |j: usize| Lifted(j % k);
    let x = |i: usize| Lifted(k + i % k);
    let t = |i: usize| Lifted(2 * k + i % k);

    let mut polys: Vec<Vec<PatchVert>> = Vec::with_capacity(2 * k + 1);
    for i in 0..k {
        polys.push(vec![Boundary(i), Boundary(i + 1), w(i + 1), x(i), w(i)]);
    }
    for i in 0..k {
        polys.push(vec![x(i), w(i + 1), x(i + 1), t(i + 1), t(i)]);
    }
    polys.push((0..k).map(t).collect());
    let cap = polys.len() - 1;
    apply_patch(mesh, face, &lifted, &polys, Some(cap))?;
    Ok(face)
}

/// Pyramid over the face with its apex at `distance` along the normal.
fn stellate_face(mesh: &mut Mesh, face: FaceId, distance: f64) -> Result<Vec<FaceId>> {
    let frame = face_frame(mesh, face)?;
    let k = mesh.face(face)?.size;
    if k < 3 {
        return Err(MeshError::topology("cannot stellate a degenerate face"));
    }
    let apex = frame.centroid + frame.normal.into_inner() * distance;
    let polys: Vec<Vec<PatchVert>> = (0..k)
        .map(|i| vec![Boundary(i), Boundary(i + 1), Lifted(0)])
        .collect();
    let sides: Vec<FaceId> = {
        let before: Vec<FaceId> = mesh.face_ids().collect();
        apply_patch(mesh, face, &[apex], &polys, None)?;
        mesh.face_ids().filter(|f| !before.contains(f)).collect()
    };
    Ok(sides)
}

// ==================== Strategies ====================

fn check_options(mesh: &Mesh, face: FaceId, opts: &ExtrudeOptions) -> Result<()> {
    if mesh.face(face)?.size < 3 {
        return Err(MeshError::topology(
            "only faces with at least three corners can be extruded",
        ));
    }
    if opts.segments == 0 {
        return Err(MeshError::invalid_param(
            "segments",
            opts.segments,
            "must be at least 1",
        ));
    }
    if opts.scale <= 0.0 {
        return Err(MeshError::invalid_param(
            "scale",
            opts.scale,
            "must be positive",
        ));
    }
    Ok(())
}

/// Extrude `face` with the given strategy.
///
/// Cap-producing strategies return the cap's face ID, which is the extruded
/// face's own ID: extrusion transforms the face in place and the remainder
/// of the mesh keeps its IDs. Only [`ExtrudeKind::Stellate`] and
/// [`ExtrudeKind::DoubleStellate`] consume the face and return `None`.
/// Clears selection.
pub fn extrude_face(
    mesh: &mut Mesh,
    face: FaceId,
    kind: ExtrudeKind,
    opts: &ExtrudeOptions,
) -> Result<Option<FaceId>> {
    check_options(mesh, face, opts)?;
    debug!(?face, kind = kind.name(), distance = opts.distance, segments = opts.segments, "extrude face");

    let mut cap = Some(face);
    for _ in 0..opts.segments {
        let frame = face_frame(mesh, face)?;
        let base = mesh.face_positions(face)?;
        match kind {
            ExtrudeKind::Cubical => {
                let lifted = lift(&frame, &base, opts.distance, opts.twist, opts.scale);
                ring_quads(mesh, face, lifted)?;
            }
            ExtrudeKind::DooSabin => {
                // Beveled profile: a wider half-way ring, then the full ring.
                let bevel = (1.0 + opts.scale) / 2.0;
                let lifted = lift(&frame, &base, opts.distance / 2.0, opts.twist / 2.0, bevel);
                ring_quads(mesh, face, lifted)?;
                let frame = face_frame(mesh, face)?;
                let base = mesh.face_positions(face)?;
                let lifted = lift(&frame, &base, opts.distance / 2.0, opts.twist / 2.0, opts.scale / bevel);
                ring_quads(mesh, face, lifted)?;
            }
            ExtrudeKind::Dodecahedral => {
                if opts.hexagonalize {
                    // Aligned collar before the pentagon tiers.
                    let lifted = lift(&frame, &base, opts.distance / 4.0, 0.0, 1.0);
                    ring_quads(mesh, face, lifted)?;
                    let frame = face_frame(mesh, face)?;
                    let base = mesh.face_positions(face)?;
                    let mut collar_opts = *opts;
                    collar_opts.distance = opts.distance * 3.0 / 4.0;
                    ring_pentagons(mesh, face, &collar_opts, &frame, &base)?;
                } else {
                    ring_pentagons(mesh, face, opts, &frame, &base)?;
                }
            }
            ExtrudeKind::Octahedral => {
                let mids = edge_midpoints(&base);
                let lifted = lift(&frame, &mids, opts.distance, opts.twist, opts.scale);
                ring_antiprism(mesh, face, lifted)?;
            }
            ExtrudeKind::Icosahedral => {
                let mids = edge_midpoints(&base);
                let lifted = lift(&frame, &mids, 2.0 * opts.distance / 3.0, opts.twist, opts.scale);
                ring_antiprism(mesh, face, lifted)?;
                // Second tier narrows toward the apex, leaving a small cap.
                let frame = face_frame(mesh, face)?;
                let base = mesh.face_positions(face)?;
                let mids = edge_midpoints(&base);
                let lifted = lift(&frame, &mids, opts.distance / 3.0, 0.0, 1.0 / 3.0);
                ring_antiprism(mesh, face, lifted)?;
            }
            ExtrudeKind::Stellate => {
                stellate_face(mesh, face, opts.distance)?;
                cap = None;
            }
            ExtrudeKind::DoubleStellate => {
                let sides = stellate_face(mesh, face, opts.distance)?;
                for side in sides {
                    stellate_face(mesh, side, opts.distance / 2.0)?;
                }
                cap = None;
            }
        }
        if cap.is_none() {
            break;
        }
    }

    mesh.clear_selection();
    Ok(cap)
}

/// Extrude `face` by strategy name.
///
/// An unknown name is not an error: it logs a warning and leaves the mesh
/// untouched, returning `Ok(None)`.
pub fn extrude_face_by_name(
    mesh: &mut Mesh,
    face: FaceId,
    name: &str,
    opts: &ExtrudeOptions,
) -> Result<Option<FaceId>> {
    match name.parse::<ExtrudeKind>() {
        Ok(kind) => extrude_face(mesh, face, kind, opts),
        Err(_) => {
            warn!(name, "unknown extrusion strategy; mesh left unchanged");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_fixtures::{quad_cube, tetrahedron};
    use approx::assert_relative_eq;

    fn euler(mesh: &Mesh) -> i64 {
        mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64
    }

    fn top_face(mesh: &Mesh) -> FaceId {
        // The +z cube face from the fixture.
        mesh.face_ids()
            .find(|&f| {
                mesh.face_centroid(f)
                    .map(|c| (c.z - 1.0).abs() < 1e-9)
                    .unwrap_or(false)
            })
            .unwrap()
    }

    #[test]
    fn test_cubical_extrude_offsets_cap_along_normal() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let centroid = mesh.face_centroid(face).unwrap();
        let normal = mesh.face_normal(face, true).unwrap();

        let opts = ExtrudeOptions::default();
        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &opts)
            .unwrap()
            .unwrap();

        assert_eq!(cap, face);
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_edges(), 20);
        assert_eq!(mesh.num_faces(), 10);
        assert_eq!(euler(&mesh), 2);
        assert_relative_eq!(
            mesh.face_centroid(cap).unwrap(),
            centroid + normal * opts.distance,
            epsilon = 1e-9
        );
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_cubical_extrude_with_scale_shrinks_cap() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 1.0,
            scale: 0.5,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &opts)
            .unwrap()
            .unwrap();

        let pts = mesh.face_positions(cap).unwrap();
        let c = mesh.face_centroid(cap).unwrap();
        for p in pts {
            // Unit quad corner at scale 0.5: half the original half-diagonal.
            assert_relative_eq!((p - c).norm(), 0.5 * std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        }
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_multi_segment_extrude() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 1.0,
            segments: 3,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &opts)
            .unwrap()
            .unwrap();

        // Three stacked rings of four quads each.
        assert_eq!(mesh.num_faces(), 6 + 12);
        assert_eq!(mesh.num_vertices(), 8 + 12);
        assert_eq!(euler(&mesh), 2);
        assert_relative_eq!(mesh.face_centroid(cap).unwrap().z, 4.0, epsilon = 1e-9);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_doo_sabin_extrude_reaches_full_distance() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 2.0,
            scale: 0.8,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::DooSabin, &opts)
            .unwrap()
            .unwrap();

        // Two quad rings.
        assert_eq!(mesh.num_faces(), 6 + 8);
        assert_relative_eq!(mesh.face_centroid(cap).unwrap().z, 3.0, epsilon = 1e-9);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_octahedral_extrude_of_triangle_is_antiprism() {
        let mut mesh = tetrahedron();
        let face = mesh.face_ids().next().unwrap();
        let opts = ExtrudeOptions {
            distance: 1.0,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Octahedral, &opts)
            .unwrap()
            .unwrap();

        assert_eq!(mesh.num_vertices(), 7);
        assert_eq!(mesh.num_edges(), 15);
        assert_eq!(mesh.num_faces(), 10);
        assert_eq!(euler(&mesh), 2);
        assert_eq!(mesh.face(cap).unwrap().size, 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_dodecahedral_extrude_builds_pentagon_tiers() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 1.0,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Dodecahedral, &opts)
            .unwrap()
            .unwrap();

        assert_eq!(mesh.num_vertices(), 8 + 12);
        assert_eq!(mesh.num_edges(), 12 + 20);
        assert_eq!(mesh.num_faces(), 6 + 8);
        assert_eq!(euler(&mesh), 2);
        // Eight pentagonal walls around the quad cap.
        let pentagons = mesh.faces().filter(|(_, f)| f.size == 5).count();
        assert_eq!(pentagons, 8);
        assert_eq!(mesh.face(cap).unwrap().size, 4);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_stellate_consumes_the_face() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 1.0,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Stellate, &opts).unwrap();

        assert_eq!(cap, None);
        assert!(!mesh.contains_face(face));
        assert_eq!(mesh.num_vertices(), 9);
        assert_eq!(mesh.num_edges(), 16);
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_double_stellate() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions {
            distance: 1.0,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::DoubleStellate, &opts).unwrap();

        assert_eq!(cap, None);
        assert_eq!(mesh.num_vertices(), 13);
        assert_eq!(mesh.num_edges(), 28);
        assert_eq!(mesh.num_faces(), 17);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_icosahedral_extrude_keeps_a_cap_face() {
        let mut mesh = tetrahedron();
        let face = mesh.face_ids().next().unwrap();
        let opts = ExtrudeOptions {
            distance: 1.0,
            ..Default::default()
        };

        let cap = extrude_face(&mut mesh, face, ExtrudeKind::Icosahedral, &opts)
            .unwrap()
            .expect("icosahedral extrusion reports its cap face");

        // Two antiprism tiers narrowing toward a small triangular cap.
        assert_eq!(cap, face);
        assert_eq!(mesh.num_vertices(), 10);
        assert_eq!(mesh.num_edges(), 24);
        assert_eq!(mesh.num_faces(), 16);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.faces().all(|(_, f)| f.size == 3));

        // The cap sits the full distance along the outward normal, which is
        // -z for the fixture's bottom face.
        let centroid = mesh.face_centroid(cap).unwrap();
        assert_relative_eq!(centroid.z, -1.0, epsilon = 1e-9);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_extrude_by_name() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let opts = ExtrudeOptions::default();

        let cap = extrude_face_by_name(&mut mesh, face, "cubical", &opts).unwrap();
        assert_eq!(cap, Some(face));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_unknown_strategy_name_is_a_no_op() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);
        let counts = (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces());

        let cap =
            extrude_face_by_name(&mut mesh, face, "rhombic", &ExtrudeOptions::default()).unwrap();

        assert_eq!(cap, None);
        assert_eq!(
            counts,
            (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces())
        );
    }

    #[test]
    fn test_extrude_rejects_bad_options() {
        let mut mesh = quad_cube();
        let face = top_face(&mesh);

        let zero_segments = ExtrudeOptions {
            segments: 0,
            ..Default::default()
        };
        assert!(matches!(
            extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &zero_segments),
            Err(MeshError::InvalidParameter { .. })
        ));

        let bad_scale = ExtrudeOptions {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            extrude_face(&mut mesh, face, ExtrudeKind::Cubical, &bad_scale),
            Err(MeshError::InvalidParameter { .. })
        ));
        assert!(mesh.is_valid());
    }
}
