//! Whole-mesh subdivision schemes and single-face subdivision.
//!
//! Whole-mesh schemes run as extract -> transform -> rebuild over a
//! [`PolySoup`](soup::PolySoup): the current entities are retired wholesale
//! and the result is rebuilt with fresh IDs. Triangle-only schemes (loop,
//! root4, sqrt3) fan-triangulate non-triangle faces first. Single-face
//! subdivision ([`subdivide_face`]) instead edits locally through the
//! primitive operators, preserving IDs outside the face.
//!
//! ```
//! use dlfl::SubdivisionScheme;
//! # use dlfl::build_from_polygons;
//! # use nalgebra::Point3;
//! # let verts = vec![
//! #     Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0), Point3::new(0.5, 0.5, 1.0),
//! # ];
//! # let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
//! # let mut mesh = build_from_polygons(&verts, &faces).unwrap();
//! dlfl::subdivide(&mut mesh, &SubdivisionScheme::CatmullClark).unwrap();
//! assert!(mesh.faces().all(|(_, f)| f.size == 4));
//! ```

mod composite;
mod cutting;
mod smooth;
pub(crate) mod soup;
mod stellar;

use std::str::FromStr;

use tracing::{debug, warn};

use crate::algo::edit;
use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, Mesh, VertexId};

use soup::PolySoup;

/// The named whole-mesh subdivision schemes.
///
/// Parameterized variants carry their tuning fields; [`FromStr`] yields each
/// scheme with its default parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubdivisionScheme {
    /// Loop's triangle scheme (fan-triangulates first if needed).
    Loop,
    /// Checkerboard: corner quads against inset 2k-gons.
    Checker {
        /// Inset fraction from each corner toward the face centroid.
        thickness: f64,
    },
    /// Midpoint rectification (a cube becomes a cuboctahedron).
    Simplest,
    /// Corner truncation.
    VertexCut {
        /// Cut position along each edge from its endpoints, in (0, 0.5).
        offset: f64,
    },
    /// Pentagonal subdivision with an inset ring per face.
    Pentagon {
        /// Inset fraction of the ring toward the face centroid.
        offset: f64,
    },
    /// Pentagonalization applied through the dual.
    DualPentagon {
        /// Inset fraction passed to the pentagon pass on the dual.
        scale: f64,
    },
    /// Dual of sqrt(3): hexagonal cells.
    Honeycomb,
    /// Doo-Sabin with the classic cosine corner weights.
    DooSabin {
        /// Reject an open mesh up front instead of failing mid-pass.
        check: bool,
    },
    /// Doo-Sabin with bilinear corner points.
    DooSabinBc {
        /// Reject an open mesh up front instead of failing mid-pass.
        check: bool,
    },
    /// Bilinear Doo-Sabin with an inset scale and a corner blend.
    DooSabinBcNew {
        /// Scale of each corner point about its face centroid.
        scale: f64,
        /// Blend back toward the original corner, in 0..=1.
        length: f64,
    },
    /// Corner cutting halfway toward the adjacent edge midpoints.
    CornerCut,
    /// Corner cutting with an explicit cut offset.
    ModifiedCornerCut {
        /// Fraction of the way toward the adjacent edge midpoints.
        offset: f64,
    },
    /// Linear 1-to-4 triangle split with Laplacian relaxation.
    Root4 {
        /// Relaxation of old vertices toward their neighbor average.
        weight: f64,
    },
    /// Catmull-Clark quad scheme.
    CatmullClark,
    /// Pyramid per face at a fixed apex height.
    Star {
        /// Apex height along the face normal.
        offset: f64,
    },
    /// Kobbelt sqrt(3) triangle scheme.
    Sqrt3,
    /// Pyramids whose height follows the square root of the face area.
    Fractal {
        /// Multiplier on the per-face sqrt(area) apex height.
        offset: f64,
    },
    /// Pyramid per face at half its mean edge length.
    StellateAll,
    /// Two stellation passes, the second scaled down.
    DoubleStellateAll {
        /// Apex height of the first pass.
        height: f64,
        /// Multiplier on `height` for the second pass.
        curve: f64,
    },
    /// Inset ring of quads capped with an apex fan per face.
    Dome {
        /// Apex height along the face normal.
        height: f64,
        /// Scale of the inset ring about the face centroid.
        scale: f64,
    },
    /// Dual of the omnitruncation (rectify, truncate, dualize).
    Dual1264 {
        /// Truncation offset handed to the vertex-cut pass, in (0, 0.5).
        scale: f64,
    },
    /// Centroid insertion per face.
    LinearVertex {
        /// Emit one quad per corner instead of a triangle fan.
        use_quads: bool,
    },
}

impl SubdivisionScheme {
    /// The wire name of this scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Checker { .. } => "checker",
            Self::Simplest => "simplest",
            Self::VertexCut { .. } => "vertex-cut",
            Self::Pentagon { .. } => "pentagon",
            Self::DualPentagon { .. } => "dual-pentagon",
            Self::Honeycomb => "honeycomb",
            Self::DooSabin { .. } => "doo-sabin",
            Self::DooSabinBc { .. } => "doo-sabin-bc",
            Self::DooSabinBcNew { .. } => "doo-sabin-bc-new",
            Self::CornerCut => "corner-cut",
            Self::ModifiedCornerCut { .. } => "modified-corner-cut",
            Self::Root4 { .. } => "root4",
            Self::CatmullClark => "catmull-clark",
            Self::Star { .. } => "star",
            Self::Sqrt3 => "sqrt3",
            Self::Fractal { .. } => "fractal",
            Self::StellateAll => "stellate",
            Self::DoubleStellateAll { .. } => "double-stellate",
            Self::Dome { .. } => "dome",
            Self::Dual1264 { .. } => "dual-12.6.4",
            Self::LinearVertex { .. } => "linear-vertex",
        }
    }

    /// All scheme names, in presentation order.
    pub fn all_names() -> [&'static str; 22] {
        [
            "loop",
            "checker",
            "simplest",
            "vertex-cut",
            "pentagon",
            "dual-pentagon",
            "honeycomb",
            "doo-sabin",
            "doo-sabin-bc",
            "doo-sabin-bc-new",
            "corner-cut",
            "modified-corner-cut",
            "root4",
            "catmull-clark",
            "star",
            "sqrt3",
            "fractal",
            "stellate",
            "double-stellate",
            "dome",
            "dual-12.6.4",
            "linear-vertex",
        ]
    }
}

impl FromStr for SubdivisionScheme {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "loop" => Ok(Self::Loop),
            "checker" => Ok(Self::Checker { thickness: 0.33 }),
            "simplest" => Ok(Self::Simplest),
            "vertex-cut" => Ok(Self::VertexCut { offset: 0.25 }),
            "pentagon" => Ok(Self::Pentagon { offset: 0.25 }),
            "dual-pentagon" => Ok(Self::DualPentagon { scale: 0.25 }),
            "honeycomb" => Ok(Self::Honeycomb),
            "doo-sabin" => Ok(Self::DooSabin { check: false }),
            "doo-sabin-bc" => Ok(Self::DooSabinBc { check: false }),
            "doo-sabin-bc-new" => Ok(Self::DooSabinBcNew {
                scale: 1.0,
                length: 0.0,
            }),
            "corner-cut" => Ok(Self::CornerCut),
            "modified-corner-cut" => Ok(Self::ModifiedCornerCut { offset: 0.25 }),
            "root4" => Ok(Self::Root4 { weight: 0.5 }),
            "catmull-clark" => Ok(Self::CatmullClark),
            "star" => Ok(Self::Star { offset: 0.5 }),
            "sqrt3" => Ok(Self::Sqrt3),
            "fractal" => Ok(Self::Fractal { offset: 1.0 }),
            "stellate" => Ok(Self::StellateAll),
            "double-stellate" => Ok(Self::DoubleStellateAll {
                height: 0.5,
                curve: 0.5,
            }),
            "dome" => Ok(Self::Dome {
                height: 1.0,
                scale: 0.5,
            }),
            "dual-12.6.4" => Ok(Self::Dual1264 { scale: 0.25 }),
            "linear-vertex" => Ok(Self::LinearVertex { use_quads: false }),
            other => Err(MeshError::invalid_param(
                "scheme",
                other,
                "not a known subdivision scheme",
            )),
        }
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if value <= 0.0 || value >= 1.0 {
        return Err(MeshError::invalid_param(
            name,
            value,
            "must lie strictly between 0 and 1",
        ));
    }
    Ok(())
}

fn check_half(name: &'static str, value: f64) -> Result<()> {
    if value <= 0.0 || value >= 0.5 {
        return Err(MeshError::invalid_param(
            name,
            value,
            "must lie strictly between 0 and 0.5",
        ));
    }
    Ok(())
}

fn check_params(scheme: &SubdivisionScheme) -> Result<()> {
    use SubdivisionScheme::*;
    match *scheme {
        Checker { thickness } => check_unit("thickness", thickness),
        VertexCut { offset } => check_half("offset", offset),
        Dual1264 { scale } => check_half("scale", scale),
        Pentagon { offset } | ModifiedCornerCut { offset } => check_unit("offset", offset),
        DualPentagon { scale } => check_unit("scale", scale),
        Root4 { weight } => {
            if !(0.0..=1.0).contains(&weight) {
                return Err(MeshError::invalid_param(
                    "weight",
                    weight,
                    "must lie in 0..=1",
                ));
            }
            Ok(())
        }
        DooSabinBcNew { scale, .. } | Dome { scale, .. } => {
            if scale <= 0.0 {
                return Err(MeshError::invalid_param("scale", scale, "must be positive"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Subdivide the whole mesh with `scheme`.
///
/// The mesh is rebuilt from scratch: every entity ID is reallocated and the
/// selection is cleared.
pub fn subdivide(mesh: &mut Mesh, scheme: &SubdivisionScheme) -> Result<()> {
    check_params(scheme)?;
    debug!(scheme = scheme.name(), "subdivide mesh");

    use SubdivisionScheme::*;
    let soup = PolySoup::from_mesh(mesh)?;
    let out = match *scheme {
        Loop => smooth::loop_scheme(&soup)?,
        Checker { thickness } => cutting::checker(&soup, thickness)?,
        Simplest => cutting::simplest(&soup)?,
        VertexCut { offset } => cutting::vertex_cut(&soup, offset)?,
        Pentagon { offset } => cutting::pentagon(&soup, offset)?,
        DualPentagon { scale } => composite::dual_pentagon(&soup, scale)?,
        Honeycomb => composite::honeycomb(&soup)?,
        DooSabin { check } => smooth::doo_sabin(&soup, check)?,
        DooSabinBc { check } => smooth::doo_sabin_bc(&soup, check)?,
        DooSabinBcNew { scale, length } => smooth::doo_sabin_bc_new(&soup, scale, length)?,
        CornerCut => smooth::corner_cut(&soup, 0.5)?,
        ModifiedCornerCut { offset } => smooth::corner_cut(&soup, offset)?,
        Root4 { weight } => smooth::root4(&soup, weight)?,
        CatmullClark => smooth::catmull_clark(&soup)?,
        Star { offset } => stellar::star(&soup, offset)?,
        Sqrt3 => smooth::sqrt3(&soup)?,
        Fractal { offset } => stellar::fractal(&soup, offset)?,
        StellateAll => stellar::stellate_all(&soup)?,
        DoubleStellateAll { height, curve } => stellar::double_stellate_all(&soup, height, curve)?,
        Dome { height, scale } => stellar::dome(&soup, height, scale)?,
        Dual1264 { scale } => composite::dual_1264(&soup, scale)?,
        LinearVertex { use_quads } => cutting::linear_vertex(&soup, use_quads)?,
    };
    out.apply_to(mesh)
}

/// Subdivide the whole mesh by scheme name, with default parameters.
///
/// Returns whether a scheme was applied: an unknown name logs a warning and
/// leaves the mesh untouched.
pub fn subdivide_by_name(mesh: &mut Mesh, name: &str) -> Result<bool> {
    match name.parse::<SubdivisionScheme>() {
        Ok(scheme) => {
            subdivide(mesh, &scheme)?;
            Ok(true)
        }
        Err(_) => {
            warn!(name, "unknown subdivision scheme; mesh left unchanged");
            Ok(false)
        }
    }
}

/// Subdivide one face in place, leaving the rest of the mesh untouched.
///
/// With `use_quads` the boundary edges are split at their midpoints and the
/// face becomes one quad per original corner around a centroid vertex;
/// otherwise it becomes a centroid triangle fan. Entities outside the face
/// keep their IDs. Clears selection.
pub fn subdivide_face(mesh: &mut Mesh, face: FaceId, use_quads: bool) -> Result<()> {
    if mesh.face(face)?.size < 3 {
        return Err(MeshError::topology(
            "only faces with at least three corners can be subdivided",
        ));
    }
    debug!(?face, use_quads, "subdivide face");

    let centroid = mesh.face_centroid(face)?;
    let spokes: Vec<VertexId> = if use_quads {
        let edges = mesh.edge_walk(face)?;
        let mut mids = Vec::with_capacity(edges.len());
        for e in edges {
            mids.push(edit::subdivide_edge(mesh, e)?);
        }
        mids
    } else {
        mesh.vertex_walk(face)?
    };

    let (sphere, center) = edit::create_vertex(mesh, centroid.x, centroid.y, centroid.z);
    edit::insert_edge(mesh, face, spokes[0], sphere, center)?;
    for &spoke in &spokes[1..] {
        let f = shared_face(mesh, center, spoke)?;
        edit::insert_edge(mesh, f, center, f, spoke)?;
    }
    Ok(())
}

/// The face incident on `center` that also contains `other`.
fn shared_face(mesh: &Mesh, center: VertexId, other: VertexId) -> Result<FaceId> {
    for &c in mesh.vertex(center)?.corners() {
        let f = mesh.corner(c)?.face;
        if mesh.find_corner(f, other).is_ok() {
            return Ok(f);
        }
    }
    Err(MeshError::topology(
        "fan spoke has no face in common with the center vertex",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_fixtures::{quad_cube, tetrahedron};

    fn euler(mesh: &Mesh) -> i64 {
        mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64
    }

    #[test]
    fn test_catmull_clark_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::CatmullClark).unwrap();

        // V' = V + E + F.
        assert_eq!(mesh.num_vertices(), 8 + 12 + 6);
        assert_eq!(mesh.num_faces(), 24);
        assert_eq!(mesh.num_edges(), 48);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.faces().all(|(_, f)| f.size == 4));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_loop_on_tetrahedron() {
        let mut mesh = tetrahedron();
        subdivide(&mut mesh, &SubdivisionScheme::Loop).unwrap();

        assert_eq!(mesh.num_vertices(), 4 + 6);
        assert_eq!(mesh.num_faces(), 16);
        assert_eq!(mesh.num_edges(), 24);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.faces().all(|(_, f)| f.size == 3));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_loop_triangulates_quads_first() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Loop).unwrap();
        // 12 triangles after fanning, then 1-to-4.
        assert_eq!(mesh.num_faces(), 48);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_doo_sabin_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::DooSabin { check: true }).unwrap();

        // One vertex per corner; faces per face, edge, and vertex.
        assert_eq!(mesh.num_vertices(), 24);
        assert_eq!(mesh.num_faces(), 6 + 12 + 8);
        assert_eq!(mesh.num_edges(), 48);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_simplest_on_cube_is_cuboctahedron() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Simplest).unwrap();

        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_edges(), 24);
        assert_eq!(mesh.num_faces(), 14);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_vertex_cut_on_cube_is_truncated_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::VertexCut { offset: 0.25 }).unwrap();

        assert_eq!(mesh.num_vertices(), 24);
        assert_eq!(mesh.num_edges(), 36);
        assert_eq!(mesh.num_faces(), 14);
        assert_eq!(euler(&mesh), 2);
        // Six octagons and eight triangles.
        assert_eq!(mesh.faces().filter(|(_, f)| f.size == 8).count(), 6);
        assert_eq!(mesh.faces().filter(|(_, f)| f.size == 3).count(), 8);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_pentagon_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Pentagon { offset: 0.25 }).unwrap();

        assert_eq!(mesh.num_vertices(), 8 + 12 + 24);
        assert_eq!(mesh.num_faces(), 30);
        assert_eq!(mesh.num_edges(), 72);
        assert_eq!(euler(&mesh), 2);
        assert_eq!(mesh.faces().filter(|(_, f)| f.size == 5).count(), 24);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_checker_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Checker { thickness: 0.33 }).unwrap();

        assert_eq!(mesh.num_vertices(), 44);
        assert_eq!(mesh.num_faces(), 30);
        assert_eq!(mesh.num_edges(), 72);
        assert_eq!(euler(&mesh), 2);
        assert_eq!(mesh.faces().filter(|(_, f)| f.size == 8).count(), 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_sqrt3_on_tetrahedron() {
        let mut mesh = tetrahedron();
        subdivide(&mut mesh, &SubdivisionScheme::Sqrt3).unwrap();

        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 12);
        assert_eq!(mesh.num_edges(), 18);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.faces().all(|(_, f)| f.size == 3));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_honeycomb_on_tetrahedron() {
        let mut mesh = tetrahedron();
        subdivide(&mut mesh, &SubdivisionScheme::Honeycomb).unwrap();

        // Dual of the sqrt(3) result.
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_faces(), 8);
        assert_eq!(mesh.num_edges(), 18);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_star_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Star { offset: 0.5 }).unwrap();

        assert_eq!(mesh.num_vertices(), 14);
        assert_eq!(mesh.num_faces(), 24);
        assert_eq!(mesh.num_edges(), 36);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_dome_on_cube() {
        let mut mesh = quad_cube();
        subdivide(
            &mut mesh,
            &SubdivisionScheme::Dome {
                height: 1.0,
                scale: 0.5,
            },
        )
        .unwrap();

        assert_eq!(mesh.num_vertices(), 38);
        assert_eq!(mesh.num_faces(), 48);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_dual_1264_on_cube() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::Dual1264 { scale: 0.25 }).unwrap();

        // Dual of the truncated cuboctahedron.
        assert_eq!(mesh.num_vertices(), 26);
        assert_eq!(mesh.num_edges(), 72);
        assert_eq!(mesh.num_faces(), 48);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.faces().all(|(_, f)| f.size == 3));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_linear_vertex_quads_keeps_corner_positions() {
        let mut mesh = quad_cube();
        subdivide(&mut mesh, &SubdivisionScheme::LinearVertex { use_quads: true }).unwrap();

        assert_eq!(mesh.num_vertices(), 26);
        assert_eq!(mesh.num_faces(), 24);
        assert_eq!(mesh.num_edges(), 48);
        let corner_kept = mesh
            .vertices()
            .any(|(_, v)| v.position == nalgebra::Point3::new(0.0, 0.0, 0.0));
        assert!(corner_kept);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_every_named_scheme_applies_to_a_cube() {
        for name in SubdivisionScheme::all_names() {
            let mut mesh = quad_cube();
            let applied = subdivide_by_name(&mut mesh, name).unwrap();
            assert!(applied, "scheme {name} did not apply");
            assert!(mesh.is_valid(), "scheme {name} broke the mesh");
            assert_eq!(euler(&mesh), 2, "scheme {name} changed the genus");
        }
    }

    #[test]
    fn test_unknown_scheme_name_is_a_no_op() {
        let mut mesh = quad_cube();
        let applied = subdivide_by_name(&mut mesh, "butterfly").unwrap();
        assert!(!applied);
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_faces(), 6);
    }

    #[test]
    fn test_subdivision_reallocates_ids() {
        let mut mesh = quad_cube();
        let old_vert = mesh.vertex_ids().next().unwrap();
        let old_face = mesh.face_ids().next().unwrap();

        subdivide(&mut mesh, &SubdivisionScheme::CatmullClark).unwrap();

        assert!(!mesh.contains_vertex(old_vert));
        assert!(!mesh.contains_face(old_face));
    }

    #[test]
    fn test_parameter_validation() {
        let mut mesh = quad_cube();
        assert!(matches!(
            subdivide(&mut mesh, &SubdivisionScheme::Checker { thickness: 1.5 }),
            Err(MeshError::InvalidParameter { .. })
        ));
        assert!(matches!(
            subdivide(&mut mesh, &SubdivisionScheme::VertexCut { offset: 0.5 }),
            Err(MeshError::InvalidParameter { .. })
        ));
        // Untouched on error.
        assert_eq!(mesh.num_vertices(), 8);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_subdivide_face_into_quads() {
        let mut mesh = quad_cube();
        let face = mesh.face_ids().next().unwrap();
        let keep = mesh.vertex_ids().collect::<Vec<_>>();

        subdivide_face(&mut mesh, face, true).unwrap();

        assert_eq!(mesh.num_vertices(), 8 + 4 + 1);
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(mesh.num_edges(), 20);
        assert_eq!(euler(&mesh), 2);
        // Local edit: the original vertex IDs all survive.
        assert!(keep.iter().all(|&v| mesh.contains_vertex(v)));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_subdivide_face_into_triangles() {
        let mut mesh = quad_cube();
        let face = mesh.face_ids().next().unwrap();

        subdivide_face(&mut mesh, face, false).unwrap();

        assert_eq!(mesh.num_vertices(), 9);
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(mesh.num_edges(), 16);
        assert_eq!(euler(&mesh), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_subdivide_clears_selection() {
        let mut mesh = quad_cube();
        let f = mesh.face_ids().next().unwrap();
        mesh.select_face(f).unwrap();

        subdivide(&mut mesh, &SubdivisionScheme::CatmullClark).unwrap();
        assert!(mesh.selection_is_empty());
    }
}
