//! Primitive topology operators: the edge/vertex editing core.
//!
//! Everything here mutates one [`Mesh`] and upholds the container invariants:
//! operators validate before touching anything, so an error always leaves the
//! mesh unchanged, and every successful mutation clears the selection sets.
//!
//! The operators come in inverse pairs. `insert_edge` between corners of the
//! same face splits it in two; between corners of different faces it merges
//! them into one. `delete_edge` reverses both: an edge whose two sides sit in
//! different faces merges them, an edge appearing twice in one face splits
//! it. A boundary arc that empties out degenerates to a *point sphere* — the
//! single-corner face that anchors an isolated vertex — and `insert_edge`
//! consumes point spheres symmetrically, so edge chains can be grown from
//! isolated vertices and shrunk back down to them.

use tracing::debug;

use crate::error::{MeshError, Result};
use crate::geometry;
use crate::mesh::{CornerId, EdgeId, FaceId, Mesh, VertexId};

/// Walk the cycle starting at `start`, rebinding every corner to `face` and
/// refreshing the face's anchor and size.
fn rebind_cycle(mesh: &mut Mesh, start: CornerId, face: FaceId) -> Result<()> {
    let limit = mesh.num_corners();
    let mut ids = Vec::new();
    let mut c = start;
    loop {
        ids.push(c);
        c = mesh.corner(c)?.next;
        if c == start {
            break;
        }
        if ids.len() > limit {
            return Err(MeshError::topology("corner cycle does not close"));
        }
    }
    for &id in &ids {
        mesh.corner_mut(id)?.face = face;
    }
    let f = mesh.face_mut(face)?;
    f.anchor = start;
    f.size = ids.len();
    Ok(())
}

/// Replace `face`'s boundary with a fresh point sphere at `vertex`.
fn make_point_sphere(mesh: &mut Mesh, face: FaceId, vertex: VertexId) -> Result<CornerId> {
    let s = mesh.new_corner(face, vertex);
    mesh.link(s, s);
    let f = mesh.face_mut(face)?;
    f.anchor = s;
    f.size = 1;
    Ok(s)
}

/// Insert a new edge from the corner of `face_a` at `vert_a` to the corner of
/// `face_b` at `vert_b`.
///
/// Cofacial (same face): the face is split in two along the new edge.
/// Otherwise the two faces are merged into one; a point-sphere face is
/// consumed by reusing its sole corner as the edge side. Returns the new
/// edge's ID. Clears selection.
pub fn insert_edge(
    mesh: &mut Mesh,
    face_a: FaceId,
    vert_a: VertexId,
    face_b: FaceId,
    vert_b: VertexId,
) -> Result<EdgeId> {
    let ca = mesh.find_corner(face_a, vert_a)?;
    let cb = mesh.find_corner(face_b, vert_b)?;
    debug!(?face_a, ?vert_a, ?face_b, ?vert_b, "insert edge");

    let eid = if face_a == face_b {
        if ca == cb {
            return Err(MeshError::topology(
                "cannot insert an edge from a corner to itself",
            ));
        }
        // Split: one side keeps face_a, the other gets a new face.
        let pa = mesh.corner(ca)?.prev;
        let pb = mesh.corner(cb)?.prev;

        let c1 = mesh.new_corner(face_a, vert_a);
        let new_face = mesh.new_face();
        let c2 = mesh.new_corner(new_face, vert_b);

        let eid = mesh.new_edge(c1);
        mesh.edge_mut(eid)?.side_b = c2;
        mesh.corner_mut(c1)?.edge = eid;
        mesh.corner_mut(c2)?.edge = eid;

        // Side 1: c1(va) -> cb(vb) ... pa -> c1
        mesh.link(pa, c1);
        mesh.link(c1, cb);
        // Side 2: c2(vb) -> ca(va) ... pb -> c2
        mesh.link(pb, c2);
        mesh.link(c2, ca);

        rebind_cycle(mesh, c1, face_a)?;
        rebind_cycle(mesh, c2, new_face)?;
        eid
    } else {
        // Merge: face_b's cycle is spliced into face_a along the new edge.
        let size_a = mesh.face(face_a)?.size;
        let size_b = mesh.face(face_b)?.size;
        let pa = mesh.corner(ca)?.prev;
        let pb = mesh.corner(cb)?.prev;

        let sa = if size_a == 1 {
            ca
        } else {
            let c = mesh.new_corner(face_a, vert_a);
            mesh.link(pa, c);
            c
        };
        let sb = if size_b == 1 {
            cb
        } else {
            let c = mesh.new_corner(face_a, vert_b);
            mesh.link(pb, c);
            c
        };
        mesh.link(sa, cb);
        mesh.link(sb, ca);

        let eid = mesh.new_edge(sa);
        mesh.edge_mut(eid)?.side_b = sb;
        mesh.corner_mut(sa)?.edge = eid;
        mesh.corner_mut(sb)?.edge = eid;

        rebind_cycle(mesh, sa, face_a)?;
        mesh.retire_face(face_b);
        eid
    };

    mesh.clear_selection();
    Ok(eid)
}

/// Delete an edge, merging its two incident faces (different-face sides) or
/// splitting the face it appears in twice (same-face sides).
///
/// An emptied boundary arc leaves a point sphere behind so no vertex is
/// orphaned. Clears selection.
pub fn delete_edge(mesh: &mut Mesh, edge: EdgeId) -> Result<()> {
    let e = *mesh.edge(edge)?;
    debug!(?edge, "delete edge");

    let c1 = e.side_a;
    let c2 = e.side_b;

    if !c2.is_valid() {
        // Open-boundary edge: unhook the single side.
        let corner = *mesh.corner(c1)?;
        let f = corner.face;
        if corner.next == c1 {
            return Err(MeshError::topology(
                "edge side is a self-cycled corner; structure is corrupt",
            ));
        }
        if mesh.corner(corner.next)?.next == c1 {
            // 2-gon collapses to a point sphere at the surviving corner.
            let other = corner.next;
            let v = mesh.corner(other)?.vertex;
            mesh.retire_corner(other);
            mesh.retire_corner(c1);
            make_point_sphere(mesh, f, v)?;
        } else {
            mesh.link(corner.prev, corner.next);
            mesh.retire_corner(c1);
            rebind_cycle(mesh, corner.next, f)?;
        }
        mesh.retire_edge(edge);
        mesh.clear_selection();
        return Ok(());
    }

    let f1 = mesh.corner(c1)?.face;
    let f2 = mesh.corner(c2)?.face;
    let n1 = mesh.corner(c1)?.next;
    let p1 = mesh.corner(c1)?.prev;
    let n2 = mesh.corner(c2)?.next;
    let p2 = mesh.corner(c2)?.prev;

    if f1 == f2 {
        // The edge appears twice in one face: removing it splits the cycle
        // into the two arcs between its sides.
        let v1 = mesh.corner(c1)?.vertex;
        let v2 = mesh.corner(c2)?.vertex;
        let arc1_empty = n1 == c2;
        let arc2_empty = n2 == c1;

        mesh.retire_corner(c1);
        mesh.retire_corner(c2);

        // Arc 1 keeps f1; its orphan is the far endpoint of side 1.
        if arc1_empty {
            make_point_sphere(mesh, f1, v2)?;
        } else {
            mesh.link(p2, n1);
            rebind_cycle(mesh, n1, f1)?;
        }
        // Arc 2 becomes a new face.
        let g = mesh.new_face();
        if arc2_empty {
            make_point_sphere(mesh, g, v1)?;
        } else {
            mesh.link(p1, n2);
            rebind_cycle(mesh, n2, g)?;
        }
    } else {
        if mesh.face(f1)?.size < 2 || mesh.face(f2)?.size < 2 {
            return Err(MeshError::topology(
                "edge side sits in a degenerate face; structure is corrupt",
            ));
        }
        // Merge f2 into f1 by splicing the cycles where the sides were.
        mesh.retire_corner(c1);
        mesh.retire_corner(c2);
        mesh.link(p1, n2);
        mesh.link(p2, n1);
        rebind_cycle(mesh, n1, f1)?;
        mesh.retire_face(f2);
    }

    mesh.retire_edge(edge);
    mesh.clear_selection();
    Ok(())
}

/// Collapse an edge, merging its endpoints into the first one.
///
/// The survivor moves to the edge midpoint, every corner of the retired
/// endpoint is reattached, and side faces reduced to degenerate 2-gons with
/// two distinct edges are fused into a single edge. Returns the surviving
/// vertex ID. Clears selection.
pub fn collapse_edge(mesh: &mut Mesh, edge: EdgeId) -> Result<VertexId> {
    let e = *mesh.edge(edge)?;
    let (v1, v2) = mesh.edge_endpoints(edge)?;
    if v1 == v2 {
        return Err(MeshError::topology("cannot collapse a loop edge"));
    }
    let midpoint = mesh.edge_midpoint(edge)?;
    debug!(?edge, survivor = ?v1, retired = ?v2, "collapse edge");

    // Reattach every corner of v2 to the survivor.
    let moved: Vec<CornerId> = mesh.vertex(v2)?.corners().to_vec();
    for c in &moved {
        mesh.corner_mut(*c)?.vertex = v1;
    }
    {
        let list = std::mem::take(&mut mesh.vertex_mut(v2)?.corners);
        mesh.vertex_mut(v1)?.corners.extend(list);
    }

    // Unhook the side corners from their cycles.
    let mut affected = Vec::new();
    for c in [e.side_a, e.side_b] {
        if !c.is_valid() {
            continue;
        }
        let corner = *mesh.corner(c)?;
        let f = corner.face;
        if corner.next == c {
            // Sole corner of its face: the face vanishes with it.
            mesh.retire_corner(c);
            mesh.retire_face(f);
            continue;
        }
        mesh.link(corner.prev, corner.next);
        mesh.retire_corner(c);
        let face = mesh.face_mut(f)?;
        face.size -= 1;
        if face.anchor == c {
            face.anchor = corner.next;
        }
        affected.push(f);
    }

    mesh.retire_edge(edge);
    mesh.retire_vertex(v2);
    mesh.set_position(v1, midpoint)?;

    // Fuse degenerate 2-gons left on the side faces.
    for f in affected {
        fuse_if_degenerate(mesh, f)?;
    }

    // Collapsing the last chain link leaves the survivor bare.
    if mesh.vertex(v1)?.valence() == 0 {
        let f = mesh.new_face();
        make_point_sphere(mesh, f, v1)?;
    }

    mesh.clear_selection();
    Ok(v1)
}

/// If `face` is a 2-gon whose two corners carry *distinct* edges (a sliver
/// between two neighbor faces, as opposed to a chain link where one edge
/// appears twice), fuse the edge pair into one and retire the face.
fn fuse_if_degenerate(mesh: &mut Mesh, face: FaceId) -> Result<()> {
    let Ok(f) = mesh.face(face) else {
        return Ok(()); // already retired
    };
    if f.size != 2 {
        return Ok(());
    }
    let corners = mesh.face_corners(face)?;
    let (x, y) = (corners[0], corners[1]);
    let ea = mesh.corner(x)?.edge;
    let eb = mesh.corner(y)?.edge;
    if ea == eb || !ea.is_valid() || !eb.is_valid() {
        return Ok(());
    }

    let out_a = mesh.edge(ea)?.other_side(x).filter(|c| c.is_valid());
    let out_b = mesh.edge(eb)?.other_side(y).filter(|c| c.is_valid());
    let vx = mesh.corner(x)?.vertex;
    let vy = mesh.corner(y)?.vertex;

    mesh.retire_corner(x);
    mesh.retire_corner(y);
    mesh.retire_face(face);
    mesh.retire_edge(eb);

    match (out_a, out_b) {
        (Some(a), Some(b)) => {
            let e = mesh.edge_mut(ea)?;
            e.side_a = a;
            e.side_b = b;
            mesh.corner_mut(b)?.edge = ea;
        }
        (Some(a), None) => {
            let e = mesh.edge_mut(ea)?;
            e.side_a = a;
            e.side_b = CornerId::invalid();
        }
        (None, Some(b)) => {
            let e = mesh.edge_mut(ea)?;
            e.side_a = b;
            e.side_b = CornerId::invalid();
            mesh.corner_mut(b)?.edge = ea;
        }
        (None, None) => {
            // Isolated sliver: nothing survives but its vertices.
            mesh.retire_edge(ea);
            for v in [vx, vy] {
                if mesh.contains_vertex(v) && mesh.vertex(v)?.valence() == 0 {
                    let g = mesh.new_face();
                    make_point_sphere(mesh, g, v)?;
                }
            }
        }
    }
    Ok(())
}

/// Split an edge at parameter `t` from its first endpoint.
///
/// Returns the new vertex plus the two replacement edges, first-half then
/// second-half in walk order.
fn subdivide_edge_at(
    mesh: &mut Mesh,
    edge: EdgeId,
    t: f64,
) -> Result<(VertexId, EdgeId, EdgeId)> {
    let e = *mesh.edge(edge)?;
    let (va, vb) = mesh.edge_endpoints(edge)?;
    let pos = geometry::lerp(mesh.position(va)?, mesh.position(vb)?, t);

    let vm = mesh.add_vertex(pos);
    let c1 = e.side_a;
    let f1 = mesh.corner(c1)?.face;

    // Primary side: c1 keeps direction va -> vm, a new corner carries vm -> vb.
    let cm1 = mesh.new_corner(f1, vm);
    let n1 = mesh.corner(c1)?.next;
    mesh.link(c1, cm1);
    mesh.link(cm1, n1);
    mesh.face_mut(f1)?.size += 1;

    let e1 = mesh.new_edge(c1);
    let e2 = mesh.new_edge(cm1);
    mesh.corner_mut(c1)?.edge = e1;
    mesh.corner_mut(cm1)?.edge = e2;

    if e.side_b.is_valid() {
        let c2 = e.side_b;
        let f2 = mesh.corner(c2)?.face;
        let cm2 = mesh.new_corner(f2, vm);
        let n2 = mesh.corner(c2)?.next;
        mesh.link(c2, cm2);
        mesh.link(cm2, n2);
        mesh.face_mut(f2)?.size += 1;

        mesh.corner_mut(c2)?.edge = e2;
        mesh.corner_mut(cm2)?.edge = e1;
        mesh.edge_mut(e2)?.side_b = c2;
        mesh.edge_mut(e1)?.side_b = cm2;
    }

    mesh.retire_edge(edge);
    Ok((vm, e1, e2))
}

/// Insert one new vertex at the midpoint of `edge`, replacing it with two
/// edges. Returns the new vertex ID. Clears selection.
pub fn subdivide_edge(mesh: &mut Mesh, edge: EdgeId) -> Result<VertexId> {
    debug!(?edge, "subdivide edge");
    let (vm, _, _) = subdivide_edge_at(mesh, edge, 0.5)?;
    mesh.clear_selection();
    Ok(vm)
}

/// Insert `count` evenly spaced vertices along `edge`, replacing it with a
/// chain of `count + 1` edges. Returns the new vertex IDs in walk order from
/// the edge's first endpoint. Clears selection.
pub fn subdivide_edge_n(mesh: &mut Mesh, count: usize, edge: EdgeId) -> Result<Vec<VertexId>> {
    if count == 0 {
        return Err(MeshError::invalid_param(
            "count",
            count,
            "must be at least 1",
        ));
    }
    mesh.edge(edge)?;
    debug!(?edge, count, "subdivide edge into chain");

    let mut out = Vec::with_capacity(count);
    let mut current = edge;
    for i in 0..count {
        // Cut the remaining segment so the result is evenly spaced overall.
        let t = 1.0 / (count + 1 - i) as f64;
        let (vm, _, tail) = subdivide_edge_at(mesh, current, t)?;
        out.push(vm);
        current = tail;
    }
    mesh.clear_selection();
    Ok(out)
}

/// Create an isolated vertex at the given coordinates.
///
/// The vertex is anchored by a new point-sphere face (a single self-cycled,
/// edgeless corner); the returned face ID is the handle to aim the first
/// `insert_edge` at. Clears selection.
pub fn create_vertex(mesh: &mut Mesh, x: f64, y: f64, z: f64) -> (FaceId, VertexId) {
    debug!(x, y, z, "create vertex");
    let v = mesh.add_vertex(nalgebra::Point3::new(x, y, z));
    let f = mesh.new_face();
    // Infallible: both entities were just created.
    let _ = make_point_sphere(mesh, f, v);
    mesh.clear_selection();
    (f, v)
}

/// Remove a vertex together with everything that degenerates with it.
///
/// Every incident edge is deleted (merging or splitting faces as usual)
/// until the vertex is held only by point spheres, which are then retired
/// along with the vertex itself. Clears selection.
pub fn remove_vertex(mesh: &mut Mesh, vertex: VertexId) -> Result<()> {
    mesh.vertex(vertex)?;
    debug!(?vertex, "remove vertex");

    // The incident set changes as faces merge, so rescan after each delete.
    loop {
        let incident = mesh.edge_ids().collect::<Vec<_>>().into_iter().find(|&e| {
            mesh.edge_endpoints(e)
                .map(|(a, b)| a == vertex || b == vertex)
                .unwrap_or(false)
        });
        match incident {
            Some(e) => delete_edge(mesh, e)?,
            None => break,
        }
    }

    // Only point-sphere corners can still reference the vertex.
    let corners = mesh.vertex(vertex)?.corners().to_vec();
    for c in corners {
        let face = mesh.corner(c)?.face;
        mesh.retire_corner(c);
        mesh.retire_face(face);
    }
    mesh.retire_vertex(vertex);
    mesh.clear_selection();
    Ok(())
}
