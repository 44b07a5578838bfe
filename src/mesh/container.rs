//! The DLFL mesh container.
//!
//! A [`Mesh`] owns every entity of one editable mesh: vertices, edges, faces,
//! and corners live in per-kind arenas keyed by monotonically allocated IDs.
//! Iteration order over an arena is ID order, which equals creation order, so
//! enumeration is deterministic across identical edit histories. Retiring an
//! entity removes its key; the ID is never handed out again for the lifetime
//! of the container.
//!
//! The container also owns the three selection sets used by interactive
//! callers and the boundary-walk cursor. Every mutating operator in
//! [`crate::algo`] clears the selection sets as its final step — a mutation
//! invalidates whatever the user had picked.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::geometry;

use super::entities::{Corner, Edge, Face, Vertex};
use super::id::{CornerId, EdgeId, FaceId, IdAllocator, VertexId};

/// Summary of one vertex, as reported to inspection tooling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexInfo {
    /// The vertex ID.
    pub id: VertexId,
    /// Position in space.
    pub position: Point3<f64>,
    /// Number of corners incident on the vertex.
    pub valence: usize,
}

/// Summary of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    /// The edge ID.
    pub id: EdgeId,
    /// Midpoint of the two endpoints.
    pub midpoint: Point3<f64>,
    /// Averaged normal of the incident faces (zero if none resolve).
    pub normal: Vector3<f64>,
    /// Euclidean length.
    pub length: f64,
    /// (face, vertex) of the primary side corner.
    pub side_a: (FaceId, VertexId),
    /// (face, vertex) of the opposite side corner, if populated.
    pub side_b: Option<(FaceId, VertexId)>,
}

/// Summary of one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceInfo {
    /// The face ID.
    pub id: FaceId,
    /// Centroid of the boundary vertices.
    pub centroid: Point3<f64>,
    /// Face normal (planar-fit; zero for degenerate boundaries).
    pub normal: Vector3<f64>,
    /// Number of corners in the boundary cycle.
    pub size: usize,
}

/// Transient selection state, cleared by every mutating operator.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub(crate) faces: Vec<FaceId>,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) verts: Vec<VertexId>,
    pub(crate) corners: Vec<CornerId>,
}

impl Selection {
    fn clear(&mut self) {
        self.faces.clear();
        self.edges.clear();
        self.verts.clear();
        self.corners.clear();
    }

    fn is_empty(&self) -> bool {
        self.faces.is_empty()
            && self.edges.is_empty()
            && self.verts.is_empty()
            && self.corners.is_empty()
    }
}

/// A doubly-linked face-list mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub(crate) verts: BTreeMap<VertexId, Vertex>,
    pub(crate) edges: BTreeMap<EdgeId, Edge>,
    pub(crate) faces: BTreeMap<FaceId, Face>,
    pub(crate) corners: BTreeMap<CornerId, Corner>,

    vert_ids: IdAllocator,
    edge_ids: IdAllocator,
    face_ids: IdAllocator,
    corner_ids: IdAllocator,

    pub(crate) selection: Selection,

    /// Cursor set by `boundary_walk`; inspection state, not topology.
    pub(crate) walk_cursor: CornerId,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Counts ====================

    /// Number of live vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.verts.len()
    }

    /// Number of live edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of live faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of live corners.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    // ==================== Lookup ====================

    /// Whether `id` resolves to a live vertex.
    #[inline]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.verts.contains_key(&id)
    }

    /// Whether `id` resolves to a live edge.
    #[inline]
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Whether `id` resolves to a live face.
    #[inline]
    pub fn contains_face(&self, id: FaceId) -> bool {
        self.faces.contains_key(&id)
    }

    /// Get a vertex by ID.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.verts.get(&id).ok_or(MeshError::UnknownVertex(id))
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges.get(&id).ok_or(MeshError::UnknownEdge(id))
    }

    /// Get a face by ID.
    pub fn face(&self, id: FaceId) -> Result<&Face> {
        self.faces.get(&id).ok_or(MeshError::UnknownFace(id))
    }

    /// Get a corner by ID.
    pub fn corner(&self, id: CornerId) -> Result<&Corner> {
        self.corners
            .get(&id)
            .ok_or_else(|| MeshError::topology(format!("corner {id:?} does not resolve")))
    }

    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        self.verts.get_mut(&id).ok_or(MeshError::UnknownVertex(id))
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge> {
        self.edges.get_mut(&id).ok_or(MeshError::UnknownEdge(id))
    }

    pub(crate) fn face_mut(&mut self, id: FaceId) -> Result<&mut Face> {
        self.faces.get_mut(&id).ok_or(MeshError::UnknownFace(id))
    }

    pub(crate) fn corner_mut(&mut self, id: CornerId) -> Result<&mut Corner> {
        self.corners
            .get_mut(&id)
            .ok_or_else(|| MeshError::topology(format!("corner {id:?} does not resolve")))
    }

    // ==================== Iteration ====================

    /// All vertex IDs in container order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.verts.keys().copied()
    }

    /// All edge IDs in container order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// All face IDs in container order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys().copied()
    }

    /// All vertices with their IDs, in container order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.verts.iter().map(|(&id, v)| (id, v))
    }

    /// All faces with their IDs, in container order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces.iter().map(|(&id, f)| (id, f))
    }

    // ==================== Entity lifecycle (kernel internal) ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vert_ids.allocate());
        self.verts.insert(id, Vertex::new(position));
        id
    }

    pub(crate) fn new_edge(&mut self, side_a: CornerId) -> EdgeId {
        let id = EdgeId::new(self.edge_ids.allocate());
        self.edges.insert(id, Edge::new(side_a));
        id
    }

    pub(crate) fn new_face(&mut self) -> FaceId {
        let id = FaceId::new(self.face_ids.allocate());
        self.faces.insert(id, Face::new());
        id
    }

    /// Create a corner for `vertex` on `face` and register it with the
    /// vertex's incidence set. Links and edge are still invalid.
    pub(crate) fn new_corner(&mut self, face: FaceId, vertex: VertexId) -> CornerId {
        let id = CornerId::new(self.corner_ids.allocate());
        self.corners.insert(id, Corner::new(face, vertex));
        if let Some(v) = self.verts.get_mut(&vertex) {
            v.corners.push(id);
        }
        id
    }

    pub(crate) fn retire_vertex(&mut self, id: VertexId) {
        self.verts.remove(&id);
    }

    pub(crate) fn retire_edge(&mut self, id: EdgeId) {
        self.edges.remove(&id);
    }

    pub(crate) fn retire_face(&mut self, id: FaceId) {
        self.faces.remove(&id);
    }

    /// Retire a corner, unregistering it from its vertex's incidence set.
    pub(crate) fn retire_corner(&mut self, id: CornerId) {
        if let Some(c) = self.corners.remove(&id) {
            if let Some(v) = self.verts.get_mut(&c.vertex) {
                v.corners.retain(|&cid| cid != id);
            }
        }
    }

    /// Link two corners as consecutive in a boundary cycle.
    pub(crate) fn link(&mut self, a: CornerId, b: CornerId) {
        if let Some(c) = self.corners.get_mut(&a) {
            c.next = b;
        }
        if let Some(c) = self.corners.get_mut(&b) {
            c.prev = a;
        }
    }

    /// Drop all entities but keep the ID allocators, so rebuilt topology
    /// never reuses a retired ID. Used by whole-mesh remeshing.
    pub(crate) fn clear_entities(&mut self) {
        self.verts.clear();
        self.edges.clear();
        self.faces.clear();
        self.corners.clear();
        self.walk_cursor = CornerId::invalid();
    }

    // ==================== Boundary cycles ====================

    /// Corners of a face's boundary cycle in order, starting at the anchor.
    pub fn face_corners(&self, face: FaceId) -> Result<Vec<CornerId>> {
        let f = self.face(face)?;
        let mut out = Vec::with_capacity(f.size);
        if !f.anchor.is_valid() {
            return Ok(out);
        }
        let mut c = f.anchor;
        // Bounded by the stored size: a malformed cycle cannot loop forever.
        for _ in 0..f.size {
            out.push(c);
            c = self.corner(c)?.next;
        }
        Ok(out)
    }

    /// Find the corner of `face` at `vertex`, taking the first match in
    /// boundary order.
    pub fn find_corner(&self, face: FaceId, vertex: VertexId) -> Result<CornerId> {
        if !self.contains_vertex(vertex) {
            return Err(MeshError::UnknownVertex(vertex));
        }
        for c in self.face_corners(face)? {
            if self.corner(c)?.vertex == vertex {
                return Ok(c);
            }
        }
        Err(MeshError::CornerNotFound { face, vertex })
    }

    /// Positions of a face's boundary vertices in order.
    pub fn face_positions(&self, face: FaceId) -> Result<Vec<Point3<f64>>> {
        self.face_corners(face)?
            .into_iter()
            .map(|c| Ok(self.vertex(self.corner(c)?.vertex)?.position))
            .collect()
    }

    // ==================== Derived geometry ====================

    /// Position of a vertex.
    pub fn position(&self, v: VertexId) -> Result<Point3<f64>> {
        Ok(self.vertex(v)?.position)
    }

    /// Set the position of a vertex.
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) -> Result<()> {
        self.vertex_mut(v)?.position = pos;
        Ok(())
    }

    /// Valence (corner count) of a vertex.
    pub fn valence(&self, v: VertexId) -> Result<usize> {
        Ok(self.vertex(v)?.valence())
    }

    /// Centroid of a face's boundary vertices.
    pub fn face_centroid(&self, face: FaceId) -> Result<Point3<f64>> {
        Ok(geometry::centroid(&self.face_positions(face)?))
    }

    /// Face normal. `accurate` uses the planar-fit (Newell) normal over the
    /// whole boundary; otherwise the cross product at the first usable corner
    /// is taken. Degenerate boundaries yield the zero vector.
    pub fn face_normal(&self, face: FaceId, accurate: bool) -> Result<Vector3<f64>> {
        let pts = self.face_positions(face)?;
        let n = if accurate {
            geometry::newell_normal(&pts)
        } else {
            geometry::corner_normal(&pts)
        };
        Ok(n.map(|u| u.into_inner()).unwrap_or_else(Vector3::zeros))
    }

    /// The ordered endpoints of an edge, first endpoint from the primary
    /// side.
    pub fn edge_endpoints(&self, edge: EdgeId) -> Result<(VertexId, VertexId)> {
        let e = self.edge(edge)?;
        let side = if e.side_a.is_valid() { e.side_a } else { e.side_b };
        if !side.is_valid() {
            return Err(MeshError::topology(format!("edge {edge:?} has no sides")));
        }
        let c = self.corner(side)?;
        let d = self.corner(c.next)?;
        if side == e.side_a {
            Ok((c.vertex, d.vertex))
        } else {
            Ok((d.vertex, c.vertex))
        }
    }

    /// Midpoint of an edge.
    pub fn edge_midpoint(&self, edge: EdgeId) -> Result<Point3<f64>> {
        let (a, b) = self.edge_endpoints(edge)?;
        Ok(geometry::midpoint(self.position(a)?, self.position(b)?))
    }

    /// Length of an edge.
    pub fn edge_length(&self, edge: EdgeId) -> Result<f64> {
        let (a, b) = self.edge_endpoints(edge)?;
        Ok((self.position(b)? - self.position(a)?).norm())
    }

    /// Vector from the edge's first endpoint to its second.
    pub fn edge_vector(&self, edge: EdgeId) -> Result<Vector3<f64>> {
        let (a, b) = self.edge_endpoints(edge)?;
        Ok(self.position(b)? - self.position(a)?)
    }

    // ==================== Inspection ====================

    /// Position and valence of a vertex.
    pub fn vertex_info(&self, id: VertexId) -> Result<VertexInfo> {
        let v = self.vertex(id)?;
        Ok(VertexInfo {
            id,
            position: v.position,
            valence: v.valence(),
        })
    }

    /// Midpoint, normal, length, and side pairs of an edge.
    pub fn edge_info(&self, id: EdgeId) -> Result<EdgeInfo> {
        let e = *self.edge(id)?;
        let side_pair = |c: CornerId| -> Result<(FaceId, VertexId)> {
            let corner = self.corner(c)?;
            Ok((corner.face, corner.vertex))
        };
        let side_a = side_pair(e.side_a)?;
        let side_b = if e.side_b.is_valid() {
            Some(side_pair(e.side_b)?)
        } else {
            None
        };

        let mut normal = Vector3::zeros();
        for (f, _) in std::iter::once(side_a).chain(side_b) {
            normal += self.face_normal(f, true)?;
        }
        if let Some(unit) = nalgebra::Unit::try_new(normal, 1e-12) {
            normal = unit.into_inner();
        }

        Ok(EdgeInfo {
            id,
            midpoint: self.edge_midpoint(id)?,
            normal,
            length: self.edge_length(id)?,
            side_a,
            side_b,
        })
    }

    /// Centroid, planar-fit normal, and size of a face.
    pub fn face_info(&self, id: FaceId) -> Result<FaceInfo> {
        Ok(FaceInfo {
            id,
            centroid: self.face_centroid(id)?,
            normal: self.face_normal(id, true)?,
            size: self.face(id)?.size,
        })
    }

    // ==================== Selection ====================

    /// Mark a face as selected.
    pub fn select_face(&mut self, f: FaceId) -> Result<()> {
        self.face(f)?;
        if !self.selection.faces.contains(&f) {
            self.selection.faces.push(f);
        }
        Ok(())
    }

    /// Mark an edge as selected.
    pub fn select_edge(&mut self, e: EdgeId) -> Result<()> {
        self.edge(e)?;
        if !self.selection.edges.contains(&e) {
            self.selection.edges.push(e);
        }
        Ok(())
    }

    /// Mark a vertex as selected.
    pub fn select_vertex(&mut self, v: VertexId) -> Result<()> {
        self.vertex(v)?;
        if !self.selection.verts.contains(&v) {
            self.selection.verts.push(v);
        }
        Ok(())
    }

    /// Mark a corner as selected, by its (face, vertex) pair.
    pub fn select_corner(&mut self, face: FaceId, vertex: VertexId) -> Result<()> {
        let c = self.find_corner(face, vertex)?;
        if !self.selection.corners.contains(&c) {
            self.selection.corners.push(c);
        }
        Ok(())
    }

    /// Clear all selection sets. Called by every mutating operator.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether all selection sets are empty.
    pub fn selection_is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    // ==================== Validation ====================

    /// Check that the container satisfies the structural invariants:
    /// circular corner cycles of the recorded size, every live corner in
    /// exactly one cycle, consistent back references, and valence equal to
    /// the incidence-set size.
    ///
    /// A vertex may legitimately appear more than once on one boundary —
    /// through distinct corners — when both sides of an edge lie on the same
    /// face, as in bridge merges and edge chains grown from point spheres.
    pub fn is_valid(&self) -> bool {
        // Face cycles: strictly circular, correct size, consistent ownership,
        // and no corner shared within or across cycles.
        let mut visited: BTreeSet<CornerId> = BTreeSet::new();
        for (&fid, f) in &self.faces {
            if f.size == 0 || !f.anchor.is_valid() {
                return false;
            }
            let mut c = f.anchor;
            for step in 0..f.size {
                let Some(corner) = self.corners.get(&c) else {
                    return false;
                };
                if corner.face != fid {
                    return false;
                }
                // Returning to the anchor early means the cycle is shorter
                // than the recorded size.
                if step > 0 && c == f.anchor {
                    return false;
                }
                if !visited.insert(c) {
                    return false;
                }
                let Some(next) = self.corners.get(&corner.next) else {
                    return false;
                };
                if next.prev != c {
                    return false;
                }
                c = corner.next;
            }
            if c != f.anchor {
                return false;
            }
        }
        // Every live corner must be reachable from its face's anchor.
        if visited.len() != self.corners.len() {
            return false;
        }

        // Corners: vertex back reference registered.
        for (&cid, corner) in &self.corners {
            let Some(v) = self.verts.get(&corner.vertex) else {
                return false;
            };
            if !v.corners.contains(&cid) {
                return false;
            }
            if corner.edge.is_valid() && !self.edges.contains_key(&corner.edge) {
                return false;
            }
        }

        // Vertices: incidence sets only hold live corners at this vertex.
        for (&vid, v) in &self.verts {
            for &cid in &v.corners {
                match self.corners.get(&cid) {
                    Some(c) if c.vertex == vid => {}
                    _ => return false,
                }
            }
        }

        // Edges: sides resolve and point back at this edge.
        for (&eid, e) in &self.edges {
            if !e.side_a.is_valid() {
                return false;
            }
            for side in e.sides() {
                if !side.is_valid() {
                    continue;
                }
                match self.corners.get(&side) {
                    Some(c) if c.edge == eid => {}
                    _ => return false,
                }
            }
        }

        true
    }
}
