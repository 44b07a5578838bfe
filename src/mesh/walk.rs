//! Boundary walks and scoped enumeration.
//!
//! Walks are pure queries: they reposition the container's inspection cursor
//! at most, never the topology. Enumeration honors the caller's [`Scope`] —
//! interactive callers query the selection sets, batch callers the whole
//! container — and both preserve container iteration order.

use super::container::Mesh;
use super::id::{EdgeId, FaceId, VertexId};
use crate::error::Result;

/// Which elements an enumeration query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Every live element, in container order.
    #[default]
    All,
    /// Only the current selection set, in selection order.
    Selected,
}

impl Mesh {
    /// Reposition the walk cursor at `face`'s anchor corner.
    ///
    /// Inspection tooling reads the cursor; topology is untouched.
    pub fn boundary_walk(&mut self, face: FaceId) -> Result<()> {
        self.walk_cursor = self.face(face)?.anchor;
        Ok(())
    }

    /// Vertex IDs around `face`'s boundary, in order from the anchor corner.
    ///
    /// The starting corner is the face's anchor, so the same container state
    /// always produces the same sequence.
    pub fn vertex_walk(&self, face: FaceId) -> Result<Vec<VertexId>> {
        self.face_corners(face)?
            .into_iter()
            .map(|c| Ok(self.corner(c)?.vertex))
            .collect()
    }

    /// Edge IDs around `face`'s boundary, in order from the anchor corner.
    ///
    /// Point-sphere corners carry no edge and contribute nothing.
    pub fn edge_walk(&self, face: FaceId) -> Result<Vec<EdgeId>> {
        let mut out = Vec::new();
        for c in self.face_corners(face)? {
            let edge = self.corner(c)?.edge;
            if edge.is_valid() {
                out.push(edge);
            }
        }
        Ok(out)
    }

    /// Face IDs, all or selected.
    pub fn query_faces(&self, scope: Scope) -> Vec<FaceId> {
        match scope {
            Scope::All => self.face_ids().collect(),
            Scope::Selected => self.selection.faces.clone(),
        }
    }

    /// Edge IDs, all or selected.
    pub fn query_edges(&self, scope: Scope) -> Vec<EdgeId> {
        match scope {
            Scope::All => self.edge_ids().collect(),
            Scope::Selected => self.selection.edges.clone(),
        }
    }

    /// Vertex IDs, all or selected.
    pub fn query_verts(&self, scope: Scope) -> Vec<VertexId> {
        match scope {
            Scope::All => self.vertex_ids().collect(),
            Scope::Selected => self.selection.verts.clone(),
        }
    }

    /// (face, vertex) corner pairs.
    ///
    /// `Scope::All` flattens every face's boundary cycle in container order;
    /// `Scope::Selected` reports the raw selected-corner set.
    pub fn query_face_verts(&self, scope: Scope) -> Result<Vec<(FaceId, VertexId)>> {
        match scope {
            Scope::All => {
                let mut out = Vec::with_capacity(self.num_corners());
                for fid in self.face_ids().collect::<Vec<_>>() {
                    for c in self.face_corners(fid)? {
                        out.push((fid, self.corner(c)?.vertex));
                    }
                }
                Ok(out)
            }
            Scope::Selected => self
                .selection
                .corners
                .iter()
                .map(|&c| {
                    let corner = self.corner(c)?;
                    Ok((corner.face, corner.vertex))
                })
                .collect(),
        }
    }
}
