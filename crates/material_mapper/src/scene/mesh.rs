//! Mesh attribute queries

/// Per-vertex attribute presence, as reported by the importer
pub trait MeshAttributes {
    /// True when the mesh carries per-vertex normals
    fn has_normals(&self) -> bool;

    /// True when vertex-color channel `channel` is populated
    fn has_vertex_colors(&self, channel: usize) -> bool;
}

/// Plain attribute description for callers without a richer mesh type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshDescriptor {
    /// Per-vertex normals present
    pub normals: bool,
    /// Number of populated vertex-color channels, starting at channel 0
    pub vertex_color_channels: usize,
}

impl MeshDescriptor {
    /// Mesh with positions only
    pub const fn new() -> Self {
        Self {
            normals: false,
            vertex_color_channels: 0,
        }
    }

    /// Mark normals as present
    #[must_use]
    pub const fn with_normals(mut self) -> Self {
        self.normals = true;
        self
    }

    /// Set the number of vertex-color channels
    #[must_use]
    pub const fn with_vertex_colors(mut self, channels: usize) -> Self {
        self.vertex_color_channels = channels;
        self
    }
}

impl MeshAttributes for MeshDescriptor {
    fn has_normals(&self) -> bool {
        self.normals
    }

    fn has_vertex_colors(&self, channel: usize) -> bool {
        channel < self.vertex_color_channels
    }
}
