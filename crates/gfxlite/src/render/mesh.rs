//! Mesh geometry
//!
//! Vertex and index data ready for upload, plus the textures the mesh is
//! drawn with. Buffer upload and draw calls belong to the GL side; this module
//! only guarantees the data is consistent (every index names a vertex and
//! triangle lists are complete).

use bytemuck::{Pod, Zeroable};
use std::rc::Rc;
use thiserror::Error;

use crate::foundation::math::Point3;
use crate::render::texture::Texture;

/// Mesh validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// No vertices were given
    #[error("Mesh has no vertices")]
    Empty,

    /// An index names a vertex that does not exist
    #[error("Index {index} at position {position} exceeds vertex count {vertex_count}")]
    IndexOutOfRange {
        /// Offending index value
        index: u32,
        /// Position of the index in the index list
        position: usize,
        /// Number of vertices
        vertex_count: usize,
    },

    /// Index count does not fit the topology
    #[error("{topology:?} needs {requirement}, got {index_count} indices")]
    IndexCount {
        /// Topology the indices were checked against
        topology: Topology,
        /// What the topology requires
        requirement: &'static str,
        /// Number of indices given
        index_count: usize,
    },
}

/// Result type for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;

/// Vertex with position, normal and texture coordinates
///
/// `#[repr(C)]` keeps the layout stable for buffer uploads: 32 bytes, no
/// padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// How indices are assembled into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Every three indices form a triangle
    #[default]
    Triangles,
    /// Each index after the first two forms a triangle with the previous two
    TriangleStrip,
    /// Each index after the first two forms a triangle with the first and previous
    TriangleFan,
}

impl Topology {
    /// Number of triangles drawn from `index_count` indices
    pub const fn primitive_count(self, index_count: usize) -> usize {
        match self {
            Self::Triangles => index_count / 3,
            Self::TriangleStrip | Self::TriangleFan => index_count.saturating_sub(2),
        }
    }

    fn check_index_count(self, index_count: usize) -> MeshResult<()> {
        let (ok, requirement) = match self {
            Self::Triangles => (index_count % 3 == 0, "a multiple of 3"),
            Self::TriangleStrip | Self::TriangleFan => {
                (index_count == 0 || index_count >= 3, "at least 3")
            }
        };
        if ok {
            Ok(())
        } else {
            Err(MeshError::IndexCount {
                topology: self,
                requirement,
                index_count,
            })
        }
    }
}

/// Indexed triangle mesh
///
/// Cloning copies the geometry and shares the textures.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    textures: Vec<Rc<Texture>>,
    topology: Topology,
}

impl Mesh {
    /// Create a triangle-list mesh
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        textures: Vec<Rc<Texture>>,
    ) -> MeshResult<Self> {
        let mesh = Self {
            vertices,
            indices,
            textures,
            topology: Topology::Triangles,
        };
        mesh.validate()?;

        log::debug!(
            "Mesh created: {} vertices, {} indices, {} textures",
            mesh.vertices.len(),
            mesh.indices.len(),
            mesh.textures.len()
        );
        Ok(mesh)
    }

    /// Reinterpret the indices with another topology
    pub fn with_topology(mut self, topology: Topology) -> MeshResult<Self> {
        self.topology = topology;
        self.validate()?;
        Ok(self)
    }

    /// Vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Textures bound when drawing
    pub fn textures(&self) -> &[Rc<Texture>] {
        &self.textures
    }

    /// Index assembly mode
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of indices
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles drawn
    pub fn primitive_count(&self) -> usize {
        self.topology.primitive_count(self.indices.len())
    }

    /// Vertex data as bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounding box as (min, max) corners
    pub fn bounds(&self) -> (Point3, Point3) {
        let first = Point3::from(self.vertices[0].position);
        self.vertices.iter().skip(1).fold((first, first), |(min, max), v| {
            let p = Point3::from(v.position);
            (min.inf(&p), max.sup(&p))
        })
    }

    fn validate(&self) -> MeshResult<()> {
        if self.vertices.is_empty() {
            return Err(MeshError::Empty);
        }
        self.topology.check_index_count(self.indices.len())?;

        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }
        Ok(())
    }
}
