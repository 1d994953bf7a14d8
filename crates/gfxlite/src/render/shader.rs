//! Shader source loading
//!
//! Reads GLSL source for each pipeline stage. Compiling and linking is left
//! to the GL side.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pipeline stage a source file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
    /// Geometry stage
    Geometry,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
        })
    }
}

/// Shader loading errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// A stage's source file could not be read
    #[error("Failed to read {stage} shader {path:?}: {source}")]
    Io {
        /// Stage being loaded
        stage: ShaderStage,
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A stage's source file is empty
    #[error("{stage} shader {path:?} is empty")]
    Empty {
        /// Stage being loaded
        stage: ShaderStage,
        /// Empty file
        path: PathBuf,
    },
}

/// Result type for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Source text for a shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: Option<String>,
    /// Geometry stage source
    pub geometry: Option<String>,
}

impl ShaderSources {
    /// Read the given stage files
    pub fn load(
        vertex: impl AsRef<Path>,
        fragment: Option<&Path>,
        geometry: Option<&Path>,
    ) -> ShaderResult<Self> {
        let sources = Self {
            vertex: read_stage(ShaderStage::Vertex, vertex.as_ref())?,
            fragment: fragment
                .map(|path| read_stage(ShaderStage::Fragment, path))
                .transpose()?,
            geometry: geometry
                .map(|path| read_stage(ShaderStage::Geometry, path))
                .transpose()?,
        };

        log::info!(
            "Loaded shader sources: {}",
            sources
                .stages()
                .map(|(stage, _)| stage.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(sources)
    }

    /// Present stages in pipeline order with their source
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        [
            Some((ShaderStage::Vertex, self.vertex.as_str())),
            self.geometry.as_deref().map(|src| (ShaderStage::Geometry, src)),
            self.fragment.as_deref().map(|src| (ShaderStage::Fragment, src)),
        ]
        .into_iter()
        .flatten()
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> ShaderResult<String> {
    log::debug!("Reading {} shader from {:?}", stage, path);
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(ShaderError::Empty {
            stage,
            path: path.to_path_buf(),
        });
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let file = format!("gfxlite_shader_{}_{name}", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_vertex_and_fragment() {
        let vert = write_temp("basic.vert", "#version 330 core\nvoid main() {}\n");
        let frag = write_temp("basic.frag", "#version 330 core\nout vec4 color;\nvoid main() {}\n");

        let sources = ShaderSources::load(&vert, Some(frag.as_path()), None).unwrap();
        assert!(sources.vertex.starts_with("#version 330"));
        assert!(sources.fragment.as_deref().unwrap().contains("out vec4"));
        assert!(sources.geometry.is_none());

        let stages: Vec<ShaderStage> = sources.stages().map(|(stage, _)| stage).collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);

        std::fs::remove_file(vert).unwrap();
        std::fs::remove_file(frag).unwrap();
    }

    #[test]
    fn test_stage_order_includes_geometry() {
        let sources = ShaderSources {
            vertex: "v".to_string(),
            fragment: Some("f".to_string()),
            geometry: Some("g".to_string()),
        };
        let stages: Vec<_> = sources.stages().collect();
        assert_eq!(
            stages,
            vec![
                (ShaderStage::Vertex, "v"),
                (ShaderStage::Geometry, "g"),
                (ShaderStage::Fragment, "f"),
            ]
        );
    }

    #[test]
    fn test_missing_stage_names_stage_and_path() {
        let vert = write_temp("missing_frag.vert", "void main() {}");
        let missing = Path::new("no/such/shader.frag");

        let err = ShaderSources::load(&vert, Some(missing), None).unwrap_err();
        match &err {
            ShaderError::Io { stage, path, .. } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert_eq!(path, missing);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("fragment shader"));

        std::fs::remove_file(vert).unwrap();
    }

    #[test]
    fn test_empty_source_rejected() {
        let vert = write_temp("empty.vert", "  \n");
        let result = ShaderSources::load(&vert, None, None);
        assert!(matches!(result, Err(ShaderError::Empty { stage: ShaderStage::Vertex, .. })));
        std::fs::remove_file(vert).unwrap();
    }
}
