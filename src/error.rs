//! Startup error types
//!
//! Everything that can fail happens before the frame loop starts: reading
//! level files, parsing tile grids and tuning files, and resolving named
//! resources. The simulation itself is total.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which resource table a lookup went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Shader,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Texture => "texture",
            ResourceKind::Shader => "shader",
        }
    }
}

/// A symbolic resource name that was never registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    NotFound { kind: ResourceKind, name: String },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound { kind, name } => {
                write!(f, "unable to find {}: {}", kind.as_str(), name)
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Fatal error while loading game data
#[derive(Debug)]
pub enum LoadError {
    /// Level or tuning file could not be read
    Io { path: PathBuf, source: io::Error },
    /// Tile grid has no rows
    EmptyLevel,
    /// Row width differs from the first row; `row` is the 0-based line
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Character that is neither a digit nor ignorable whitespace; 0-based line and character
    InvalidTile { row: usize, column: usize, found: char },
    /// Tuning JSON did not parse
    Tuning(serde_json::Error),
    /// Tuning value parsed but is out of range
    TuningRange { field: &'static str, value: f32 },
    /// Named texture/shader missing
    Resource(ResourceError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "unable to read {}: {}", path.display(), source)
            }
            LoadError::EmptyLevel => write!(f, "level has no rows"),
            LoadError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "level row {} has {} tiles, expected {}",
                row, found, expected
            ),
            LoadError::InvalidTile { row, column, found } => write!(
                f,
                "invalid tile {:?} at row {}, column {}",
                found, row, column
            ),
            LoadError::Tuning(e) => write!(f, "invalid tuning file: {}", e),
            LoadError::TuningRange { field, value } => {
                write!(f, "tuning value {} = {} is out of range", field, value)
            }
            LoadError::Resource(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Tuning(e) => Some(e),
            LoadError::Resource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResourceError> for LoadError {
    fn from(e: ResourceError) -> Self {
        LoadError::Resource(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Tuning(e)
    }
}
