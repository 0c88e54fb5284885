pub mod db;
pub mod model;
pub mod urls;

pub use db::*;
pub use model::*;
pub use urls::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    Decode(String),
    Encode(String),
    Io(String),
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectError::Decode(msg) => write!(f, "project decode error: {msg}"),
            ProjectError::Encode(msg) => write!(f, "project encode error: {msg}"),
            ProjectError::Io(msg) => write!(f, "project io error: {msg}"),
        }
    }
}

impl std::error::Error for ProjectError {}
