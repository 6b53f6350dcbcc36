/// Error types shared by the core crate
use std::fmt;
use std::io;

/// Result alias used throughout the core crate
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while loading a mesh or writing frames
#[derive(Debug)]
pub enum Error {
    /// A directive line in an OBJ source could not be read
    Parse { line: usize, message: String },
    /// The mesh has nothing to draw
    EmptyMesh { vertices: usize, faces: usize },
    /// A face refers to a vertex that does not exist
    FaceIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { line, message } => write!(f, "line {}: {}", line, message),
            Error::EmptyMesh { vertices, faces } => write!(
                f,
                "mesh needs at least one vertex and one face (got {} vertices, {} faces)",
                vertices, faces
            ),
            Error::FaceIndex {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} refers to vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
            Error::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
