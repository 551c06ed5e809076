use std::io;
use std::os::unix::io::RawFd;
use std::path::PathBuf;

/// Broad failure categories callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A fixed-capacity destination cannot hold the requested content
    Capacity,
    /// The OS could not supply a resource (home directory, memory, descriptor metadata)
    ResourceUnavailable,
    /// Directory creation failed for a reason other than "already exists"
    Filesystem,
    /// Input bytes cannot form a C path (embedded NUL)
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("buffer too small: {needed} bytes needed, capacity is {capacity}")]
    Capacity { needed: usize, capacity: usize },

    #[error("could not determine home directory from $HOME or the user database")]
    HomeUnavailable,

    #[error("failed to allocate {0} bytes for path")]
    Allocation(usize),

    #[error("invalid file descriptor: {0}")]
    BadDescriptor(RawFd),

    #[error("failed to query metadata of descriptor {fd}")]
    Metadata {
        fd: RawFd,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory: {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path exists and is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("path component contains a NUL byte")]
    InteriorNul,
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::Capacity { .. } => ErrorKind::Capacity,
            PathError::HomeUnavailable
            | PathError::Allocation(_)
            | PathError::BadDescriptor(_)
            | PathError::Metadata { .. } => ErrorKind::ResourceUnavailable,
            PathError::CreateDir { .. } | PathError::NotADirectory { .. } => {
                ErrorKind::Filesystem
            }
            PathError::InteriorNul => ErrorKind::InvalidInput,
        }
    }
}
