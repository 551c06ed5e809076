// Public modules
pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod fsops;
pub mod home;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use buffer::{BoundedBuf, bounded_append};
pub use error::{ErrorKind, PathError};
pub use fsops::{ensure_directory, ensure_directory_all, file_descriptor, file_size};
pub use home::{
    DEFAULT_APP_NAME, DEFAULT_DIR_CAPACITY, default_cache_dir, resolve_default_cache_directory,
};
pub use paths::{BuiltPath, build_path};
