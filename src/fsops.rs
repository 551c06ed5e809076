use crate::error::PathError;
use log::{debug, trace};
use nix::sys::stat::fstat;
use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::Path;

/// Owner rwx, group r-x, other --x (before umask)
pub const CACHE_DIR_MODE: u32 = 0o751;

/// Create a single cache directory.
///
/// An existing directory at `path` counts as success, so this can be called
/// unconditionally on every run. An existing non-directory entry, a missing
/// parent or a permission problem is an error.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    create_dir(DirBuilder::new().mode(CACHE_DIR_MODE), path)
}

/// [`ensure_directory`], creating missing parents with the same mode
pub fn ensure_directory_all(path: &Path) -> Result<(), PathError> {
    create_dir(DirBuilder::new().recursive(true).mode(CACHE_DIR_MODE), path)
}

fn create_dir(builder: &DirBuilder, path: &Path) -> Result<(), PathError> {
    match builder.create(path) {
        Ok(()) => {
            debug!("Created directory: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if path.is_dir() {
                trace!("Directory already present: {}", path.display());
                Ok(())
            } else {
                Err(PathError::NotADirectory {
                    path: path.to_path_buf(),
                })
            }
        }
        Err(source) => Err(PathError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Raw descriptor behind an open handle; the handle stays owned by the caller
pub fn file_descriptor<F: AsRawFd + ?Sized>(handle: &F) -> Result<RawFd, PathError> {
    let fd = handle.as_raw_fd();
    if fd < 0 {
        return Err(PathError::BadDescriptor(fd));
    }
    Ok(fd)
}

/// Current size in bytes of an already-open file, from `fstat`
pub fn file_size<F: AsRawFd + ?Sized>(handle: &F) -> Result<u64, PathError> {
    let fd = file_descriptor(handle)?;
    let stat = fstat(fd).map_err(|errno| PathError::Metadata {
        fd,
        source: io::Error::from(errno),
    })?;

    u64::try_from(stat.st_size).map_err(|_| PathError::Metadata {
        fd,
        source: io::Error::new(io::ErrorKind::InvalidData, "negative file size"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs::{self, File};
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    struct FakeFd(RawFd);

    impl AsRawFd for FakeFd {
        fn as_raw_fd(&self) -> RawFd {
            self.0
        }
    }

    #[test]
    fn test_ensure_directory_twice() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".ashpath");

        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_directory_mode() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        ensure_directory(&dir).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !CACHE_DIR_MODE, 0);
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn test_ensure_directory_on_file_fails() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("occupied");
        File::create(&file_path).unwrap();

        let err = ensure_directory(&file_path).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory { .. }));
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_ensure_directory_missing_parent_fails() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("missing").join("child");

        let err = ensure_directory(&dir).unwrap_err();
        assert!(matches!(err, PathError::CreateDir { .. }));
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert!(!dir.exists());
    }

    #[test]
    fn test_ensure_directory_all_creates_parents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b").join("c");

        ensure_directory_all(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_directory_all(&dir).unwrap();
    }

    #[test]
    fn test_ensure_directory_all_on_file_fails() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("occupied");
        File::create(&file_path).unwrap();

        assert!(ensure_directory_all(&file_path).is_err());
        assert!(ensure_directory_all(&file_path.join("below")).is_err());
    }

    #[test]
    fn test_file_size_tracks_writes() {
        let temp = TempDir::new().unwrap();
        let mut file = File::create(temp.path().join("data")).unwrap();
        assert_eq!(file_size(&file).unwrap(), 0);

        file.write_all(&[7u8; 1234]).unwrap();
        assert_eq!(file_size(&file).unwrap(), 1234);

        file.write_all(b"more").unwrap();
        assert_eq!(file_size(&file).unwrap(), 1238);
    }

    #[test]
    fn test_file_size_sparse_file() {
        let temp = TempDir::new().unwrap();
        let file = File::create(temp.path().join("sparse")).unwrap();
        file.set_len(1 << 20).unwrap();
        assert_eq!(file_size(&file).unwrap(), 1 << 20);
    }

    #[test]
    fn test_file_size_does_not_close_handle() {
        let temp = TempDir::new().unwrap();
        let mut file = File::create(temp.path().join("data")).unwrap();
        file_size(&file).unwrap();
        file.write_all(b"still open").unwrap();
        assert_eq!(file_size(&file).unwrap(), 10);
    }

    #[test]
    fn test_negative_descriptor() {
        let err = file_size(&FakeFd(-1)).unwrap_err();
        assert!(matches!(err, PathError::BadDescriptor(-1)));
        assert_eq!(err.kind(), ErrorKind::ResourceUnavailable);
    }

    #[test]
    fn test_closed_descriptor() {
        let err = file_size(&FakeFd(1_000_000)).unwrap_err();
        assert!(matches!(err, PathError::Metadata { fd: 1_000_000, .. }));
    }

    #[test]
    fn test_file_descriptor_matches_handle() {
        let temp = TempDir::new().unwrap();
        let file = File::create(temp.path().join("data")).unwrap();
        assert_eq!(file_descriptor(&file).unwrap(), file.as_raw_fd());
    }
}
