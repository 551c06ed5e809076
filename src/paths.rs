use crate::buffer::{BoundedBuf, bounded_append};
use crate::error::PathError;
use std::ffi::{CStr, CString, OsStr};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// A directory joined with a file name, owned by the caller.
///
/// Always NUL-terminated and never longer than the join requires.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BuiltPath(CString);

impl BuiltPath {
    pub fn as_c_str(&self) -> &CStr {
        &self.0
    }

    /// Bytes without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        self.0.to_bytes()
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.0.to_bytes_with_nul()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(self.as_bytes()))
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.as_path().to_path_buf()
    }

    pub fn into_c_string(self) -> CString {
        self.0
    }
}

impl AsRef<Path> for BuiltPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Debug for BuiltPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BuiltPath").field(&self.as_path()).finish()
    }
}

impl fmt::Display for BuiltPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path().display())
    }
}

/// Join `directory` and `name` with exactly one `/` between them.
///
/// Only `name.len()` bytes of `name` are used; no terminator is expected. The
/// result buffer is sized exactly and every copy into it is bounds checked, so
/// a failure never yields a partial path.
pub fn build_path(directory: &Path, name: &[u8]) -> Result<BuiltPath, PathError> {
    let dir = directory.as_os_str().as_bytes();
    let needs_separator = !dir.ends_with(b"/");

    let needed = dir
        .len()
        .checked_add(name.len())
        .and_then(|n| n.checked_add(1 + usize::from(needs_separator)))
        .ok_or(PathError::Capacity {
            needed: usize::MAX,
            capacity: usize::MAX,
        })?;

    let mut buf = BoundedBuf::try_with_capacity(needed)?;
    bounded_append(&mut buf, dir)?;
    if needs_separator {
        bounded_append(&mut buf, b"/")?;
    }
    bounded_append(&mut buf, name)?;

    buf.into_c_string().map(BuiltPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn expected_len(dir: &str, name: &[u8]) -> usize {
        dir.len() + usize::from(!dir.ends_with('/')) + name.len()
    }

    #[test]
    fn test_inserts_missing_separator() {
        let path = build_path(Path::new("/home/alice/.ashpath"), b"full-R23-0000").unwrap();
        assert_eq!(path.as_bytes(), b"/home/alice/.ashpath/full-R23-0000");
        assert_eq!(path.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn test_keeps_existing_separator() {
        let path = build_path(Path::new("/home/alice/.ashpath/"), b"file").unwrap();
        assert_eq!(path.as_path(), Path::new("/home/alice/.ashpath/file"));
        assert!(!path.as_bytes().windows(2).any(|w| w == b"//"));
    }

    #[test]
    fn test_uses_only_given_name_bytes() {
        let name_buffer = b"cache-file-and-trailing-garbage";
        let path = build_path(Path::new("/tmp"), &name_buffer[..10]).unwrap();
        assert_eq!(path.as_bytes(), b"/tmp/cache-file");
    }

    #[test]
    fn test_empty_name_and_directory() {
        assert_eq!(build_path(Path::new("/tmp"), b"").unwrap().as_bytes(), b"/tmp/");
        assert_eq!(build_path(Path::new(""), b"x").unwrap().as_bytes(), b"/x");
    }

    #[test]
    fn test_length_property() {
        let dirs = ["/", "/a", "/a/", "/var/cache/ashpath", "rel/dir/"];
        let names: [&[u8]; 4] = [b"", b"f", b"file.bin", &[b'n'; 300]];
        for dir in dirs {
            for name in names {
                let path = build_path(Path::new(dir), name).unwrap();
                assert_eq!(path.len(), expected_len(dir, name), "{dir} + {} bytes", name.len());
                assert_eq!(path.as_bytes_with_nul().len(), path.len() + 1);
            }
        }
    }

    #[test]
    fn test_long_inputs() {
        let dir = format!("/{}", "d".repeat(8191));
        let name = vec![b'n'; 70_000];
        let path = build_path(Path::new(&dir), &name).unwrap();
        assert_eq!(path.len(), dir.len() + 1 + name.len());
        assert!(path.as_bytes().ends_with(&name));
    }

    #[test]
    fn test_rejects_nul_in_name() {
        let err = build_path(Path::new("/tmp"), b"bad\0name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_display_and_as_ref() {
        let path = build_path(Path::new("/tmp"), b"x").unwrap();
        assert_eq!(path.to_string(), "/tmp/x");
        let as_ref: &Path = path.as_ref();
        assert_eq!(as_ref, Path::new("/tmp/x"));
        assert_eq!(path.into_c_string().as_bytes(), b"/tmp/x");
    }
}
