//! Fixed-capacity path buffer.
//!
//! `BoundedBuf` behaves like a C `char[N]` holding a NUL-terminated string:
//! the capacity counts the terminator, so at most `capacity - 1` content
//! bytes fit. Every write goes through [`bounded_append`], which either
//! appends the whole source or leaves the buffer untouched.

use crate::error::PathError;
use std::ffi::{CString, OsStr};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

#[derive(Clone, PartialEq, Eq)]
pub struct BoundedBuf {
    bytes: Vec<u8>,
    capacity: usize,
}

impl BoundedBuf {
    /// Create an empty buffer that can hold `capacity - 1` bytes plus the terminator
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::new(),
            capacity,
        }
    }

    /// Like [`BoundedBuf::new`], but reserves the whole capacity up front and
    /// reports allocation failure instead of aborting
    pub fn try_with_capacity(capacity: usize) -> Result<Self, PathError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(capacity)
            .map_err(|_| PathError::Allocation(capacity))?;
        Ok(Self { bytes, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content bytes that can still be appended
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.bytes.len() + 1)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_path(&self) -> &Path {
        Path::new(OsStr::from_bytes(&self.bytes))
    }

    pub fn ends_with_separator(&self) -> bool {
        self.bytes.last() == Some(&b'/')
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Append `src` if it fits, see [`bounded_append`]
    pub fn append(&mut self, src: &[u8]) -> Result<(), PathError> {
        let needed = self
            .bytes
            .len()
            .checked_add(src.len())
            .and_then(|n| n.checked_add(1))
            .ok_or(PathError::Capacity {
                needed: usize::MAX,
                capacity: self.capacity,
            })?;

        if needed > self.capacity {
            return Err(PathError::Capacity {
                needed,
                capacity: self.capacity,
            });
        }
        if src.contains(&0) {
            return Err(PathError::InteriorNul);
        }

        self.bytes.extend_from_slice(src);
        Ok(())
    }

    /// Terminate the content and hand it over as a C string.
    ///
    /// The terminator lands in the slot the capacity always reserved for it,
    /// so a buffer made with [`BoundedBuf::try_with_capacity`] never reallocates here.
    pub fn into_c_string(self) -> Result<CString, PathError> {
        let mut bytes = self.bytes;
        bytes.push(0);
        CString::from_vec_with_nul(bytes).map_err(|_| PathError::InteriorNul)
    }
}

impl fmt::Debug for BoundedBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuf")
            .field("content", &String::from_utf8_lossy(&self.bytes))
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Append exactly `src.len()` bytes onto `dest`.
///
/// Succeeds only when `dest.len() + src.len() + 1 <= dest.capacity()`; on
/// failure `dest` is not modified.
pub fn bounded_append<'a>(
    dest: &'a mut BoundedBuf,
    src: &[u8],
) -> Result<&'a mut BoundedBuf, PathError> {
    dest.append(src)?;
    Ok(dest)
}
