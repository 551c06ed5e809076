//! Per-user cache directory resolution.
//!
//! The cache directory is `<home>/.<app_name>/`. The home directory comes from
//! `$HOME` when it is set and non-empty, otherwise from the user database entry
//! of the effective user.

use crate::buffer::{BoundedBuf, bounded_append};
use crate::error::PathError;
use log::{debug, trace};
use nix::unistd::{Uid, User};
use std::ffi::OsString;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

/// App name used for the default `.ashpath/` suffix
pub const DEFAULT_APP_NAME: &str = "ashpath";

/// Capacity handed to [`resolve_default_cache_directory`] by callers without
/// their own fixed-size contract
pub const DEFAULT_DIR_CAPACITY: usize = 256;

/// Pick the home directory: a non-empty environment value wins, otherwise `fallback` is asked
pub fn home_from(
    env_home: Option<OsString>,
    fallback: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    match env_home {
        Some(home) if !home.is_empty() => {
            trace!("home directory from $HOME: {}", Path::new(&home).display());
            Some(PathBuf::from(home))
        }
        _ => {
            let home = fallback();
            if let Some(home) = &home {
                debug!("$HOME unusable, using user database: {}", home.display());
            }
            home
        }
    }
}

/// Home directory registered for the effective user in the user database
pub fn passwd_home() -> Option<PathBuf> {
    match User::from_uid(Uid::effective()) {
        Ok(Some(user)) if !user.dir.as_os_str().is_empty() => Some(user.dir),
        _ => None,
    }
}

/// Resolve the current user's home directory
pub fn home_directory() -> Option<PathBuf> {
    home_from(std::env::var_os("HOME"), passwd_home)
}

fn cache_suffix(app_name: &str) -> String {
    format!(".{app_name}/")
}

/// Write `<home>/.<app_name>/` into `buf`.
///
/// The separator before the suffix is only added when `home` lacks one. On
/// failure `buf` is left empty.
pub fn cache_dir_for_home(
    buf: &mut BoundedBuf,
    home: &Path,
    app_name: &str,
) -> Result<(), PathError> {
    buf.clear();
    let result = append_cache_dir(buf, home, app_name);
    if result.is_err() {
        buf.clear();
    }
    result
}

fn append_cache_dir(buf: &mut BoundedBuf, home: &Path, app_name: &str) -> Result<(), PathError> {
    let home = home.as_os_str().as_bytes();
    bounded_append(buf, home)?;
    if !home.ends_with(b"/") {
        bounded_append(buf, b"/")?;
    }
    bounded_append(buf, cache_suffix(app_name).as_bytes())?;
    Ok(())
}

/// Resolve `<home>/.<app_name>/` into a fixed-capacity buffer
pub fn resolve_cache_directory(buf: &mut BoundedBuf, app_name: &str) -> Result<(), PathError> {
    buf.clear();
    let home = home_directory().ok_or(PathError::HomeUnavailable)?;
    cache_dir_for_home(buf, &home, app_name)
}

/// Resolve the default `<home>/.ashpath/` cache directory into a fixed-capacity buffer
pub fn resolve_default_cache_directory(buf: &mut BoundedBuf) -> Result<(), PathError> {
    resolve_cache_directory(buf, DEFAULT_APP_NAME)
}

/// Same bytes as [`cache_dir_for_home`], without a capacity limit
pub fn join_cache_dir(home: &Path, app_name: &str) -> PathBuf {
    let mut bytes = home.as_os_str().as_bytes().to_vec();
    if !bytes.ends_with(b"/") {
        bytes.push(b'/');
    }
    bytes.extend_from_slice(cache_suffix(app_name).as_bytes());
    PathBuf::from(OsString::from_vec(bytes))
}

/// Growable rendition of [`resolve_cache_directory`]
pub fn cache_dir(app_name: &str) -> Result<PathBuf, PathError> {
    let home = home_directory().ok_or(PathError::HomeUnavailable)?;
    Ok(join_cache_dir(&home, app_name))
}

/// Growable rendition of [`resolve_default_cache_directory`]
pub fn default_cache_dir() -> Result<PathBuf, PathError> {
    cache_dir(DEFAULT_APP_NAME)
}
