//! Filesystem helpers for installing binaries.

use std::{
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;

#[cfg(target_family = "unix")]
use std::fs::Permissions;
#[cfg(target_family = "unix")]
use std::os::unix::fs::PermissionsExt;

/// Returns whether anything exists at `path`.
pub fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Moves `src` onto `dest` without ever leaving a partially written file at
/// `dest`, even when `dest` is the binary of a currently running process.
///
/// The content is written to a temporary sibling in `dest`'s directory (which
/// is created if missing), marked executable on unix, and renamed onto
/// `dest` in one operation. Any failure leaves `dest` untouched.
pub fn safe_move(src: &Path, dest: &Path) -> io::Result<()> {
    let bytes = std::fs::read(src)?;

    let dir = dest.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("destination '{}' has no parent directory", dest.display()),
        )
    })?;
    std::fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    #[cfg(target_family = "unix")]
    staged
        .as_file()
        .set_permissions(Permissions::from_mode(0o755))?;

    staged.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
