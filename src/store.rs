//! Reading and writing envelope files.
//!
//! Files are always handled as whole buffers.  Writes go to a temp file
//! in the same directory and are then renamed over the target (or linked
//! into place when overwriting is not allowed), so a reader never sees a
//! half-written note and a failed save leaves nothing behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{NoteError, Result};

/// Read an entire envelope file into memory.
pub fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(NoteError::NoteNotFound(path.to_path_buf()));
    }

    let data = fs::read(path)?;
    debug!(path = %path.display(), len = data.len(), "read envelope");
    Ok(data)
}

/// Write `bytes` to `path` **atomically**.
///
/// Refuses to replace an existing file unless `overwrite` is set.  On
/// Unix the file is created owner-read/write only.
pub fn write_envelope(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(NoteError::NoteAlreadyExists(path.to_path_buf()));
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = write_private(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    let placed = if overwrite {
        fs::rename(&tmp_path, path).map_err(NoteError::from)
    } else {
        link_new(&tmp_path, path)
    };
    if let Err(e) = placed {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    debug!(path = %path.display(), len = bytes.len(), "wrote envelope");
    Ok(())
}

/// Sibling temp path: `dir/.name.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Publish `tmp` at `path` only if nothing is there yet.  The link fails
/// if `path` appeared after the existence check, unlike `rename`.
fn link_new(tmp: &Path, path: &Path) -> Result<()> {
    fs::hard_link(tmp, path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => NoteError::NoteAlreadyExists(path.to_path_buf()),
        _ => NoteError::Io(e),
    })?;
    fs::remove_file(tmp)?;
    Ok(())
}

fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.note");
        write_envelope(&path, b"bytes", false).unwrap();
        assert_eq!(read_envelope(&path).unwrap(), b"bytes");
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.note");
        assert!(matches!(
            read_envelope(&path),
            Err(NoteError::NoteNotFound(p)) if p == path
        ));
    }

    #[test]
    fn refuses_overwrite_without_flag() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.note");
        write_envelope(&path, b"first", false).unwrap();

        assert!(matches!(
            write_envelope(&path, b"second", false),
            Err(NoteError::NoteAlreadyExists(_))
        ));
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_envelope(&path, b"second", true).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn link_new_never_replaces_a_file_that_appeared_late() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.note");
        let staged = tmp.path().join(".a.note.tmp");
        fs::write(&staged, b"mine").unwrap();
        fs::write(&path, b"someone else's").unwrap();

        assert!(matches!(
            link_new(&staged, &path),
            Err(NoteError::NoteAlreadyExists(p)) if p == path
        ));
        assert_eq!(fs::read(&path).unwrap(), b"someone else's");
    }

    #[test]
    fn no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.note");
        write_envelope(&path, b"x", false).unwrap();
        assert!(!tmp.path().join(".a.note.tmp").exists());
        write_envelope(&path, b"y", true).unwrap();
        assert!(!tmp.path().join(".a.note.tmp").exists());
    }

    #[test]
    fn temp_path_for_bare_file_name_uses_cwd() {
        assert_eq!(
            temp_path_for(Path::new("n.note")),
            PathBuf::from("./.n.note.tmp")
        );
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.note");
        write_envelope(&path, b"x", false).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
