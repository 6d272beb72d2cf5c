//! No-clobber file renames.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AddextError, Result};

/// Destination for `path` with `.ext` appended to its file name.
pub fn appended_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(ext);
    path.with_file_name(name)
}

/// Rename `from` to `to`, refusing to replace an existing entry.
///
/// The move itself is a single `rename` call. Any entry at `to`, including a
/// dangling symlink, makes this fail with `DestinationExists` and leaves
/// `from` untouched.
pub fn rename_no_clobber(from: &Path, to: &Path) -> Result<()> {
    match fs::symlink_metadata(to) {
        Ok(_) => {
            return Err(AddextError::DestinationExists {
                path: to.to_path_buf(),
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    fs::rename(from, to)?;
    tracing::debug!("Renamed {} -> {}", from.display(), to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appended_path_keeps_existing_suffix() {
        assert_eq!(
            appended_path(Path::new("/data/animation"), "mov"),
            PathBuf::from("/data/animation.mov")
        );
        assert_eq!(
            appended_path(Path::new("/data/archive.v1"), "zip"),
            PathBuf::from("/data/archive.v1.zip")
        );
    }

    #[test]
    fn renames_when_destination_free() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("animation");
        fs::write(&from, b"moov").unwrap();
        let to = temp.path().join("animation.mov");

        rename_no_clobber(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"moov");
    }

    #[test]
    fn refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("animation");
        let to = temp.path().join("animation.mov");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();

        let err = rename_no_clobber(&from, &to).unwrap_err();

        assert!(matches!(err, AddextError::DestinationExists { .. }));
        assert_eq!(fs::read(&from).unwrap(), b"new");
        assert_eq!(fs::read(&to).unwrap(), b"old");
    }

    #[test]
    fn missing_source_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = rename_no_clobber(&temp.path().join("gone"), &temp.path().join("gone.pdf"))
            .unwrap_err();
        assert!(matches!(err, AddextError::Io(_)));
    }
}
