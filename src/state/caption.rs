/// Caption file persistence
///
/// One plain UTF-8 text file per image, no header, no newline convention.
/// Handles are opened and closed inside each call.
use std::fs;
use std::path::Path;

use crate::error::{CaptionerError, Result};

/// Read a caption file.
///
/// Invalid UTF-8 sequences are replaced rather than rejected. Callers check
/// existence first; a missing file is reported as an I/O error.
pub fn read(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CaptionerError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a caption file if it exists, `None` otherwise
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    read(path).map(Some)
}

/// Create or truncate the caption file and write `caption` verbatim.
///
/// An empty caption yields an empty file. No atomic rename.
pub fn write(path: &Path, caption: &str) -> Result<()> {
    fs::write(path, caption.as_bytes()).map_err(|e| CaptionerError::io(path, e))?;
    log::info!("💾 Saved caption: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_is_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let caption = "a dog, running\non grass  ";

        write(&path, caption).unwrap();

        assert_eq!(read(&path).unwrap(), caption);
    }

    #[test]
    fn test_empty_caption_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");

        write(&path, "").unwrap();

        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a much longer caption than the next one").unwrap();

        write(&path, "cat").unwrap();

        assert_eq!(read(&path).unwrap(), "cat");
    }

    #[test]
    fn test_read_recovers_from_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, [b'c', b'a', 0xFF, b't']).unwrap();

        let text = read(&path).unwrap();

        assert!(text.starts_with("ca"));
        assert!(text.ends_with('t'));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        assert!(read(&path).is_err());
        assert_eq!(read_if_exists(&path).unwrap(), None);
    }

    #[test]
    fn test_write_into_missing_folder_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone").join("a.txt");

        let err = write(&path, "cat").unwrap_err();
        assert!(matches!(err, CaptionerError::Io { .. }));
    }
}
