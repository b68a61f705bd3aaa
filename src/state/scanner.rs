/// Folder scanning
///
/// Lists the images directly inside a folder and classifies each one from its
/// caption file alone. Reads only.
use std::path::Path;
use walkdir::WalkDir;

use super::caption;
use super::data::{caption_path_for, CaptionStatus, Entry, Project};
use crate::error::{CaptionerError, Result};

/// Image extensions recognized when no override is configured
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];

/// Which files count as images
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    /// Lowercase extensions without the dot
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_IMAGE_EXTENSIONS.iter().copied())
    }
}

impl ScanOptions {
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions }
    }

    /// Case-insensitive extension check
    pub fn is_image(&self, path: &Path) -> bool {
        match path.extension() {
            Some(extension) => {
                let ext = extension.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}

/// List image file names directly inside `folder`, sorted by name
pub fn list_images(folder: &Path, options: &ScanOptions) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(CaptionerError::FolderUnreadable {
            path: folder.to_path_buf(),
        });
    }

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut names = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The folder itself failing is fatal for the scan; single entries are skipped
            Err(e) if e.depth() == 0 => {
                log::warn!("⚠️  Cannot read folder {}: {}", folder.display(), e);
                return Err(CaptionerError::FolderUnreadable {
                    path: folder.to_path_buf(),
                });
            }
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !options.is_image(path) {
            continue;
        }

        names.push(entry.file_name().to_string_lossy().to_string());
    }

    Ok(names)
}

/// Classify one image from its caption file
pub fn classify(folder: &Path, name: &str) -> CaptionStatus {
    let caption_path = caption_path_for(&folder.join(name));
    let on_disk = match caption::read_if_exists(&caption_path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("⚠️  {}", e);
            None
        }
    };

    CaptionStatus::from_disk(on_disk.as_deref())
}

/// Scan `folder` into a Project with an initial status per entry
pub fn scan(folder: &Path, options: &ScanOptions) -> Result<Project> {
    let names = list_images(folder, options)?;

    let entries = names
        .into_iter()
        .map(|name| {
            let status = classify(folder, &name);
            log::debug!("{} -> {:?}", name, status);
            Entry {
                path: folder.join(&name),
                name,
                status,
            }
        })
        .collect();

    Ok(Project {
        folder: folder.to_path_buf(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lists_only_images_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.PNG"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("a.txt"), b"cat").unwrap();
        fs::write(dir.path().join("notes"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.jpg"), b"").unwrap();

        let names = list_images(dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(names, vec!["a.jpg".to_string(), "b.PNG".to_string()]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("b.jxl"), b"").unwrap();

        let options = ScanOptions::with_extensions([".JXL"]);
        let names = list_images(dir.path(), &options).unwrap();

        assert_eq!(names, vec!["b.jxl".to_string()]);
    }

    #[test]
    fn test_unreadable_folder() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let result = scan(&missing, &ScanOptions::default());
        assert!(matches!(result, Err(CaptionerError::FolderUnreadable { .. })));
    }

    #[test]
    fn test_scan_classifies_from_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("b.txt"), "cat").unwrap();
        fs::write(dir.path().join("c.gif"), b"").unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let project = scan(dir.path(), &ScanOptions::default()).unwrap();

        let statuses: Vec<_> = project.entries.iter().map(|e| (e.name.as_str(), e.status)).collect();
        assert_eq!(
            statuses,
            vec![
                ("a.jpg", CaptionStatus::Empty),
                ("b.png", CaptionStatus::Captioned),
                ("c.gif", CaptionStatus::Empty),
            ]
        );
        assert_eq!(project.entries[1].path, dir.path().join("b.png"));
        assert_eq!(project.captioned_count(), 1);
    }

    #[test]
    fn test_classify_reads_caption_file_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        assert_eq!(classify(dir.path(), "a.jpg"), CaptionStatus::Empty);

        fs::write(dir.path().join("a.txt"), "dog").unwrap();
        assert_eq!(classify(dir.path(), "a.jpg"), CaptionStatus::Captioned);
    }
}
