/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the caption core and the UI layer.
use std::path::{Path, PathBuf};

/// Caption state of one listed image, shown as the list entry's color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionStatus {
    /// A non-empty caption file exists on disk
    Captioned,
    /// No caption file, or an empty one
    Empty,
    /// The Edit Cache holds text that has not been written yet
    EditedUnsaved,
}

impl CaptionStatus {
    /// Scan-time status: a non-empty caption file is Captioned, anything
    /// else (missing or empty file) is Empty
    pub fn from_disk(on_disk: Option<&str>) -> Self {
        match on_disk {
            Some(text) if !text.is_empty() => CaptionStatus::Captioned,
            _ => CaptionStatus::Empty,
        }
    }

    /// Status right after a save of `caption`
    pub fn after_save(caption: &str) -> Self {
        if caption.is_empty() {
            CaptionStatus::Empty
        } else {
            CaptionStatus::Captioned
        }
    }
}

/// Represents a single image in the open folder
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Filename only (e.g., "IMG_0001.jpg"), unique within the folder
    pub name: String,
    /// Full path to the image file
    pub path: PathBuf,
    pub status: CaptionStatus,
}

impl Entry {
    /// Sibling caption file: same base name, `.txt` extension
    pub fn caption_path(&self) -> PathBuf {
        caption_path_for(&self.path)
    }
}

/// `dir/name.ext` -> `dir/name.txt`
pub fn caption_path_for(image: &Path) -> PathBuf {
    image.with_extension("txt")
}

/// The open folder and its listed images
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Absolute folder path
    pub folder: PathBuf,
    /// Entries in listing order
    pub entries: Vec<Entry>,
}

impl Project {
    pub fn captioned_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == CaptionStatus::Captioned)
            .count()
    }
}
