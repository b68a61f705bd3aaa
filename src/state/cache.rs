/// Edit Cache: captions edited but not yet written
///
/// Keyed by folder and display name, so an edit made in one folder never
/// surfaces for a same-named image in another. Process lifetime only.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct EditCache {
    captions: HashMap<(PathBuf, String), String>,
}

impl EditCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the caption for `name` in `folder`
    pub fn put(&mut self, folder: &Path, name: &str, caption: impl Into<String>) {
        self.captions
            .insert((folder.to_path_buf(), name.to_string()), caption.into());
    }

    pub fn get(&self, folder: &Path, name: &str) -> Option<&str> {
        self.captions
            .get(&(folder.to_path_buf(), name.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}
