/// Selection controller
///
/// Owns the open project, the Edit Cache and the caption being edited. The UI
/// dispatches intents here and renders what it reads back; no widget state
/// lives in this module.
use std::path::Path;

use super::cache::EditCache;
use super::caption;
use super::data::{CaptionStatus, Entry, Project};
use super::scanner::{self, ScanOptions};
use crate::error::{CaptionerError, Result};

/// Which entry is current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Viewing(usize),
}

/// Text shown in the caption editor plus its modified flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionBuffer {
    pub text: String,
    pub modified: bool,
}

impl CaptionBuffer {
    /// Replace the text as if freshly loaded
    fn load(&mut self, text: String) {
        self.text = text;
        self.modified = false;
    }

    fn clear(&mut self) {
        self.load(String::new());
    }
}

/// Outcome of a successful selection change, for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected {
    pub index: usize,
    /// Name of the previous entry if its edit was moved into the cache
    pub cached_previous: Option<String>,
}

#[derive(Debug, Default)]
pub struct Session {
    project: Option<Project>,
    selection: Selection,
    caption: CaptionBuffer,
    cache: EditCache,
    options: ScanOptions,
}

impl Session {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caption(&self) -> &CaptionBuffer {
        &self.caption
    }

    pub fn cache(&self) -> &EditCache {
        &self.cache
    }

    /// True when a folder is open and lists at least one image
    pub fn has_entries(&self) -> bool {
        self.project
            .as_ref()
            .is_some_and(|project| !project.entries.is_empty())
    }

    pub fn is_editing_enabled(&self) -> bool {
        matches!(self.selection, Selection::Viewing(_))
    }

    /// The current entry, if any
    pub fn current(&self) -> Option<&Entry> {
        match self.selection {
            Selection::Viewing(index) => self.project.as_ref()?.entries.get(index),
            Selection::None => None,
        }
    }

    /// Open `folder`, closing any open project first.
    ///
    /// On a scan failure the session stays closed.
    pub fn open_folder(&mut self, folder: &Path) -> Result<&Project> {
        if self.project.is_some() {
            self.close_folder();
        }

        let project = scanner::scan(folder, &self.options)?;
        log::info!(
            "📂 Opened {} ({} images, {} captioned)",
            folder.display(),
            project.entries.len(),
            project.captioned_count()
        );

        Ok(self.project.insert(project))
    }

    /// Drop the project and return to NoSelection. The cache is kept.
    pub fn close_folder(&mut self) {
        if let Some(project) = self.project.take() {
            log::info!(
                "📁 Closed {} ({} cached edits kept)",
                project.folder.display(),
                self.cache.len()
            );
        }
        self.selection = Selection::None;
        self.caption.clear();
    }

    /// Called for every edit made in the caption editor
    pub fn edit_caption(&mut self, text: impl Into<String>) {
        if !self.is_editing_enabled() {
            return;
        }
        self.caption.text = text.into();
        self.caption.modified = true;
    }

    /// Make entry `index` current.
    ///
    /// A modified, non-empty caption of the previous entry is moved into the
    /// cache first. If the image file is gone nothing changes.
    pub fn select(&mut self, index: usize) -> Result<Selected> {
        let project = self.project.as_ref().ok_or(CaptionerError::NoFolder)?;
        let entry = project
            .entries
            .get(index)
            .ok_or(CaptionerError::IndexOutOfRange {
                index,
                len: project.entries.len(),
            })?;

        if self.selection == Selection::Viewing(index) {
            return Ok(Selected {
                index,
                cached_previous: None,
            });
        }

        if !entry.path.exists() {
            log::warn!("⚠️  Image not found: {}", entry.path.display());
            return Err(CaptionerError::ImageMissing {
                path: entry.path.clone(),
            });
        }

        let cached_previous = self.flush_current();
        self.selection = Selection::Viewing(index);
        self.load_caption(index);

        Ok(Selected {
            index,
            cached_previous,
        })
    }

    /// Select the entry after the current one (the first one if none)
    pub fn select_next(&mut self) -> Result<Selected> {
        let len = self.entry_count()?;
        let index = match self.selection {
            Selection::Viewing(index) => (index + 1).min(len.saturating_sub(1)),
            Selection::None => 0,
        };
        self.select(index)
    }

    /// Select the entry before the current one (the first one if none)
    pub fn select_previous(&mut self) -> Result<Selected> {
        self.entry_count()?;
        let index = match self.selection {
            Selection::Viewing(index) => index.saturating_sub(1),
            Selection::None => 0,
        };
        self.select(index)
    }

    /// Write the editor text to the current entry's caption file.
    ///
    /// The text goes into the cache before the write, so a failed write loses
    /// nothing: the entry is then marked EditedUnsaved and stays modified.
    pub fn save(&mut self) -> Result<CaptionStatus> {
        let index = match self.selection {
            Selection::Viewing(index) => index,
            Selection::None => return Err(CaptionerError::NoSelection),
        };
        let project = self.project.as_mut().ok_or(CaptionerError::NoFolder)?;
        let entry = project
            .entries
            .get_mut(index)
            .ok_or(CaptionerError::NoSelection)?;

        self.cache
            .put(&project.folder, &entry.name, self.caption.text.clone());

        if let Err(e) = caption::write(&entry.caption_path(), &self.caption.text) {
            entry.status = CaptionStatus::EditedUnsaved;
            return Err(e);
        }

        entry.status = CaptionStatus::after_save(&self.caption.text);
        self.caption.modified = false;
        Ok(entry.status)
    }

    fn entry_count(&self) -> Result<usize> {
        let project = self.project.as_ref().ok_or(CaptionerError::NoFolder)?;
        match project.entries.len() {
            0 => Err(CaptionerError::IndexOutOfRange { index: 0, len: 0 }),
            len => Ok(len),
        }
    }

    /// Move a modified, non-empty caption into the cache and clear the editor
    fn flush_current(&mut self) -> Option<String> {
        let Selection::Viewing(index) = self.selection else {
            return None;
        };
        if self.caption.text.is_empty() || !self.caption.modified {
            return None;
        }
        let project = self.project.as_mut()?;
        let entry = project.entries.get_mut(index)?;

        self.cache
            .put(&project.folder, &entry.name, std::mem::take(&mut self.caption.text));
        self.caption.clear();
        entry.status = CaptionStatus::EditedUnsaved;
        log::info!("📝 Caption cached: {}", entry.name);

        Some(entry.name.clone())
    }

    /// Disk first (when non-empty), then cache, then empty
    fn load_caption(&mut self, index: usize) {
        let Some(project) = self.project.as_ref() else {
            return;
        };
        let Some(entry) = project.entries.get(index) else {
            return;
        };

        let on_disk = match caption::read_if_exists(&entry.caption_path()) {
            Ok(text) => text.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️  {}", e);
                None
            }
        };

        let text = on_disk
            .or_else(|| {
                self.cache
                    .get(&project.folder, &entry.name)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        self.caption.load(text);
    }
}
