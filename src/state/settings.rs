/// Persisted application settings
///
/// A small SQLite key-value table read at startup and written when the user
/// changes a preference. Values are JSON-encoded.
use rusqlite::{Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CaptionerError, Result};

/// Environment variable that points the settings store at another file
pub const ENV_SETTINGS_DB: &str = "CAPTIONER_SETTINGS_DB";

/// Key of the persisted theme name
pub const KEY_THEME: &str = "theme";
/// Key of the image extension override (JSON array of strings)
pub const KEY_IMAGE_EXTENSIONS: &str = "image_extensions";

/// Settings manages the small SQLite key-value file that survives restarts.
/// Values are stored JSON-encoded.
pub struct Settings {
    conn: Connection,
    db_path: PathBuf,
}

impl Settings {
    /// Open the store at its default location, creating it if needed.
    ///
    /// - `$CAPTIONER_SETTINGS_DB` when set
    /// - Linux: ~/.local/share/captioner/settings.db
    /// - macOS: ~/Library/Application Support/captioner/settings.db
    /// - Windows: %APPDATA%\captioner\settings.db
    pub fn open_default() -> Result<Self> {
        let db_path = Self::get_db_path()?;
        Self::open(&db_path)
    }

    /// Open (or create) the store at an explicit path
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CaptionerError::io(parent, e))?;
        }

        let conn = Connection::open(db_path)?;
        log::info!("📁 Settings store at: {}", db_path.display());

        let settings = Settings {
            conn,
            db_path: db_path.to_path_buf(),
        };
        settings.init_schema()?;

        Ok(settings)
    }

    fn get_db_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(ENV_SETTINGS_DB) {
            return Ok(PathBuf::from(path));
        }

        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(CaptionerError::NoDataDir)?;

        path.push("captioner");
        path.push("settings.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the settings file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Read and decode the value stored under `key`
    pub fn load_setting<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Encode and store `value` under `key`, replacing any previous value
    pub fn save_setting<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, json],
        )?;
        log::debug!("Saved setting {} = {}", key, json);
        Ok(())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key() {
        let dir = tempdir().unwrap();
        let settings = Settings::open(&dir.path().join("settings.db")).unwrap();

        let theme: Option<String> = settings.load_setting(KEY_THEME).unwrap();
        assert_eq!(theme, None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("settings.db");

        {
            let settings = Settings::open(&db_path).unwrap();
            settings.save_setting(KEY_THEME, "Light").unwrap();
            settings.save_setting(KEY_THEME, "Nord").unwrap();
            settings
                .save_setting(KEY_IMAGE_EXTENSIONS, &vec!["jpg", "jxl"])
                .unwrap();
        }

        let settings = Settings::open(&db_path).unwrap();
        assert_eq!(settings.path(), db_path.as_path());
        assert_eq!(
            settings.load_setting::<String>(KEY_THEME).unwrap(),
            Some("Nord".to_string())
        );
        assert_eq!(
            settings.load_setting::<Vec<String>>(KEY_IMAGE_EXTENSIONS).unwrap(),
            Some(vec!["jpg".to_string(), "jxl".to_string()])
        );
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let dir = tempdir().unwrap();
        let settings = Settings::open(&dir.path().join("settings.db")).unwrap();
        settings
            .conn
            .execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)",
                rusqlite::params![KEY_THEME, "not json"],
            )
            .unwrap();

        let result = settings.load_setting::<String>(KEY_THEME);
        assert!(matches!(result, Err(CaptionerError::SettingsValue(_))));
    }
}
