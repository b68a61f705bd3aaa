/// State management module
///
/// This module owns everything that is not a widget:
/// - Shared data structures (data.rs)
/// - Folder scanning and status classification (scanner.rs)
/// - Caption file reads and writes (caption.rs)
/// - The unsaved-edit cache (cache.rs)
/// - The selection controller the UI dispatches intents to (session.rs)
/// - The persisted key-value settings (settings.rs)

pub mod cache;
pub mod caption;
pub mod data;
pub mod scanner;
pub mod session;
pub mod settings;
