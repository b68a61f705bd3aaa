use chrono::Local;
use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, text_editor, Image, Space};
use iced::{Alignment, ContentFit, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::Path;

mod error;
mod state;
mod ui;

use state::scanner::ScanOptions;
use state::session::Session;
use state::settings::{self, Settings};

/// Overlay currently replacing the main panes
#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    None,
    About,
    /// Theme picked but not applied yet
    ThemeChooser(Theme),
}

/// Where arrow keys go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Caption,
}

/// Main application state
struct Captioner {
    /// Project, selection, cache and caption buffer
    session: Session,
    /// Persisted settings; `None` if the store could not be opened
    settings: Option<Settings>,
    theme: Theme,
    /// Widget-side copy of the caption buffer
    editor: text_editor::Content,
    dialog: Dialog,
    focus: Focus,
    /// Status message to display to the user
    status: String,
}

/// Application messages (one per user intent)
#[derive(Debug, Clone)]
pub enum Message {
    OpenFolder,
    CloseFolder,
    Exit,
    SelectEntry(usize),
    SelectNext,
    SelectPrevious,
    CaptionEdited(text_editor::Action),
    SaveCaption,
    ShowAbout,
    ShowThemeChooser,
    ThemePicked(Theme),
    ApplyTheme,
    DismissDialog,
    FocusList,
    FocusCaption,
}

impl Captioner {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = match Settings::open_default() {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("⚠️  Settings unavailable, using defaults: {}", e);
                None
            }
        };

        let theme = settings
            .as_ref()
            .and_then(load_theme)
            .unwrap_or(Theme::Dark);
        let options = settings
            .as_ref()
            .and_then(load_scan_options)
            .unwrap_or_default();

        log::info!("🎨 Captioner initialized (theme: {})", theme);

        (
            Captioner {
                session: Session::new(options),
                settings,
                theme,
                editor: text_editor::Content::new(),
                dialog: Dialog::None,
                focus: Focus::List,
                status: "Ready".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Directory")
                    .pick_folder();

                match folder {
                    Some(folder) => self.open_folder(&folder),
                    None => log::info!("No folder was selected"),
                }
            }
            Message::CloseFolder => {
                self.session.close_folder();
                self.sync_editor();
                self.status = "Ready".to_string();
            }
            Message::Exit => return iced::exit(),
            Message::SelectEntry(index) => {
                self.focus = Focus::List;
                self.select(|session| session.select(index));
            }
            Message::SelectNext => {
                if self.arrows_drive_list() {
                    self.select(Session::select_next);
                }
            }
            Message::SelectPrevious => {
                if self.arrows_drive_list() {
                    self.select(Session::select_previous);
                }
            }
            Message::CaptionEdited(action) => {
                self.focus = Focus::Caption;
                let is_edit = action.is_edit();
                self.editor.perform(action);
                if is_edit {
                    self.session.edit_caption(editor_text(&self.editor));
                }
            }
            Message::SaveCaption => self.save_caption(),
            Message::ShowAbout => self.dialog = Dialog::About,
            Message::ShowThemeChooser => {
                self.dialog = Dialog::ThemeChooser(self.theme.clone());
            }
            Message::ThemePicked(theme) => {
                if let Dialog::ThemeChooser(pending) = &mut self.dialog {
                    *pending = theme;
                }
            }
            Message::ApplyTheme => {
                if let Dialog::ThemeChooser(theme) = std::mem::replace(&mut self.dialog, Dialog::None) {
                    self.apply_theme(theme);
                }
            }
            Message::DismissDialog => {
                log::debug!("Dialog dismissed");
                self.dialog = Dialog::None;
            }
            Message::FocusList => {
                log::info!("Focus: file list");
                self.focus = Focus::List;
            }
            Message::FocusCaption => {
                log::info!("Focus: caption editor");
                self.focus = Focus::Caption;
            }
        }

        Task::none()
    }

    /// Arrow keys move the selection only while the list has focus and entries
    fn arrows_drive_list(&self) -> bool {
        self.focus == Focus::List && self.session.has_entries()
    }

    fn open_folder(&mut self, folder: &Path) {
        log::info!("Opening folder: {}", folder.display());
        self.status = match self.session.open_folder(folder) {
            Ok(project) => format!(
                "{}: {} images, {} captioned",
                folder.display(),
                project.entries.len(),
                project.captioned_count()
            ),
            Err(e) => {
                log::warn!("⚠️  {}", e);
                format!("Could not open folder: {}", e)
            }
        };
        self.sync_editor();
    }

    /// Run a selection intent and refresh the editor and status line
    fn select(
        &mut self,
        intent: impl FnOnce(&mut Session) -> error::Result<state::session::Selected>,
    ) {
        match intent(&mut self.session) {
            Ok(selected) => {
                self.sync_editor();
                self.status = self.describe_current(selected.cached_previous.as_deref());
            }
            Err(e) => {
                log::warn!("⚠️  {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn save_caption(&mut self) {
        match self.session.save() {
            Ok(_) => {
                let saved = self
                    .session
                    .current()
                    .map(|entry| entry.caption_path())
                    .and_then(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
                    .unwrap_or_default();
                self.status = format!("Saved {} at {}", saved, Local::now().format("%H:%M:%S"));
            }
            Err(e) => {
                log::error!("❌ Save failed: {}", e);
                self.status = format!("Caption NOT saved: {}", e);
            }
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        log::info!("🎨 Theme: {}", theme);
        if let Some(store) = &self.settings {
            if let Err(e) = store.save_setting(settings::KEY_THEME, &theme.to_string()) {
                log::warn!("⚠️  Cannot persist theme: {}", e);
            }
        }
        self.theme = theme;
    }

    /// Copy the session's caption buffer into the widget
    fn sync_editor(&mut self) {
        self.editor = text_editor::Content::with_text(&self.session.caption().text);
    }

    fn describe_current(&self, cached_previous: Option<&str>) -> String {
        let Some(entry) = self.session.current() else {
            return "Ready".to_string();
        };

        let mut status = match image::image_dimensions(&entry.path) {
            Ok((width, height)) => format!("{} | {}×{}", entry.name, width, height),
            Err(e) => {
                log::debug!("No dimensions for {}: {}", entry.name, e);
                entry.name.clone()
            }
        };
        if let Some(previous) = cached_previous {
            status.push_str(&format!(" | unsaved caption of {} kept", previous));
        }
        status
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let project_open = self.session.project().is_some();

        let toolbar = row![
            button("Open Folder").on_press(Message::OpenFolder),
            button("Close Folder").on_press_maybe(project_open.then_some(Message::CloseFolder)),
            button("Theme…").on_press(Message::ShowThemeChooser),
            button("About").on_press(Message::ShowAbout),
            Space::with_width(Length::Fill),
            button("Exit").on_press(Message::Exit),
        ]
        .spacing(8)
        .padding(8);

        let body: Element<Message> = match &self.dialog {
            Dialog::About => ui::dialogs::about(),
            Dialog::ThemeChooser(pending) => ui::dialogs::theme_chooser(pending),
            Dialog::None => row![
                ui::file_list::view(self.session.project(), self.session.selection()),
                self.caption_pane(),
            ]
            .spacing(8)
            .into(),
        };

        column![toolbar, body].padding(4).into()
    }

    fn caption_pane(&self) -> Element<Message> {
        let viewport: Element<Message> = match self.session.current() {
            Some(entry) => Image::new(Handle::from_path(&entry.path))
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text("Select an image to caption").size(16))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let mut editor = text_editor(&self.editor)
            .placeholder("Caption…")
            .height(Length::Fixed(140.0));
        if self.session.is_editing_enabled() {
            editor = editor.on_action(Message::CaptionEdited);
        }

        let save = button("Save Caption")
            .on_press_maybe(self.session.is_editing_enabled().then_some(Message::SaveCaption))
            .padding(10);

        column![
            viewport,
            editor,
            row![save, text(&self.status).size(14)]
                .spacing(16)
                .align_y(Alignment::Center),
        ]
        .spacing(8)
        .padding(8)
        .width(Length::Fill)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(shortcut)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

/// Keyboard shortcuts. Only keys not captured by a focused widget arrive here.
fn shortcut(key: Key, modifiers: Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(key::Named::ArrowLeft) if modifiers.control() && modifiers.alt() => {
            Some(Message::FocusList)
        }
        Key::Named(key::Named::ArrowRight) if modifiers.control() && modifiers.alt() => {
            Some(Message::FocusCaption)
        }
        Key::Named(key::Named::ArrowDown) if modifiers.is_empty() => Some(Message::SelectNext),
        Key::Named(key::Named::ArrowUp) if modifiers.is_empty() => Some(Message::SelectPrevious),
        Key::Character("s") if modifiers.command() => Some(Message::SaveCaption),
        _ => None,
    }
}

/// Editor text without the trailing newline `Content::text` appends
fn editor_text(content: &text_editor::Content) -> String {
    content
        .lines()
        .enumerate()
        .fold(String::new(), |mut text, (i, line)| {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line);
            text
        })
}

fn load_theme(store: &Settings) -> Option<Theme> {
    let name = match store.load_setting::<String>(settings::KEY_THEME) {
        Ok(name) => name?,
        Err(e) => {
            log::warn!("⚠️  Cannot read theme setting: {}", e);
            return None;
        }
    };

    let theme = Theme::ALL.iter().find(|t| t.to_string() == name).cloned();
    if theme.is_none() {
        log::warn!("⚠️  Unknown theme in settings: {}", name);
    }
    theme
}

fn load_scan_options(store: &Settings) -> Option<ScanOptions> {
    match store.load_setting::<Vec<String>>(settings::KEY_IMAGE_EXTENSIONS) {
        Ok(extensions) => extensions.map(ScanOptions::with_extensions),
        Err(e) => {
            log::warn!("⚠️  Cannot read image extensions setting: {}", e);
            None
        }
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(ui::dialogs::APP_NAME, Captioner::update, Captioner::view)
        .theme(Captioner::theme)
        .subscription(Captioner::subscription)
        .window_size((1100.0, 720.0))
        .centered()
        .run_with(Captioner::new)
}
