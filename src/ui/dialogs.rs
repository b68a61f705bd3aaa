/// About and theme dialogs, drawn in place of the main panes
use iced::widget::{button, column, container, pick_list, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::Message;

pub const APP_NAME: &str = "Captioner";

pub fn about() -> Element<'static, Message> {
    let content = column![
        text(format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"))).size(32),
        text("A captioning tool for image datasets.").size(16),
        text(format!("Author: {}", env!("CARGO_PKG_AUTHORS"))).size(14),
        button("Close").on_press(Message::DismissDialog).padding(10),
    ]
    .spacing(16)
    .padding(40)
    .align_x(Alignment::Center);

    centered(content)
}

/// Theme chooser; `pending` is applied only on Apply
pub fn theme_chooser(pending: &Theme) -> Element<'_, Message> {
    let content = column![
        text("Choose Theme").size(24),
        pick_list(Theme::ALL, Some(pending), Message::ThemePicked).width(Length::Fixed(240.0)),
        row![
            button("Apply").on_press(Message::ApplyTheme).padding(10),
            button("Cancel").on_press(Message::DismissDialog).padding(10),
        ]
        .spacing(12),
    ]
    .spacing(16)
    .padding(40)
    .align_x(Alignment::Center);

    centered(content)
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
