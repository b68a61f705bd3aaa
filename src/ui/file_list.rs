use iced::widget::{button, container, scrollable, text, Column};
use iced::{Background, Border, Color, Element, Length, Theme};

use crate::state::data::{CaptionStatus, Project};
use crate::state::session::Selection;
use crate::Message;

/// Width of the file list column
pub const LIST_WIDTH: f32 = 260.0;

/// Scrollable list of image names, one colored button per entry
pub fn view(project: Option<&Project>, selection: Selection) -> Element<'_, Message> {
    let Some(project) = project else {
        return container(text("No folder open").size(14))
            .width(Length::Fixed(LIST_WIDTH))
            .height(Length::Fill)
            .center_x(Length::Fixed(LIST_WIDTH))
            .center_y(Length::Fill)
            .into();
    };

    let rows = project.entries.iter().enumerate().map(|(index, entry)| {
        let selected = selection == Selection::Viewing(index);
        button(text(&entry.name).size(14))
            .width(Length::Fill)
            .padding([4, 8])
            .on_press(Message::SelectEntry(index))
            .style(entry_style(entry.status, selected))
            .into()
    });

    scrollable(Column::with_children(rows).spacing(2).padding(4))
        .width(Length::Fixed(LIST_WIDTH))
        .height(Length::Fill)
        .into()
}

/// Status color as background, outlined when current
fn entry_style(
    status: CaptionStatus,
    selected: bool,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, state: button::Status| {
        let base = super::status_color(status);
        let background = match state {
            button::Status::Hovered | button::Status::Pressed => Color { a: 0.8, ..base },
            _ => base,
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color: Color::BLACK,
            border: Border {
                color: if selected { Color::BLACK } else { Color::TRANSPARENT },
                width: if selected { 2.0 } else { 0.0 },
                radius: 3.0.into(),
            },
            ..button::Style::default()
        }
    }
}
