/// Widgets and styles
///
/// Everything here is a pure function of application state that returns an
/// `Element<Message>`; no module below mutates anything.

pub mod dialogs;
pub mod file_list;

use iced::Color;

use crate::state::data::CaptionStatus;

/// List background per caption status
pub fn status_color(status: CaptionStatus) -> Color {
    match status {
        CaptionStatus::Captioned => Color::from_rgb8(0x8d, 0xd4, 0xb2),
        CaptionStatus::Empty => Color::from_rgb8(0xf0, 0x9e, 0xad),
        CaptionStatus::EditedUnsaved => Color::from_rgb8(0xf2, 0xbc, 0x5d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_are_distinct() {
        let green = status_color(CaptionStatus::Captioned);
        let red = status_color(CaptionStatus::Empty);
        let yellow = status_color(CaptionStatus::EditedUnsaved);

        assert_ne!(green, red);
        assert_ne!(red, yellow);
        assert_ne!(green, yellow);
        assert!(green.g > green.r);
    }
}
