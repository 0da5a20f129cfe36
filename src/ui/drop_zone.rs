use iced::widget::image::{Handle, Image};
use iced::widget::{container, text};
use iced::{Border, Color, ContentFit, Element, Length, Theme};

use crate::state::data::CurrentImage;
use crate::Message;

const IDLE_BORDER: Color = Color::from_rgb(0.67, 0.67, 0.67);
const HOVER_BORDER: Color = Color::from_rgb(0.35, 0.65, 1.0);

/// Tracks one drag-and-drop gesture over the window.
///
/// Dropping several files delivers one drop event per file; only the first
/// one of a gesture is taken. A new gesture starts with the next hover.
#[derive(Debug, Clone, Default)]
pub struct DropTracker {
    hovering: bool,
    taken: bool,
}

impl DropTracker {
    /// A file entered the window
    pub fn hover(&mut self) {
        if !self.hovering {
            self.hovering = true;
            self.taken = false;
        }
    }

    /// The dragged files left without being dropped
    pub fn leave(&mut self) {
        self.hovering = false;
        self.taken = false;
    }

    /// A file was dropped; true if it should become the current image
    pub fn accept(&mut self) -> bool {
        self.hovering = false;
        !std::mem::replace(&mut self.taken, true)
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}

/// Drop target showing the current image, or a hint when none is loaded
///
/// Drops themselves arrive as window events (see `LaserDisplay::subscription`);
/// this only renders.
pub fn view<'a>(image: Option<&CurrentImage>, hovering: bool) -> Element<'a, Message> {
    let content: Element<'a, Message> = match image {
        Some(image) => Image::new(Handle::from_path(&image.path))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text("\n\n Drop Display Here \n\n").size(18).into(),
    };

    let border_color = if hovering { HOVER_BORDER } else { IDLE_BORDER };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(8)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            border: Border {
                color: border_color,
                width: 2.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_file_of_multi_drop_wins() {
        let mut tracker = DropTracker::default();
        tracker.hover();
        tracker.hover();

        assert!(tracker.accept());
        assert!(!tracker.accept());
        assert!(!tracker.is_hovering());
    }

    #[test]
    fn test_next_gesture_accepts_again() {
        let mut tracker = DropTracker::default();
        tracker.hover();
        assert!(tracker.accept());

        tracker.hover();
        assert!(tracker.is_hovering());
        assert!(tracker.accept());
    }

    #[test]
    fn test_leave_resets_gesture() {
        let mut tracker = DropTracker::default();
        tracker.hover();
        tracker.leave();

        assert!(!tracker.is_hovering());
        tracker.hover();
        assert!(tracker.accept());
    }
}
