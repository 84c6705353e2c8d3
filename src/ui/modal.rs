/// Detail overlay
/// Layers the selected entry above the gallery. Clicking the dimmed
/// backdrop or the close control dismisses it.
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, scrollable,
    stack, text, Image,
};
use iced::{Color, Element, Length};

use crate::state::modal::{FullImage, ModalController, ModalState};
use crate::ui::datefmt::DateFormatter;
use crate::Message;

/// Stack the overlay for the open entry (if any) above `base`
pub fn overlay<'a>(
    base: Element<'a, Message>,
    modal: &'a ModalController,
    dates: &DateFormatter,
) -> Element<'a, Message> {
    let ModalState::Open { entry, image } = modal.state() else {
        return base;
    };

    let picture: Element<Message> = match image {
        FullImage::Ready(handle) => Image::new(handle.clone()).width(Length::Fill).into(),
        FullImage::Loading => placeholder("Loading image…"),
        FullImage::Failed(err) => placeholder(format!("Image unavailable: {}", err)),
    };

    let content = container(
        column![
            row![
                horizontal_space(),
                button(text("×").size(24)).on_press(Message::CloseModal),
            ],
            picture,
            text(&entry.title).size(28),
            text(dates.format(entry.date)).size(14),
            scrollable(text(&entry.explanation).size(15)).height(Length::Fixed(180.0)),
        ]
        .spacing(12),
    )
    .max_width(900)
    .padding(20)
    .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(Message::ModalBackdrop)
        )
    ]
    .into()
}

fn placeholder<'a>(label: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    container(text(label).size(14))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(320.0))
        .into()
}
