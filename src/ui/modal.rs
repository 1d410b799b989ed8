/// Modal overlays: the add-photo form, sign-in, profile picture and
/// removal confirmation
///
/// Overlays are stacked over the base view; clicking the dimmed
/// backdrop emits `CloseModal`, which is also the "confirmation
/// declined" path for removal.

use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text, text_input};
use iced::{Alignment, Color, Element, Length};

use crate::service::Photo;
use crate::{AddPhotoForm, Message};

/// Stack `overlay` over `base` with a dimmed, click-to-dismiss backdrop.
pub fn modal<'a>(
    base: Element<'a, Message>,
    overlay: Element<'a, Message>,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(overlay)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(Message::CloseModal)
        ),
    ]
    .into()
}

/// The add-photo form, mirroring the service's addPhoto inputs:
/// title, category and image URL.
pub fn add_photo(form: &AddPhotoForm) -> Element<'_, Message> {
    dialog(
        "Add Photo",
        column![
            field("Title", &form.title, Message::PhotoTitleChanged),
            field("Category", &form.category, Message::PhotoCategoryChanged),
            field("Image URL", &form.image_url, Message::PhotoUrlChanged),
            row![
                button(text("Add Photo")).on_press(Message::SubmitPhoto),
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .into(),
    )
}

/// Sign-in prompt: the principal text of the identity to act as.
pub fn sign_in(input: &str) -> Element<'_, Message> {
    dialog(
        "Sign In",
        column![
            field("Principal", input, Message::SignInInputChanged),
            row![
                button(text("Sign In")).on_press(Message::SubmitSignIn),
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .into(),
    )
}

/// Profile picture prompt: a single image URL.
pub fn profile_picture(url: &str) -> Element<'_, Message> {
    dialog(
        "Profile Picture",
        column![
            field("Image URL", url, Message::ProfileUrlChanged),
            row![
                button(text("Save")).on_press(Message::SubmitProfilePicture),
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .into(),
    )
}

/// The removal confirmation. The photo may have vanished under a
/// concurrent refresh; the prompt still renders.
pub fn confirm_remove(photo: Option<&Photo>) -> Element<'_, Message> {
    let prompt = match photo {
        Some(photo) => format!("Remove \"{}\"? This cannot be undone.", photo.title),
        None => "Remove this photo? This cannot be undone.".to_string(),
    };

    dialog(
        "Remove Photo",
        column![
            text(prompt).size(14),
            row![
                button(text("Remove"))
                    .style(button::danger)
                    .on_press(Message::ConfirmRemove),
                button(text("Keep"))
                    .style(button::secondary)
                    .on_press(Message::CloseModal),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .into(),
    )
}

fn dialog<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(22), body].spacing(16))
        .style(container::rounded_box)
        .padding(20)
        .width(Length::Fixed(360.0))
        .into()
}

fn field<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    row![
        text(placeholder).size(13).width(Length::Fixed(90.0)),
        text_input(placeholder, value).on_input(on_input).padding(6),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
