/// Feed rendering: photo cards in grid, list or tile layout

use std::collections::HashMap;

use iced::widget::{button, column, container, image, row, text, text_input, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::service::{Photo, PhotoId};
use crate::state::feed::Feed;
use crate::state::prefs::DisplayMode;
use crate::state::session::Session;
use crate::Message;

/// Card width in the grid layout.
const GRID_CARD_WIDTH: f32 = 300.0;
/// Tile width in the tile layout.
const TILE_WIDTH: f32 = 180.0;

/// Decoded images keyed by URL. Misses render as a placeholder.
pub type ImageCache = HashMap<String, image::Handle>;

/// Build the feed body for the active display mode.
pub fn feed_view<'a>(
    feed: &'a Feed,
    mode: DisplayMode,
    session: &'a Session,
    images: &'a ImageCache,
    drafts: &'a HashMap<PhotoId, String>,
) -> Element<'a, Message> {
    if feed.photos().is_empty() {
        let notice = if feed.loading {
            "Loading photos..."
        } else {
            "No photos here yet."
        };
        return container(text(notice).size(18))
            .width(Length::Fill)
            .padding(40)
            .center_x(Length::Fill)
            .into();
    }

    match mode {
        DisplayMode::Grid => wrap_of(
            feed.photos()
                .iter()
                .map(|photo| {
                    sized(
                        card(photo, session, images, draft_for(drafts, photo.id)),
                        GRID_CARD_WIDTH,
                    )
                })
                .collect(),
        ),
        DisplayMode::List => feed
            .photos()
            .iter()
            .fold(Column::new().spacing(16), |col, photo| {
                col.push(card(photo, session, images, draft_for(drafts, photo.id)))
            })
            .width(Length::Fill)
            .into(),
        DisplayMode::Tile => wrap_of(
            feed.photos()
                .iter()
                .map(|photo| sized(tile(photo, session, images), TILE_WIDTH))
                .collect(),
        ),
    }
}

fn draft_for(drafts: &HashMap<PhotoId, String>, id: PhotoId) -> &str {
    drafts.get(&id).map(String::as_str).unwrap_or("")
}

fn wrap_of(elements: Vec<Element<'_, Message>>) -> Element<'_, Message> {
    Wrap::with_elements(elements)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn sized(element: Element<'_, Message>, width: f32) -> Element<'_, Message> {
    container(element).width(Length::Fixed(width)).into()
}

/// A full photo card: header, image, actions, comments, comment box.
fn card<'a>(
    photo: &'a Photo,
    session: &'a Session,
    images: &ImageCache,
    draft: &'a str,
) -> Element<'a, Message> {
    let header = row![
        avatar(photo.creator.initial()),
        column![
            text(&photo.title).size(16),
            text(format!("{} · {}", photo.category, photo.created_at_label())).size(12),
        ]
        .spacing(2),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut actions = row![like_button(photo, session)]
        .spacing(8)
        .align_y(Alignment::Center);
    if session.owns(photo) {
        actions = actions.push(
            button(text("Remove").size(13))
                .style(button::danger)
                .padding(6)
                .on_press(Message::RemovePressed(photo.id)),
        );
    }

    let mut body = column![
        header,
        photo_image(&photo.image_url, images, 194.0),
        actions,
    ]
    .spacing(10);

    if !photo.comments.is_empty() {
        body = body.push(comments(photo));
    }

    let id = photo.id;
    body = body.push(
        row![
            text_input("Add a comment...", draft)
                .size(13)
                .padding(6)
                .on_input(move |content| Message::DraftChanged(id, content))
                .on_submit(Message::SubmitComment(id)),
            button(text("Post").size(13))
                .padding(6)
                .on_press(Message::SubmitComment(id)),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    );

    container(body)
        .style(container::rounded_box)
        .padding(12)
        .width(Length::Fill)
        .into()
}

/// A compact image-first tile: no comments, just the picture and likes.
fn tile<'a>(
    photo: &'a Photo,
    session: &'a Session,
    images: &ImageCache,
) -> Element<'a, Message> {
    let body = column![
        photo_image(&photo.image_url, images, 140.0),
        row![
            text(&photo.title).size(13).width(Length::Fill),
            like_button(photo, session),
        ]
        .spacing(4)
        .align_y(Alignment::Center),
    ]
    .spacing(6);

    container(body)
        .style(container::rounded_box)
        .padding(8)
        .width(Length::Fill)
        .into()
}

/// The like control. Disabled once the signed-in user appears in the
/// photo's liked-by set; an unauthenticated press stays enabled so the
/// reducer can answer with a sign-in notice.
fn like_button<'a>(photo: &Photo, session: &Session) -> Element<'a, Message> {
    let already = session.has_liked(photo);
    let heart = if already { "♥" } else { "♡" };
    let label = text(format!("{heart} {}", photo.likes)).size(14);

    let mut like = button(label).style(button::text).padding(4);
    if !already {
        like = like.on_press(Message::LikePressed(photo.id));
    }
    like.into()
}

fn comments(photo: &Photo) -> Element<'_, Message> {
    photo
        .comments
        .iter()
        .fold(Column::new().spacing(4), |col, comment| {
            col.push(
                text(format!("{}: {}", comment.author, comment.content)).size(13),
            )
        })
        .into()
}

fn photo_image<'a>(url: &str, images: &ImageCache, height: f32) -> Element<'a, Message> {
    match images.get(url) {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into(),
        None => container(text("· · ·").size(14))
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into(),
    }
}

/// Round-ish badge showing the creator's leading character, matching
/// the service's avatar convention.
fn avatar<'a>(initial: char) -> Element<'a, Message> {
    container(text(initial.to_uppercase().to_string()).size(16))
        .style(container::rounded_box)
        .padding(8)
        .into()
}
