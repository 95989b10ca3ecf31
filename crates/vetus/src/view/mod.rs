//! View components for the application.

mod card;
mod chat;
mod document;
mod header;
mod home;
mod results;
mod thread;

pub use chat::view_chat;
pub use document::view_document;
pub use header::{HeaderProps, view_header};
pub use home::{HOME_QUERY_ID, view_home};
pub use results::view_results;
pub use thread::view_thread;

use iced::widget::{Text, container, text};
use iced::{Element, Font};

use crate::message::Message;
use crate::style::widgets::{palette, pill_style};

const BOLD: Font = Font {
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

const SEMIBOLD: Font = Font {
    weight: iced::font::Weight::Semibold,
    ..Font::DEFAULT
};

/// Text in the secondary color.
fn secondary_text<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    text(content).size(13).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    })
}

/// Text in the error color.
fn error_text<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    text(content).size(14).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.accent_red),
        }
    })
}

/// Rounded pill around short text.
fn pill<'a>(content: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    container(text(content).size(11).font(SEMIBOLD))
        .padding([2, 8])
        .style(pill_style)
        .into()
}
