//! Hit card shared by the results list and the assistant's sources.

use iced::widget::{Row, button, column, container, row, text};
use iced::{Alignment, Element, Length};
use vetus_core::{CardKind, HitCard};

use super::{SEMIBOLD, pill, secondary_text};
use crate::message::Message;
use crate::style::widgets::{card_style, link_button_style};

/// Renders one hit card. Clicking the title opens its target in a new window.
pub fn view_card(card: &HitCard) -> Element<'_, Message> {
    let kind = match card.kind {
        CardKind::Thread => "Thread",
        CardKind::Document => "Document",
    };

    let title_text = text(&card.title).size(16).font(SEMIBOLD);
    let title: Element<'_, Message> = match &card.link {
        Some(route) => button(title_text)
            .padding([2, 4])
            .style(link_button_style)
            .on_press(Message::OpenInNewWindow(route.clone()))
            .into(),
        None => title_text.into(),
    };

    let mut heading = row![pill(kind), title]
        .spacing(8)
        .align_y(Alignment::Center);
    if let Some(score) = &card.score {
        heading = heading
            .push(iced::widget::Space::new().width(Length::Fill))
            .push(pill(score));
    }

    let mut body = column![heading].spacing(6);
    if !card.snippet.is_empty() {
        body = body.push(text(&card.snippet).size(14));
    }
    if !card.meta.is_empty() {
        let meta = Row::with_children(card.meta.iter().map(|item| secondary_text(item).size(12).into()))
            .spacing(12);
        body = body.push(meta);
    }

    container(body)
        .padding([12, 16])
        .width(Length::Fill)
        .style(card_style)
        .into()
}
