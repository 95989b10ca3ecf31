//! Thread page with per-email disclosure items.

use iced::widget::{Column, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Font, Length};
use vetus_core::EmailDetail;

use super::{BOLD, SEMIBOLD, error_text, pill, secondary_text};
use crate::message::Message;
use crate::model::{EmailItem, EmailLoad, ThreadState, ThreadStatus};
use crate::style::widgets::{
    block_style, body_text_style, email_item_style, link_button_style, scrollable_style,
    secondary_button_style,
};

/// Renders the thread page.
pub fn view_thread(state: &ThreadState) -> Element<'_, Message> {
    let mut content = column![text(state.title()).size(24).font(BOLD)].spacing(14);

    if let ThreadStatus::Loaded(detail) = &state.status {
        if let Some(topic) = detail.topic_block() {
            content = content.push(labeled_block("Topic", topic));
        }
        if let Some(summary) = detail.summary_block() {
            content = content.push(labeled_block("Summary", summary));
        }

        let controls = row![
            button(text("Expand all").size(13))
                .padding([6, 12])
                .style(secondary_button_style)
                .on_press(Message::ExpandAll),
            button(text("Collapse all").size(13))
                .padding([6, 12])
                .style(secondary_button_style)
                .on_press(Message::CollapseAll),
        ]
        .spacing(8);
        content = content.push(controls);

        let emails = Column::with_children(
            state
                .emails
                .iter()
                .enumerate()
                .map(|(index, item)| view_email(index, item)),
        )
        .spacing(8);
        content = content.push(emails);
    } else if matches!(state.status, ThreadStatus::Loading) {
        content = content.push(secondary_text("Loading emails\u{2026}"));
    }

    container(
        scrollable(container(content.max_width(900)).padding([20, 24]).center_x(Length::Fill))
            .height(Length::Fill)
            .style(scrollable_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn labeled_block<'a>(label: &'a str, body: &'a str) -> Element<'a, Message> {
    container(column![text(label).size(13).font(SEMIBOLD), text(body).size(14)].spacing(6))
        .padding([10, 14])
        .width(Length::Fill)
        .style(block_style)
        .into()
}

fn view_email(index: usize, item: &EmailItem) -> Element<'_, Message> {
    let chevron = if item.open { "\u{25BE}" } else { "\u{25B8}" };
    let summary = button(
        row![
            text(chevron).size(14),
            pill(item.id.as_str()),
            secondary_text(item.date_label()),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([8, 10])
    .style(link_button_style)
    .on_press(Message::ToggleEmail(index));

    let mut body = column![summary].spacing(8);
    if item.open {
        let details: Element<'_, Message> = match &item.load {
            EmailLoad::Loading => secondary_text("Loading\u{2026}").into(),
            EmailLoad::Failed => error_text("Failed to load email.").into(),
            EmailLoad::Loaded(email) => view_email_detail(email),
        };
        body = body.push(container(details).padding([0, 12]));
    }

    container(body)
        .padding([4, 4])
        .width(Length::Fill)
        .style(email_item_style)
        .into()
}

fn view_email_detail(email: &EmailDetail) -> Element<'_, Message> {
    let mut details = Column::new().spacing(8);

    for (label, value) in email.header_fields() {
        details = details.push(
            row![
                secondary_text(format!("{label}:")).font(SEMIBOLD),
                text(value).size(13),
            ]
            .spacing(6),
        );
    }

    if let Some(body) = &email.body {
        details = details.push(
            container(text(body).size(13).font(Font::MONOSPACE))
                .padding(12)
                .width(Length::Fill)
                .style(body_text_style),
        );
    }

    if !email.attachments.is_empty() {
        let attachments = Column::with_children(
            email
                .attachments
                .iter()
                .map(|name| text(format!("\u{1F4CE} {name}")).size(13).into()),
        )
        .spacing(4);
        details = details.push(column![text("Attachments").size(13).font(SEMIBOLD), attachments].spacing(4));
    }

    details.into()
}
