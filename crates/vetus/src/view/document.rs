//! Document page for a staged document hit.

use iced::widget::{Column, button, column, container, row, scrollable, text};
use iced::{Element, Length};

use super::{BOLD, SEMIBOLD, error_text, secondary_text};
use crate::message::Message;
use crate::model::{DocumentState, DocumentStatus};
use crate::style::widgets::{block_style, primary_button_style, scrollable_style};

/// Renders the document page.
pub fn view_document(state: &DocumentState) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &state.status {
        DocumentStatus::Loading => secondary_text("Loading\u{2026}").into(),
        DocumentStatus::Missing => text("Document not found").size(24).font(BOLD).into(),
        DocumentStatus::Loaded(record) => {
            let mut facts = Column::new()
                .spacing(4)
                .push(fact("Source", record.source.clone()));
            if let Some(page) = record.page {
                facts = facts.push(fact("Page", page.to_string()));
            }
            if let Some(index) = record.paragraph_index {
                facts = facts.push(fact("Paragraph", index.to_string()));
            }

            let open = button(text("Open location").size(14))
                .padding([8, 16])
                .style(primary_button_style)
                .on_press(Message::OpenLocation);
            let open_status: Element<'_, Message> = match &state.open_status {
                None => iced::widget::Space::new().width(0).into(),
                Some(Ok(())) => secondary_text("Opened on the archive host.").into(),
                Some(Err(e)) => error_text(format!("Could not open location: {e}")).into(),
            };

            column![
                text(&record.doc_name).size(24).font(BOLD),
                facts,
                container(text(&record.paragraph).size(15))
                    .padding([12, 16])
                    .width(Length::Fill)
                    .style(block_style),
                row![open, open_status]
                    .spacing(12)
                    .align_y(iced::Alignment::Center),
            ]
            .spacing(14)
            .into()
        }
    };

    scrollable(
        container(container(content).max_width(900))
            .padding([20, 24])
            .center_x(Length::Fill),
    )
    .height(Length::Fill)
    .style(scrollable_style)
    .into()
}

fn fact(label: &str, value: String) -> Element<'_, Message> {
    row![
        secondary_text(format!("{label}:")).font(SEMIBOLD),
        text(value).size(13),
    ]
    .spacing(6)
    .into()
}
