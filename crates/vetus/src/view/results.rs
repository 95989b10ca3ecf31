//! Results page.

use iced::widget::{Column, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use super::card::view_card;
use super::{SEMIBOLD, error_text};
use crate::message::Message;
use crate::model::{ResultsState, ResultsStatus};
use crate::style::widgets::{primary_button_style, scrollable_style, search_input_style};

/// Renders the results page with the query field pre-filled.
pub fn view_results<'a>(state: &'a ResultsState, query_input: &'a str) -> Element<'a, Message> {
    let input = text_input("Search threads and documents\u{2026}", query_input)
        .padding([10, 14])
        .style(search_input_style)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SubmitQuery);
    let search = button(text("Search").size(14))
        .padding([10, 18])
        .style(primary_button_style)
        .on_press(Message::SubmitQuery);

    let summary: Element<'_, Message> = match &state.status {
        ResultsStatus::Failed(_) => error_text(state.summary()).into(),
        _ => text(state.summary()).size(15).font(SEMIBOLD).into(),
    };

    let cards = Column::with_children(state.cards.iter().map(view_card))
        .spacing(10)
        .padding([0, 4]);

    let content = column![
        row![input, search].spacing(8).align_y(Alignment::Center),
        summary,
        scrollable(cards).height(Length::Fill).style(scrollable_style),
    ]
    .spacing(14)
    .max_width(900);

    container(content)
        .padding([20, 24])
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .into()
}
