//! Home page: a single query box.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::{BOLD, secondary_text};
use crate::message::Message;
use crate::style::widgets::{primary_button_style, search_input_style};

/// Widget id of the home query input, focused when Home is shown.
pub const HOME_QUERY_ID: &str = "home-query";

/// Renders the home page.
pub fn view_home(query: &str) -> Element<'_, Message> {
    let input = text_input("Search threads and documents\u{2026}", query)
        .id(iced::widget::Id::new(HOME_QUERY_ID))
        .width(Length::Fixed(520.0))
        .padding([12, 16])
        .size(16)
        .style(search_input_style)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SubmitQuery);

    let search = button(text("Search").size(15))
        .padding([12, 20])
        .style(primary_button_style)
        .on_press(Message::SubmitQuery);

    let content = column![
        text("Search the archive").size(28).font(BOLD),
        secondary_text("Email threads and documents, ranked by relevance."),
        row![input, search].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
