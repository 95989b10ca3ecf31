//! Assistant pane.

use iced::widget::{Column, button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};
use vetus_core::{AssistantReply, ChatTurn, TurnState};

use super::card::view_card;
use super::{SEMIBOLD, error_text, secondary_text};
use crate::message::Message;
use crate::model::ChatState;
use crate::style::widgets::{
    assistant_bubble_style, primary_button_style, scrollable_style, search_input_style,
    user_bubble_style,
};

/// Renders the transcript and the input row.
pub fn view_chat(state: &ChatState) -> Element<'_, Message> {
    let transcript: Element<'_, Message> = if state.turns.is_empty() {
        container(secondary_text(
            "Ask a question about the archive. Answers cite the threads and documents they used.",
        ))
        .padding(24)
        .center_x(Length::Fill)
        .into()
    } else {
        Column::with_children(state.turns.iter().map(view_turn))
            .spacing(16)
            .padding([16, 24])
            .into()
    };

    let input = text_input("Ask the archive\u{2026}", &state.input)
        .padding([12, 16])
        .style(search_input_style)
        .on_input(Message::ChatInputChanged)
        .on_submit(Message::ChatSubmit);
    let send = button(text("Send").size(14))
        .padding([12, 20])
        .style(primary_button_style)
        .on_press(Message::ChatSubmit);

    column![
        scrollable(transcript)
            .height(Length::Fill)
            .style(scrollable_style),
        row![input, send]
            .spacing(8)
            .padding([12, 24])
            .align_y(Alignment::Center),
    ]
    .height(Length::Fill)
    .into()
}

fn view_turn(turn: &ChatTurn) -> Element<'_, Message> {
    let question = container(
        container(text(&turn.question).size(14))
            .padding([10, 14])
            .max_width(640)
            .style(user_bubble_style),
    )
    .width(Length::Fill)
    .align_right(Length::Fill);

    let mut bubble = Column::new().spacing(10);
    if let Some(query) = &turn.query {
        bubble = bubble.push(secondary_text(format!("Searching for: {query}")).size(12));
    }
    bubble = match &turn.state {
        TurnState::AwaitingRewrite | TurnState::AwaitingAnswer => {
            bubble.push(secondary_text("Thinking\u{2026}"))
        }
        TurnState::Rendered(reply) => bubble.push(view_reply(reply)),
        TurnState::Errored(message) => bubble.push(error_text(message.as_str())),
    };

    let answer = container(bubble)
        .padding([12, 16])
        .max_width(760)
        .style(assistant_bubble_style);

    column![question, answer].spacing(8).into()
}

fn view_reply(reply: &AssistantReply) -> Element<'_, Message> {
    let paragraphs = Column::with_children(reply.paragraphs.iter().map(|lines| {
        Column::with_children(lines.iter().map(|line| text(line).size(14).into()))
            .spacing(2)
            .into()
    }))
    .spacing(10);

    let mut content = column![paragraphs].spacing(12);
    if !reply.sources.is_empty() {
        let sources = Column::with_children(reply.sources.iter().map(view_card))
            .spacing(8);
        content = content.push(column![text("Sources").size(13).font(SEMIBOLD), sources].spacing(6));
    }
    content.into()
}
