//! Header/toolbar view component.

use iced::widget::{Row, button, container, row, text};
use iced::{Alignment, Element, Length};
use vetus_core::Route;

use super::{BOLD, error_text, secondary_text};
use crate::message::{Message, Pane};
use crate::style::widgets::{
    ThemeMode, header_style, link_button_style, palette, secondary_button_style,
    tab_button_style,
};

/// Everything the header shows.
pub struct HeaderProps<'a> {
    /// Active pane.
    pub pane: Pane,
    /// Whether history can move back.
    pub can_go_back: bool,
    /// Whether history can move forward.
    pub can_go_forward: bool,
    /// Index freshness, or the error fetching it. `None` while checking.
    pub index_status: Option<&'a Result<String, String>>,
    /// Whether a rebuild is in flight.
    pub rebuilding: bool,
    /// Outcome of the last rebuild.
    pub rebuild_note: Option<&'a str>,
    /// Current theme.
    pub theme_mode: ThemeMode,
}

/// Renders the application header.
pub fn view_header(props: HeaderProps<'_>) -> Element<'_, Message> {
    let title = button(text("Vetus").size(22).font(BOLD).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.primary),
        }
    }))
    .padding([2, 6])
    .style(link_button_style)
    .on_press(Message::Navigate(Route::Home));

    let back = button(text("\u{2190}").size(16))
        .padding([6, 10])
        .style(secondary_button_style)
        .on_press_maybe(props.can_go_back.then_some(Message::Back));
    let forward = button(text("\u{2192}").size(16))
        .padding([6, 10])
        .style(secondary_button_style)
        .on_press_maybe(props.can_go_forward.then_some(Message::Forward));

    let browse_tab = button(text("Browse").size(14))
        .padding([6, 14])
        .style(tab_button_style(props.pane == Pane::Browse))
        .on_press(Message::ShowPane(Pane::Browse));
    let assistant_tab = button(text("Assistant").size(14))
        .padding([6, 14])
        .style(tab_button_style(props.pane == Pane::Assistant))
        .on_press(Message::ShowPane(Pane::Assistant));

    let status: Element<'_, Message> = match props.index_status {
        None => secondary_text("Checking index\u{2026}").into(),
        Some(Ok(updated)) => secondary_text(format!("Index updated: {updated}")).into(),
        Some(Err(e)) => error_text(format!("Index status unavailable: {e}")).size(13).into(),
    };

    let rebuild_label = if props.rebuilding {
        "Rebuilding\u{2026}"
    } else {
        "Rebuild index"
    };
    let rebuild = button(text(rebuild_label).size(13))
        .padding([6, 12])
        .style(secondary_button_style)
        .on_press_maybe((!props.rebuilding).then_some(Message::RebuildIndex));

    let theme_icon = match props.theme_mode {
        ThemeMode::Light => "\u{263E}",
        ThemeMode::Dark => "\u{2600}",
    };
    let theme_toggle = button(text(theme_icon).size(16))
        .padding([6, 10])
        .style(secondary_button_style)
        .on_press(Message::ToggleTheme);

    let mut content: Row<'_, Message> = row![
        back,
        forward,
        title,
        iced::widget::Space::new().width(8),
        browse_tab,
        assistant_tab,
        iced::widget::Space::new().width(Length::Fill),
    ]
    .spacing(8)
    .padding([10, 20])
    .align_y(Alignment::Center);

    if let Some(note) = props.rebuild_note {
        content = content.push(secondary_text(note));
    }
    content = content.push(status).push(rebuild).push(theme_toggle);

    container(content)
        .width(Length::Fill)
        .style(header_style)
        .into()
}
