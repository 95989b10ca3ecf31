//! Widget styles with shadows and rounded corners.

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use palette::{ThemeMode, set_theme};

pub use containers::{
    assistant_bubble_style, block_style, body_text_style, card_style, email_item_style,
    header_style, page_style, pill_style, user_bubble_style,
};

pub use buttons::{
    link_button_style, primary_button_style, secondary_button_style, tab_button_style,
};

pub use inputs::{scrollable_style, search_input_style};
