//! UI Builder module for creating keyboards

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::buttons::ButtonLabel;

/// Reply keyboard with one row per button, in dispatch order
pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(
        ButtonLabel::ALL
            .into_iter()
            .map(|label| vec![KeyboardButton::new(label.as_str())]),
    )
    .resize_keyboard()
}
