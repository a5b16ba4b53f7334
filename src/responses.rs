//! # Responses and Routing
//!
//! The response table maps each button label to the fixed content sent
//! back for it. It is rendered once at startup from the message catalog and
//! shared read-only afterwards.

use std::collections::HashMap;
use teloxide::types::KeyboardMarkup;

use crate::bot::ui_builder::main_keyboard;
use crate::buttons::ButtonLabel;
use crate::localization::Catalog;

/// Menu pages, sent together as one album
pub const MENU_PAGES: [&str; 2] = ["menu11.jpg", "menu22.jpg"];
/// Photo attached to the extra services list
pub const SERVICES_PHOTO: &str = "dop.jpeg";

/// One item of a media album
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub asset: String,
    /// HTML caption; Telegram shows the first caption of an album
    pub caption: Option<String>,
}

/// Fully resolved content delivered for one inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseSpec {
    /// HTML text, optionally re-attaching the reply keyboard
    Text {
        body: String,
        keyboard: Option<KeyboardMarkup>,
    },
    Photo {
        asset: String,
        caption: String,
        missing_notice: String,
    },
    Document {
        asset: String,
        caption: String,
        missing_notice: String,
    },
    MediaGroup {
        items: Vec<MediaItem>,
        missing_notice: String,
    },
}

impl ResponseSpec {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseSpec::Text { .. } => "text",
            ResponseSpec::Photo { .. } => "photo",
            ResponseSpec::Document { .. } => "document",
            ResponseSpec::MediaGroup { .. } => "media_group",
        }
    }

    /// Static assets this response reads, in send order
    pub fn assets(&self) -> Vec<&str> {
        match self {
            ResponseSpec::Text { .. } => Vec::new(),
            ResponseSpec::Photo { asset, .. } | ResponseSpec::Document { asset, .. } => {
                vec![asset.as_str()]
            }
            ResponseSpec::MediaGroup { items, .. } => {
                items.iter().map(|item| item.asset.as_str()).collect()
            }
        }
    }

    /// Texts delivered with HTML formatting enabled
    pub fn formatted_texts(&self) -> Vec<&str> {
        match self {
            ResponseSpec::Text { body, .. } => vec![body.as_str()],
            ResponseSpec::Photo { caption, .. } | ResponseSpec::Document { caption, .. } => {
                vec![caption.as_str()]
            }
            ResponseSpec::MediaGroup { items, .. } => {
                items.iter().filter_map(|item| item.caption.as_deref()).collect()
            }
        }
    }

    /// Apology used instead of the media when an asset is absent
    pub fn missing_notice(&self) -> Option<&str> {
        match self {
            ResponseSpec::Text { .. } => None,
            ResponseSpec::Photo { missing_notice, .. }
            | ResponseSpec::Document { missing_notice, .. }
            | ResponseSpec::MediaGroup { missing_notice, .. } => Some(missing_notice.as_str()),
        }
    }

    pub fn keyboard(&self) -> Option<&KeyboardMarkup> {
        match self {
            ResponseSpec::Text { keyboard, .. } => keyboard.as_ref(),
            _ => None,
        }
    }
}

/// Immutable label → response mapping plus the greeting and fallback
#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: HashMap<ButtonLabel, ResponseSpec>,
    greeting: ResponseSpec,
    fallback: ResponseSpec,
}

impl ResponseTable {
    pub fn new(catalog: &Catalog) -> Self {
        let mut entries = HashMap::new();

        let menu_caption = catalog.text("menu-caption");
        let items = MENU_PAGES
            .iter()
            .enumerate()
            .map(|(index, page)| MediaItem {
                asset: page.to_string(),
                caption: (index == 0).then(|| menu_caption.clone()),
            })
            .collect();
        entries.insert(
            ButtonLabel::ShowMenu,
            ResponseSpec::MediaGroup {
                items,
                missing_notice: catalog.missing_files_notice(&MENU_PAGES),
            },
        );

        entries.insert(
            ButtonLabel::ExtraServices,
            ResponseSpec::Photo {
                asset: SERVICES_PHOTO.to_string(),
                caption: catalog.text("services-caption"),
                missing_notice: catalog.missing_files_notice(&[SERVICES_PHOTO]),
            },
        );

        // Button answers leave the keyboard as it is; only the greeting and
        // the fallback send it again.
        entries.insert(
            ButtonLabel::WorkingHours,
            ResponseSpec::Text {
                body: catalog.text("schedule"),
                keyboard: None,
            },
        );
        entries.insert(
            ButtonLabel::ContactAdmin,
            ResponseSpec::Text {
                body: catalog.text("contact-admin"),
                keyboard: None,
            },
        );

        Self {
            entries,
            greeting: ResponseSpec::Text {
                body: catalog.text("greeting"),
                keyboard: Some(main_keyboard()),
            },
            fallback: ResponseSpec::Text {
                body: catalog.text("fallback"),
                keyboard: Some(main_keyboard()),
            },
        }
    }

    /// Map message text to its response; total over all strings
    pub fn route(&self, text: &str) -> &ResponseSpec {
        ButtonLabel::from_text(text)
            .and_then(|label| self.entries.get(&label))
            .unwrap_or(&self.fallback)
    }

    /// Response for any inbound text, `/start` included
    pub fn respond_to(&self, text: &str) -> &ResponseSpec {
        if is_start_command(text) {
            &self.greeting
        } else {
            self.route(text)
        }
    }

    pub fn greeting(&self) -> &ResponseSpec {
        &self.greeting
    }

    pub fn fallback(&self) -> &ResponseSpec {
        &self.fallback
    }

    /// Every response the table can produce
    pub fn all(&self) -> impl Iterator<Item = &ResponseSpec> {
        ButtonLabel::ALL
            .into_iter()
            .filter_map(|label| self.entries.get(&label))
            .chain([&self.greeting, &self.fallback])
    }
}

/// `/start`, `/start@bot_name` and `/start <payload>`
pub fn is_start_command(text: &str) -> bool {
    let Some(command) = text.split_whitespace().next() else {
        return false;
    };
    let command = command.split('@').next().unwrap_or(command);
    command == "/start"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_start_command() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("/start@tsarskaya_bot"));
        assert!(is_start_command("/start promo"));
        assert!(!is_start_command("/help"));
        assert!(!is_start_command("/starter"));
        assert!(!is_start_command("start"));
        assert!(!is_start_command(""));
    }

    #[test]
    fn test_spec_accessors() {
        let spec = ResponseSpec::MediaGroup {
            items: vec![
                MediaItem {
                    asset: "a.jpg".to_string(),
                    caption: Some("<b>a</b>".to_string()),
                },
                MediaItem {
                    asset: "b.jpg".to_string(),
                    caption: None,
                },
            ],
            missing_notice: "нет файлов".to_string(),
        };
        assert_eq!(spec.kind(), "media_group");
        assert_eq!(spec.assets(), vec!["a.jpg", "b.jpg"]);
        assert_eq!(spec.formatted_texts(), vec!["<b>a</b>"]);
        assert_eq!(spec.missing_notice(), Some("нет файлов"));
        assert!(spec.keyboard().is_none());
    }
}
