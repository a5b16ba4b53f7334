//! # Telegram HTML Markup Check
//!
//! Telegram rejects a whole message when its HTML does not parse, so every
//! formatted template is checked once at startup. Only the tag subset the
//! Bot API understands is accepted; `<`, `>` and `&` outside of tags must be
//! escaped.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Tags understood by Telegram's HTML parse mode
const SUPPORTED_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "ins", "s", "strike", "del", "a", "code", "pre",
];

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/)?([a-zA-Z][a-zA-Z-]*)((?:\s+[a-zA-Z-]+=(?:'[^'<>]*'|"[^"<>]*"))*)\s*>"#)
        .expect("tag pattern is valid")
});
static HREF_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s+href=(?:'[^']+'|"[^"]+")$"#).expect("href pattern is valid")
});
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:lt|gt|amp|quot|#[0-9]+|#x[0-9a-fA-F]+);").expect("entity pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unescaped `{bracket}` at byte {offset}")]
    StrayBracket { bracket: char, offset: usize },
    #[error("bare `&` at byte {offset}")]
    BareAmpersand { offset: usize },
    #[error("unsupported tag <{tag}> at byte {offset}")]
    UnsupportedTag { tag: String, offset: usize },
    #[error("tag <{tag}> at byte {offset} has unexpected attributes")]
    UnexpectedAttributes { tag: String, offset: usize },
    #[error("link at byte {offset} has no href")]
    MissingHref { offset: usize },
    #[error("closing </{found}> at byte {offset} while <{expected}> is open")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("closing </{tag}> at byte {offset} has no opening tag")]
    UnexpectedClosingTag { tag: String, offset: usize },
    #[error("<{tag}> is never closed")]
    UnclosedTag { tag: String },
}

/// Check that `text` renders under Telegram's HTML parse mode
pub fn check_html(text: &str) -> Result<(), MarkupError> {
    let mut open: Vec<String> = Vec::new();
    let mut cursor = 0;

    for caps in TAG_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let offset = whole.start();
        check_plain(&text[cursor..offset], cursor)?;
        cursor = whole.end();

        let tag = caps[2].to_ascii_lowercase();
        let attributes = caps.get(3).map_or("", |m| m.as_str());
        if !SUPPORTED_TAGS.contains(&tag.as_str()) {
            return Err(MarkupError::UnsupportedTag { tag, offset });
        }

        if caps.get(1).is_some() {
            if !attributes.is_empty() {
                return Err(MarkupError::UnexpectedAttributes { tag, offset });
            }
            match open.pop() {
                Some(expected) if expected == tag => {}
                Some(expected) => {
                    return Err(MarkupError::MismatchedClosingTag {
                        expected,
                        found: tag,
                        offset,
                    })
                }
                None => return Err(MarkupError::UnexpectedClosingTag { tag, offset }),
            }
        } else {
            if tag == "a" {
                if !HREF_ATTRIBUTE.is_match(attributes) {
                    return Err(MarkupError::MissingHref { offset });
                }
            } else if !attributes.is_empty() {
                return Err(MarkupError::UnexpectedAttributes { tag, offset });
            }
            open.push(tag);
        }
    }

    check_plain(&text[cursor..], cursor)?;

    match open.pop() {
        Some(tag) => Err(MarkupError::UnclosedTag { tag }),
        None => Ok(()),
    }
}

/// Text between tags: no raw brackets, ampersands only as entities
fn check_plain(segment: &str, base: usize) -> Result<(), MarkupError> {
    for (index, ch) in segment.char_indices() {
        match ch {
            '<' | '>' => {
                return Err(MarkupError::StrayBracket {
                    bracket: ch,
                    offset: base + index,
                })
            }
            '&' if !ENTITY.is_match(&segment[index..]) => {
                return Err(MarkupError::BareAmpersand {
                    offset: base + index,
                })
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_valid() {
        assert_eq!(check_html("Пожалуйста, используйте кнопки ниже."), Ok(()));
        assert_eq!(check_html(""), Ok(()));
    }

    #[test]
    fn test_nested_supported_tags() {
        let text = "📞 <b>Как сделать заказ:</b>\n<a href='tel:+79833292301'>+7 (983) 329-23-01</a>\n<i>Доставка <b>быстро</b></i>";
        assert_eq!(check_html(text), Ok(()));
        assert_eq!(check_html(r#"<a href="tel:+79833292301">звонок</a>"#), Ok(()));
    }

    #[test]
    fn test_entities_are_accepted() {
        assert_eq!(check_html("Гриль &amp; баня &lt;3 &#128293;"), Ok(()));
    }

    #[test]
    fn test_stray_brackets_are_rejected() {
        assert_eq!(
            check_html("9:00 < 21:00"),
            Err(MarkupError::StrayBracket {
                bracket: '<',
                offset: 5
            })
        );
        assert!(matches!(
            check_html("<b>ok</b> -> дальше"),
            Err(MarkupError::StrayBracket { bracket: '>', .. })
        ));
    }

    #[test]
    fn test_bare_ampersand_is_rejected() {
        assert_eq!(
            check_html("Гриль & баня"),
            Err(MarkupError::BareAmpersand { offset: 11 })
        );
    }

    #[test]
    fn test_unbalanced_tags_are_rejected() {
        assert_eq!(
            check_html("<b>жирный"),
            Err(MarkupError::UnclosedTag {
                tag: "b".to_string()
            })
        );
        assert!(matches!(
            check_html("<b><i>x</b></i>"),
            Err(MarkupError::MismatchedClosingTag { .. })
        ));
        assert!(matches!(
            check_html("x</i>"),
            Err(MarkupError::UnexpectedClosingTag { .. })
        ));
    }

    #[test]
    fn test_unknown_tags_and_attributes_are_rejected() {
        assert!(matches!(
            check_html("<div>x</div>"),
            Err(MarkupError::UnsupportedTag { .. })
        ));
        assert!(matches!(
            check_html("<b class='x'>x</b>"),
            Err(MarkupError::UnexpectedAttributes { .. })
        ));
        assert!(matches!(
            check_html("<a>x</a>"),
            Err(MarkupError::MissingHref { .. })
        ));
    }
}
