//! Reply-keyboard button labels.
//!
//! The label text is the only dispatch key: an inbound message matches a
//! button when its text is exactly equal to the label.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonLabel {
    ShowMenu,
    ExtraServices,
    WorkingHours,
    ContactAdmin,
}

impl ButtonLabel {
    /// Every label in keyboard order, which is also the matching priority
    pub const ALL: [ButtonLabel; 4] = [
        ButtonLabel::ShowMenu,
        ButtonLabel::ExtraServices,
        ButtonLabel::WorkingHours,
        ButtonLabel::ContactAdmin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ButtonLabel::ShowMenu => "Показать меню",
            ButtonLabel::ExtraServices => "Дополнительные услуги",
            ButtonLabel::WorkingHours => "Режим работы",
            ButtonLabel::ContactAdmin => "Связаться с администратором",
        }
    }

    /// Exact-match lookup; no trimming or case folding
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_matches_every_label() {
        for label in ButtonLabel::ALL {
            assert_eq!(ButtonLabel::from_text(label.as_str()), Some(label));
        }
    }

    #[test]
    fn test_from_text_is_exact() {
        assert_eq!(ButtonLabel::from_text(""), None);
        assert_eq!(ButtonLabel::from_text("показать меню"), None);
        assert_eq!(ButtonLabel::from_text(" Показать меню"), None);
        assert_eq!(ButtonLabel::from_text("Показать меню "), None);
        assert_eq!(ButtonLabel::from_text("Режим"), None);
    }
}
