//! The boons/banes/modifier dialog, as a request and a response.

use serde::{Deserialize, Serialize};

/// Most boons or banes a player can declare.
pub const MAX_BOONS: i64 = 3;

/// One input field of the modifier dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptField {
    /// Form field name.
    pub name: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
    /// Inclusive numeric bounds, when the field is numeric.
    pub bounds: Option<(i64, i64)>,
    /// Pre-filled text.
    pub default: &'static str,
}

/// What the host should ask the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    /// Dialog title.
    pub title: &'static str,
    /// Fields in display order.
    pub fields: Vec<PromptField>,
    /// Label of the confirm button.
    pub confirm_label: &'static str,
}

impl PromptRequest {
    /// The standard dialog shown before every challenge.
    pub fn boons_banes() -> Self {
        Self {
            title: "Preparing a dice roll",
            fields: vec![
                PromptField {
                    name: "boons",
                    label: "Number of Boons:",
                    bounds: Some((0, MAX_BOONS)),
                    default: "0",
                },
                PromptField {
                    name: "banes",
                    label: "Number of Banes:",
                    bounds: Some((0, MAX_BOONS)),
                    default: "0",
                },
                PromptField {
                    name: "modifier",
                    label: "Flat Modifier:",
                    bounds: None,
                    default: "+0",
                },
            ],
            confirm_label: "Roll!",
        }
    }
}

/// Raw text the user typed into the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RollForm {
    /// Boons field.
    pub boons: String,
    /// Banes field.
    pub banes: String,
    /// Flat modifier field.
    pub modifier: String,
}

impl RollForm {
    /// Build a form from already-typed values.
    pub fn new(boons: i64, banes: i64, modifier: &str) -> Self {
        Self {
            boons: boons.to_string(),
            banes: banes.to_string(),
            modifier: modifier.to_string(),
        }
    }
}

/// How the dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user pressed the roll button.
    Confirmed(RollForm),
    /// The user pressed cancel.
    Cancelled,
    /// The dialog was closed without a choice.
    Dismissed,
}

impl PromptOutcome {
    /// The form, when confirmed.
    pub fn into_form(self) -> Option<RollForm> {
        match self {
            Self::Confirmed(form) => Some(form),
            Self::Cancelled | Self::Dismissed => None,
        }
    }
}

/// Boons, banes, and a flat modifier, ready for the rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollModifiers {
    /// Boons declared, in `[0, 3]`.
    pub boons: i64,
    /// Banes declared, in `[0, 3]`.
    pub banes: i64,
    /// Flat bonus or penalty.
    pub modifier: i64,
    /// The modifier as typed, for the chat card.
    pub modifier_text: String,
}

impl Default for RollModifiers {
    fn default() -> Self {
        Self {
            boons: 0,
            banes: 0,
            modifier: 0,
            modifier_text: "+0".to_string(),
        }
    }
}

impl RollModifiers {
    /// Typed modifiers with the text rendered as a signed number.
    pub fn new(boons: i64, banes: i64, modifier: i64) -> Self {
        Self {
            boons,
            banes,
            modifier,
            modifier_text: format!("{modifier:+}"),
        }
    }

    /// Read the dialog's text fields.
    ///
    /// Numbers are read from the leading integer of each field; anything
    /// unreadable counts as 0. Boons and banes are held to `[0, 3]`.
    pub fn from_form(form: &RollForm) -> Self {
        let modifier_text = match form.modifier.trim() {
            "" => "+0".to_string(),
            text => text.to_string(),
        };
        Self {
            boons: parse_int_prefix(&form.boons).clamp(0, MAX_BOONS),
            banes: parse_int_prefix(&form.banes).clamp(0, MAX_BOONS),
            modifier: parse_int_prefix(&modifier_text),
            modifier_text,
        }
    }
}

/// Leading signed integer of `text`, or 0 when there is none.
///
/// `"+2"` is 2, `"-1 for cover"` is -1, `"3.7"` is 3, `"lots"` is 0.
pub fn parse_int_prefix(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("+2"), 2);
        assert_eq!(parse_int_prefix("  -1 for cover"), -1);
        assert_eq!(parse_int_prefix("3.7"), 3);
        assert_eq!(parse_int_prefix("lots"), 0);
        assert_eq!(parse_int_prefix(""), 0);
        assert_eq!(parse_int_prefix("-"), 0);
        assert_eq!(parse_int_prefix("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn form_clamps_boons_and_banes() {
        let m = RollModifiers::from_form(&RollForm::new(5, -2, "+1"));
        assert_eq!(m.boons, 3);
        assert_eq!(m.banes, 0);
        assert_eq!(m.modifier, 1);
        assert_eq!(m.modifier_text, "+1");
    }

    #[test]
    fn blank_modifier_reads_as_plus_zero() {
        let form = RollForm {
            boons: "1".to_string(),
            banes: "x".to_string(),
            modifier: "   ".to_string(),
        };
        let m = RollModifiers::from_form(&form);
        assert_eq!(m.boons, 1);
        assert_eq!(m.banes, 0);
        assert_eq!(m.modifier, 0);
        assert_eq!(m.modifier_text, "+0");
    }

    #[test]
    fn typed_modifiers_render_sign() {
        assert_eq!(RollModifiers::new(0, 0, 2).modifier_text, "+2");
        assert_eq!(RollModifiers::new(0, 0, -3).modifier_text, "-3");
        assert_eq!(RollModifiers::default().modifier_text, "+0");
    }

    #[test]
    fn only_confirmed_yields_a_form() {
        assert!(PromptOutcome::Cancelled.into_form().is_none());
        assert!(PromptOutcome::Dismissed.into_form().is_none());
        assert!(
            PromptOutcome::Confirmed(RollForm::default())
                .into_form()
                .is_some()
        );
    }

    #[test]
    fn standard_request_fields() {
        let req = PromptRequest::boons_banes();
        let names: Vec<_> = req.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["boons", "banes", "modifier"]);
        assert_eq!(req.fields[0].bounds, Some((0, 3)));
    }
}
