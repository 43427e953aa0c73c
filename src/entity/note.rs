// src/entity/note.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{BoardError, Result};

/// Note color as spelled on the wire ("Yellow", "Pink", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoteColor {
    #[default]
    Yellow,
    Pink,
    Blue,
    Green,
}

impl NoteColor {
    pub const ALL: [NoteColor; 4] = [
        NoteColor::Yellow,
        NoteColor::Pink,
        NoteColor::Blue,
        NoteColor::Green,
    ];
}

impl std::fmt::Display for NoteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteColor::Yellow => write!(f, "Yellow"),
            NoteColor::Pink => write!(f, "Pink"),
            NoteColor::Blue => write!(f, "Blue"),
            NoteColor::Green => write!(f, "Green"),
        }
    }
}

impl std::str::FromStr for NoteColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yellow" => Ok(NoteColor::Yellow),
            "pink" => Ok(NoteColor::Pink),
            "blue" => Ok(NoteColor::Blue),
            "green" => Ok(NoteColor::Green),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

/// A sticky note as held by the store and sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
    pub color: NoteColor,
    pub z: i64,
}

/// Body of a create request. Everything but the id; color and z are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCreate {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
}

impl NoteCreate {
    pub fn validate(&self) -> Result<()> {
        check_finite("x", self.x)?;
        check_finite("y", self.y)?;
        check_size("w", self.w)?;
        check_size("h", self.h)
    }
}

/// Partial update. A `None` field is left untouched.
///
/// `text` is tri-state: omitted (`None`), explicit `null` (`Some(None)`, clears
/// the text) or a value (`Some(Some(s))`, where `""` also clears it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self == &NotePatch::default()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(x) = self.x {
            check_finite("x", x)?;
        }
        if let Some(y) = self.y {
            check_finite("y", y)?;
        }
        if let Some(w) = self.w {
            check_size("w", w)?;
        }
        if let Some(h) = self.h {
            check_size("h", h)?;
        }
        Ok(())
    }

    /// Apply the present fields onto `note`, leaving the rest untouched.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(x) = self.x {
            note.x = x;
        }
        if let Some(y) = self.y {
            note.y = y;
        }
        if let Some(w) = self.w {
            note.w = w;
        }
        if let Some(h) = self.h {
            note.h = h;
        }
        if let Some(text) = &self.text {
            note.text = text.clone().unwrap_or_default();
        }
        if let Some(color) = self.color {
            note.color = color;
        }
        if let Some(z) = self.z {
            note.z = z;
        }
    }
}

/// Marks a field as present whenever the key appears, even with a `null` value.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BoardError::Validation(format!("{} must be a finite number", field)))
    }
}

fn check_size(field: &str, value: f64) -> Result<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(BoardError::Validation(format!("{} must be positive", field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Note {
        Note {
            id: "abc".to_string(),
            x: 10.0,
            y: 20.0,
            w: 200.0,
            h: 150.0,
            text: "hello".to_string(),
            color: NoteColor::Pink,
            z: 3,
        }
    }

    #[test]
    fn test_color_wire_tokens_are_capitalized() {
        let json = serde_json::to_string(&NoteColor::Blue).unwrap();
        assert_eq!(json, "\"Blue\"");
        let parsed: NoteColor = serde_json::from_str("\"Green\"").unwrap();
        assert_eq!(parsed, NoteColor::Green);
        assert!(serde_json::from_str::<NoteColor>("\"green\"").is_err());
    }

    #[test]
    fn test_color_from_str_is_case_insensitive() {
        assert_eq!("PINK".parse::<NoteColor>().unwrap(), NoteColor::Pink);
        assert_eq!("yellow".parse::<NoteColor>().unwrap(), NoteColor::Yellow);
        assert!("purple".parse::<NoteColor>().is_err());
    }

    #[test]
    fn test_patch_distinguishes_omitted_and_null_text() {
        let omitted: NotePatch = serde_json::from_str(r#"{"x": 5}"#).unwrap();
        assert_eq!(omitted.text, None);

        let null: NotePatch = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(null.text, Some(None));

        let empty: NotePatch = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert_eq!(empty.text, Some(Some(String::new())));
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut note = sample();
        let patch = NotePatch {
            x: Some(42.0),
            color: Some(NoteColor::Green),
            ..Default::default()
        };
        patch.apply_to(&mut note);

        assert_eq!(note.x, 42.0);
        assert_eq!(note.color, NoteColor::Green);
        assert_eq!(note.y, 20.0);
        assert_eq!(note.text, "hello");
        assert_eq!(note.z, 3);
    }

    #[test]
    fn test_apply_null_text_clears() {
        let mut note = sample();
        NotePatch {
            text: Some(None),
            ..Default::default()
        }
        .apply_to(&mut note);
        assert_eq!(note.text, "");
    }

    #[test]
    fn test_create_defaults_deserialize() {
        let create: NoteCreate =
            serde_json::from_str(r#"{"x":1,"y":2,"w":150,"h":130,"text":"t"}"#).unwrap();
        assert_eq!(create.color, None);
        assert_eq!(create.z, None);
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive_size() {
        let create = NoteCreate {
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 100.0,
            text: None,
            color: None,
            z: None,
        };
        assert!(matches!(create.validate(), Err(BoardError::Validation(_))));

        let patch = NotePatch {
            h: Some(-3.0),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(NotePatch::default().validate().is_ok());
    }
}
