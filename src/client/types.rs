//! UI-side note model and its mapping to the wire format.
//!
//! The wire spells colors capitalized (`"Yellow"`) and carries integer
//! coordinates; the board works with lowercase colors and continuous values.

use serde::{Deserialize, Serialize};

use crate::entity::{Note, NoteColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UiColor {
    #[default]
    Yellow,
    Pink,
    Blue,
    Green,
}

impl UiColor {
    pub const ALL: [UiColor; 4] = [UiColor::Yellow, UiColor::Pink, UiColor::Blue, UiColor::Green];
}

impl std::fmt::Display for UiColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiColor::Yellow => write!(f, "yellow"),
            UiColor::Pink => write!(f, "pink"),
            UiColor::Blue => write!(f, "blue"),
            UiColor::Green => write!(f, "green"),
        }
    }
}

impl std::str::FromStr for UiColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NoteColor>().map(from_api_color)
    }
}

pub fn to_api_color(color: UiColor) -> NoteColor {
    match color {
        UiColor::Yellow => NoteColor::Yellow,
        UiColor::Pink => NoteColor::Pink,
        UiColor::Blue => NoteColor::Blue,
        UiColor::Green => NoteColor::Green,
    }
}

pub fn from_api_color(color: NoteColor) -> UiColor {
    match color {
        NoteColor::Yellow => UiColor::Yellow,
        NoteColor::Pink => UiColor::Pink,
        NoteColor::Blue => UiColor::Blue,
        NoteColor::Green => UiColor::Green,
    }
}

/// A note as the board sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNote {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
    pub color: UiColor,
    pub z: i64,
}

impl From<Note> for UiNote {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            x: note.x,
            y: note.y,
            w: note.w,
            h: note.h,
            text: note.text,
            color: from_api_color(note.color),
            z: note.z,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiNoteCreate {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
    pub color: UiColor,
    pub z: i64,
}

/// Partial edit of a note on the board side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiNotePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub text: Option<String>,
    pub color: Option<UiColor>,
    pub z: Option<i64>,
}

impl UiNotePatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(w: f64, h: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Default::default()
        }
    }

    pub fn z(z: i64) -> Self {
        Self {
            z: Some(z),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &UiNotePatch::default()
    }

    pub fn apply_to(&self, note: &mut UiNote) {
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
            note.text = text.clone();
        }
        if let Some(color) = self.color {
            note.color = color;
        }
        if let Some(z) = self.z {
            note.z = z;
        }
    }

    /// Fill the fields this patch leaves unset from `older`.
    pub fn fill_from(&mut self, older: UiNotePatch) {
        self.x = self.x.or(older.x);
        self.y = self.y.or(older.y);
        self.w = self.w.or(older.w);
        self.h = self.h.or(older.h);
        self.text = self.text.take().or(older.text);
        self.color = self.color.or(older.color);
        self.z = self.z.or(older.z);
    }
}

/// Wire body for `POST /notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNoteCreate {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    pub text: String,
    pub color: NoteColor,
    pub z: i64,
}

impl From<&UiNoteCreate> for ApiNoteCreate {
    fn from(create: &UiNoteCreate) -> Self {
        Self {
            x: round_finite(create.x).unwrap_or(0),
            y: round_finite(create.y).unwrap_or(0),
            w: round_finite(create.w).unwrap_or(0),
            h: round_finite(create.h).unwrap_or(0),
            text: create.text.clone(),
            color: to_api_color(create.color),
            z: create.z,
        }
    }
}

/// Wire body for `PATCH /notes/{id}`. Only defined fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiNotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
}

impl From<&UiNotePatch> for ApiNotePatch {
    fn from(patch: &UiNotePatch) -> Self {
        Self {
            x: patch.x.and_then(round_finite),
            y: patch.y.and_then(round_finite),
            w: patch.w.and_then(round_finite),
            h: patch.h.and_then(round_finite),
            text: patch.text.clone(),
            color: patch.color.map(to_api_color),
            z: patch.z,
        }
    }
}

/// Round to the nearest integer; non-finite values have no wire form.
pub fn round_finite(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mapping_round_trips() {
        for color in UiColor::ALL {
            assert_eq!(from_api_color(to_api_color(color)), color);
        }
        for color in NoteColor::ALL {
            assert_eq!(to_api_color(from_api_color(color)), color);
        }
    }

    #[test]
    fn test_ui_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UiColor::Pink).unwrap(), "\"pink\"");
        assert_eq!("Blue".parse::<UiColor>().unwrap(), UiColor::Blue);
    }

    #[test]
    fn test_patch_rounds_and_drops_non_finite() {
        let patch = UiNotePatch {
            x: Some(10.4),
            y: Some(f64::NAN),
            w: Some(199.5),
            h: Some(f64::INFINITY),
            color: Some(UiColor::Green),
            ..Default::default()
        };

        let wire = ApiNotePatch::from(&patch);
        assert_eq!(wire.x, Some(10));
        assert_eq!(wire.y, None);
        assert_eq!(wire.w, Some(200));
        assert_eq!(wire.h, None);

        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 10, "w": 200, "color": "Green" }));
    }

    #[test]
    fn test_empty_text_is_sent() {
        let wire = ApiNotePatch::from(&UiNotePatch::text(""));
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "" }));
    }

    #[test]
    fn test_fill_from_keeps_newer_fields() {
        let mut newer = UiNotePatch::text("AB");
        newer.fill_from(UiNotePatch {
            text: Some("A".to_string()),
            z: Some(6),
            ..Default::default()
        });

        assert_eq!(newer.text.as_deref(), Some("AB"));
        assert_eq!(newer.z, Some(6));
        assert_eq!(newer.x, None);
    }

    #[test]
    fn test_create_maps_color_and_rounds() {
        let create = UiNoteCreate {
            x: 24.6,
            y: 42.0,
            w: 220.0,
            h: 180.2,
            text: String::new(),
            color: UiColor::Blue,
            z: 4,
        };
        let wire = ApiNoteCreate::from(&create);
        assert_eq!(wire.x, 25);
        assert_eq!(wire.h, 180);
        assert_eq!(wire.color, NoteColor::Blue);
    }

    #[test]
    fn test_wire_note_to_ui() {
        let note = Note {
            id: "n1".to_string(),
            x: 1.0,
            y: 2.0,
            w: 150.0,
            h: 130.0,
            text: "hi".to_string(),
            color: NoteColor::Pink,
            z: 7,
        };
        let ui = UiNote::from(note);
        assert_eq!(ui.color, UiColor::Pink);
        assert_eq!(ui.z, 7);
    }
}
