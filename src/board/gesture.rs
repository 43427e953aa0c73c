//! Pointer geometry and the drag/resize gesture.

use serde::{Deserialize, Serialize};

use crate::client::UiNote;

pub const MIN_NOTE_WIDTH: f64 = 140.0;
pub const MIN_NOTE_HEIGHT: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle in pointer coordinates. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Canvas bounds plus the trash drop target, if the host renders one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub canvas: Size,
    pub trash: Option<Rect>,
}

impl Layout {
    pub fn over_trash(&self, point: Point) -> bool {
        self.trash.is_some_and(|trash| trash.contains(point))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureMode {
    Move,
    Resize,
}

/// An active drag. At most one exists per board.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub note_id: String,
    pub mode: GestureMode,
    /// Pointer position when the gesture started
    pub start: Point,
    origin_x: f64,
    origin_y: f64,
    origin_w: f64,
    origin_h: f64,
}

impl Gesture {
    pub fn new(note: &UiNote, mode: GestureMode, start: Point) -> Self {
        Self {
            note_id: note.id.clone(),
            mode,
            start,
            origin_x: note.x,
            origin_y: note.y,
            origin_w: note.w,
            origin_h: note.h,
        }
    }

    /// Move or resize `note` for the pointer at `pointer`, keeping it on the canvas.
    pub fn apply(&self, note: &mut UiNote, pointer: Point, canvas: Size) {
        let dx = pointer.x - self.start.x;
        let dy = pointer.y - self.start.y;

        match self.mode {
            GestureMode::Move => {
                note.x = clamp(self.origin_x + dx, 0.0, canvas.width - note.w);
                note.y = clamp(self.origin_y + dy, 0.0, canvas.height - note.h);
            }
            GestureMode::Resize => {
                note.w = clamp(self.origin_w + dx, MIN_NOTE_WIDTH, canvas.width - note.x);
                note.h = clamp(self.origin_h + dy, MIN_NOTE_HEIGHT, canvas.height - note.y);
            }
        }
    }
}

/// Clamp into `[min, max]`; `min` wins when the range is empty.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UiColor;

    const CANVAS: Size = Size {
        width: 1000.0,
        height: 600.0,
    };

    fn note() -> UiNote {
        UiNote {
            id: "n1".to_string(),
            x: 100.0,
            y: 100.0,
            w: 200.0,
            h: 160.0,
            text: String::new(),
            color: UiColor::Yellow,
            z: 1,
        }
    }

    #[test]
    fn test_clamp_prefers_min_on_empty_range() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(50.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(50.0, 140.0, 100.0), 140.0);
    }

    #[test]
    fn test_move_follows_delta() {
        let mut n = note();
        let gesture = Gesture::new(&n, GestureMode::Move, Point::new(10.0, 10.0));
        gesture.apply(&mut n, Point::new(60.0, 30.0), CANVAS);
        assert_eq!((n.x, n.y), (150.0, 120.0));
    }

    #[test]
    fn test_move_clamps_exactly_to_bounds() {
        let mut n = note();
        let gesture = Gesture::new(&n, GestureMode::Move, Point::new(0.0, 0.0));

        gesture.apply(&mut n, Point::new(5000.0, 5000.0), CANVAS);
        assert_eq!(n.x, CANVAS.width - n.w);
        assert_eq!(n.y, CANVAS.height - n.h);

        gesture.apply(&mut n, Point::new(-5000.0, -5000.0), CANVAS);
        assert_eq!((n.x, n.y), (0.0, 0.0));
    }

    #[test]
    fn test_resize_respects_minimum_and_canvas() {
        let mut n = note();
        let gesture = Gesture::new(&n, GestureMode::Resize, Point::new(0.0, 0.0));

        gesture.apply(&mut n, Point::new(-500.0, -500.0), CANVAS);
        assert_eq!((n.w, n.h), (MIN_NOTE_WIDTH, MIN_NOTE_HEIGHT));

        gesture.apply(&mut n, Point::new(5000.0, 5000.0), CANVAS);
        assert_eq!(n.w, CANVAS.width - n.x);
        assert_eq!(n.h, CANVAS.height - n.y);
        assert_eq!((n.x, n.y), (100.0, 100.0));
    }

    #[test]
    fn test_trash_hit_test_is_inclusive() {
        let layout = Layout {
            canvas: CANVAS,
            trash: Some(Rect {
                left: 900.0,
                top: 500.0,
                right: 980.0,
                bottom: 580.0,
            }),
        };
        assert!(layout.over_trash(Point::new(900.0, 500.0)));
        assert!(layout.over_trash(Point::new(980.0, 580.0)));
        assert!(!layout.over_trash(Point::new(899.9, 550.0)));

        let no_trash = Layout {
            canvas: CANVAS,
            trash: None,
        };
        assert!(!no_trash.over_trash(Point::new(950.0, 550.0)));
    }
}
