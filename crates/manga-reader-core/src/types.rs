//! Shapes shared with the native backend and with markup event handlers.
//!
//! The backend owns the data behind these types; the frontend only carries
//! them. Field names are part of the command contract and must match the
//! backend's serialization exactly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

impl Coords {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Movement since the previous pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoordDiff {
    pub dx: f64,
    pub dy: f64,
}

/// Detail payload of `swipeMove`: the new position plus the delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SwipeMove {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl SwipeMove {
    pub fn coords(&self) -> Coords {
        Coords::new(self.x, self.y)
    }

    pub fn diff(&self) -> CoordDiff {
        CoordDiff {
            dx: self.dx,
            dy: self.dy,
        }
    }
}

/// Net horizontal direction of a finished swipe.
///
/// Serialized as the integers `-1`, `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    Left,
    None,
    Right,
}

impl Direction {
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::None => 0,
            Direction::Right => 1,
        }
    }

    /// Sign of `value`; zero and NaN both map to [`Direction::None`].
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Direction::Right
        } else if value < 0.0 {
            Direction::Left
        } else {
            Direction::None
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.as_i8()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Left),
            0 => Ok(Direction::None),
            1 => Ok(Direction::Right),
            other => Err(format!("swipe direction out of range: {other}")),
        }
    }
}

/// Detail payload of `swipeEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SwipeEnd {
    #[ts(type = "-1 | 0 | 1")]
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub cover_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub number: f32,
    pub read: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Manga {
    pub desc: SearchItem,
    pub chapters: Vec<Chapter>,
}

/// Per-manga view format: paged or one continuous strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Format {
    Normal,
    Long,
}

impl Format {
    pub fn is_long(self) -> bool {
        matches!(self, Format::Long)
    }
}

impl From<bool> for Format {
    fn from(long: bool) -> Self {
        if long { Format::Long } else { Format::Normal }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChapterImages {
    pub images: Vec<String>,
    pub format: Format,
}

/// A liked manga as returned by `fetch_liked`: `[connector index, manga]`.
pub type LikedManga = (u32, Manga);
