//! Player identification, seat colors, and per-color data storage.
//!
//! ## PlayerId
//!
//! Opaque identifier handed to the engine by whatever authenticates
//! participants. The engine never interprets it beyond equality and ordering.
//!
//! ## Color
//!
//! The four fixed seat colors, in assignment order.
//!
//! ## ColorMap
//!
//! Fixed-size per-color storage backed by an array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque player identifier.
///
/// ```
/// use ludo_engine::core::PlayerId;
///
/// let p = PlayerId::new("alice");
/// assert_eq!(p.as_str(), "alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Seat color. Declaration order is the fixed assignment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// Number of seat colors.
    pub const COUNT: usize = 4;

    /// All colors in assignment order.
    pub const ALL: [Color; Color::COUNT] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// Position of this color in assignment order (0..4).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Yellow => 2,
            Color::Green => 3,
        }
    }

    /// Lowercase color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, ColorMap};
///
/// let mut laps: ColorMap<u32> = ColorMap::new(|_| 0);
/// laps[Color::Blue] = 2;
/// assert_eq!(laps[Color::Blue], 2);
/// assert_eq!(laps[Color::Red], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; Color::COUNT],
}

impl<T> ColorMap<T> {
    /// Create a new ColorMap with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Get a reference to a color's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a color's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new("p1");
        assert_eq!(p.as_str(), "p1");
        assert_eq!(format!("{}", p), "p1");
        assert_eq!(PlayerId::from("p1"), p);
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerId::new("uid-42")).unwrap();
        assert_eq!(json, "\"uid-42\"");
    }

    #[test]
    fn test_color_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
        assert!(Color::Red < Color::Green);
    }

    #[test]
    fn test_color_serde_lowercase() {
        let json = serde_json::to_string(&Color::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
        let back: Color = serde_json::from_str("\"green\"").unwrap();
        assert_eq!(back, Color::Green);
    }

    #[test]
    fn test_color_map_new() {
        let map: ColorMap<usize> = ColorMap::new(|c| c.index() * 10);

        assert_eq!(map[Color::Red], 0);
        assert_eq!(map[Color::Blue], 10);
        assert_eq!(map[Color::Yellow], 20);
        assert_eq!(map[Color::Green], 30);
    }

    #[test]
    fn test_color_map_iter_and_mutation() {
        let mut map: ColorMap<i32> = ColorMap::new(|_| 0);
        map[Color::Green] = 7;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0], (Color::Red, &0));
        assert_eq!(pairs[3], (Color::Green, &7));
    }
}
