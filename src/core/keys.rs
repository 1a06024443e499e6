//! Static piano layout: two octaves of white keys, their black keys, and the
//! physical keyboard mapping.

use crate::constants::{BLACK_KEY_OFFSET_PX, WHITE_KEY_PITCH_PX};

/// Fourteen white keys spanning C4..B5, left to right.
pub const WHITE_KEYS: [&str; 14] = [
    "C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5", "D5", "E5", "F5", "G5", "A5", "B5",
];

/// Black keys with their slot, measured in white-key pitches from the left edge.
pub const BLACK_KEYS: [(&str, u8); 10] = [
    ("C#4", 0),
    ("D#4", 1),
    ("F#4", 3),
    ("G#4", 4),
    ("A#4", 5),
    ("C#5", 7),
    ("D#5", 8),
    ("F#5", 10),
    ("G#5", 11),
    ("A#5", 12),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    White,
    Black,
}

/// One playable key as the DOM builder needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub note: &'static str,
    pub kind: KeyKind,
    pub slot: u8,
}

impl KeyDescriptor {
    #[inline]
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            KeyKind::White => "white-key",
            KeyKind::Black => "black-key",
        }
    }

    /// Absolute CSS left offset for black keys; white keys flow in the row.
    #[inline]
    pub fn left_px(&self) -> Option<f32> {
        match self.kind {
            KeyKind::White => None,
            KeyKind::Black => Some(black_key_left_px(self.slot)),
        }
    }
}

#[inline]
pub fn black_key_left_px(slot: u8) -> f32 {
    slot as f32 * WHITE_KEY_PITCH_PX + BLACK_KEY_OFFSET_PX
}

/// All keys in DOM order: white keys first, then black keys overlaid.
pub fn layout() -> Vec<KeyDescriptor> {
    let whites = WHITE_KEYS
        .iter()
        .enumerate()
        .map(|(i, &note)| KeyDescriptor {
            note,
            kind: KeyKind::White,
            slot: i as u8,
        });
    let blacks = BLACK_KEYS.iter().map(|&(note, slot)| KeyDescriptor {
        note,
        kind: KeyKind::Black,
        slot,
    });
    whites.chain(blacks).collect()
}

/// Resolve a note name (e.g. from `data-note`) to its static identifier.
pub fn find_note(name: &str) -> Option<&'static str> {
    WHITE_KEYS
        .iter()
        .copied()
        .chain(BLACK_KEYS.iter().map(|&(n, _)| n))
        .find(|n| *n == name)
}

/// Map a `KeyboardEvent.key` value to a note. Letters are case-insensitive.
#[inline]
pub fn note_for_key(key: &str) -> Option<&'static str> {
    match key {
        "a" | "A" => Some("C4"),
        "w" | "W" => Some("C#4"),
        "s" | "S" => Some("D4"),
        "e" | "E" => Some("D#4"),
        "d" | "D" => Some("E4"),
        "f" | "F" => Some("F4"),
        "t" | "T" => Some("F#4"),
        "g" | "G" => Some("G4"),
        "y" | "Y" => Some("G#4"),
        "h" | "H" => Some("A4"),
        "u" | "U" => Some("A#4"),
        "j" | "J" => Some("B4"),
        "k" | "K" => Some("C5"),
        "o" | "O" => Some("C#5"),
        "l" | "L" => Some("D5"),
        "p" | "P" => Some("D#5"),
        ";" => Some("E5"),
        "'" => Some("F5"),
        _ => None,
    }
}
