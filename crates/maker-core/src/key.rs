//! Piano keys struck by a segment

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MakerError;

const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

const MAX_MIDI: u8 = 127;

/// A piano key, stored as its MIDI note number (0-127, 60 = middle C = `C4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Key(u8);

impl Key {
    /// Key for a MIDI note number, clamped to 127
    pub fn new(midi: u8) -> Self {
        Self(midi.min(MAX_MIDI))
    }

    pub fn midi(self) -> u8 {
        self.0
    }

    /// Octave in scientific pitch notation (C4 = 60, so MIDI 0 is octave -1)
    pub fn octave(self) -> i8 {
        (self.0 / 12) as i8 - 1
    }

    /// Pitch class name, sharps only
    pub fn name(self) -> &'static str {
        NAMES[(self.0 % 12) as usize]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

impl TryFrom<u8> for Key {
    type Error = MakerError;

    fn try_from(midi: u8) -> Result<Self, Self::Error> {
        if midi > MAX_MIDI {
            return Err(MakerError::InvalidKey(format!("MIDI note {} out of range", midi)));
        }
        Ok(Self(midi))
    }
}

impl From<Key> for u8 {
    fn from(key: Key) -> u8 {
        key.0
    }
}

impl FromStr for Key {
    type Err = MakerError;

    /// Parses names like `C4`, `d#3`, `Bb2` or `C-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MakerError::InvalidKey(s.to_string());
        let mut chars = s.trim().chars();

        let semitone: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (accidental, octave) = match rest.as_bytes().first() {
            Some(b'#') => (1, &rest[1..]),
            Some(b'b') => (-1, &rest[1..]),
            _ => (0, rest),
        };

        let octave: i8 = octave.parse().map_err(|_| invalid())?;
        let midi = (i32::from(octave) + 1) * 12 + semitone + accidental;
        u8::try_from(midi)
            .ok()
            .filter(|m| *m <= MAX_MIDI)
            .map(Key)
            .ok_or_else(invalid)
    }
}
