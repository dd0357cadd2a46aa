use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A single uppercase ASCII letter: one element of a chord or a typed sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(pub(crate) u8);

impl Letter {
    /// Normalize a raw keystroke into a letter.
    ///
    /// The input is uppercased and must then be exactly one character in `A-Z`.
    /// Anything else (digits, punctuation, empty strings, multi-character key
    /// names, non-ASCII letters) yields `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    /// Convert a single character, accepting either case.
    pub fn from_char(c: char) -> Option<Self> {
        let up = c.to_ascii_uppercase();
        if up.is_ascii_uppercase() {
            Some(Self(up as u8))
        } else {
            None
        }
    }

    /// The uppercase character for this letter.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        serializer.serialize_str(self.as_char().encode_utf8(&mut buf))
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::normalize(&raw)
            .ok_or_else(|| de::Error::custom(format!("expected a single letter, got '{raw}'")))
    }
}

/// Render a typed sequence as `H → V → V`, the form used in logs and overlays.
pub fn display_sequence(sequence: &[Letter]) -> String {
    sequence
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
