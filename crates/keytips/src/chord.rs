use std::{fmt, result::Result as StdResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Letter, Result, letter::display_sequence};

/// An ordered, non-empty sequence of letters bound to a command.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord(Vec<Letter>);

impl Chord {
    /// Build a chord from already-normalized letters.
    pub fn new(letters: Vec<Letter>) -> Result<Self> {
        if letters.is_empty() {
            return Err(Error::EmptyChord);
        }
        Ok(Self(letters))
    }

    /// Build a chord from a list of keys, each of which must be a single letter.
    ///
    /// This is the shape used by persisted records (`["H", "V", "V"]`).
    pub fn from_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let letters = keys
            .into_iter()
            .map(|k| {
                let k = k.as_ref();
                Letter::normalize(k).ok_or_else(|| Error::InvalidLetter { raw: k.to_string() })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(letters)
    }

    /// Parse a chord spec such as `"hvv"`, `"H V V"`, `"h-v-v"` or `"H → V → V"`.
    ///
    /// Case-insensitive. Whitespace and the separators `,`, `-`, `>` and `→`
    /// are skipped; every other character must be a letter.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut letters = Vec::new();
        for c in spec.chars() {
            if c.is_whitespace() || matches!(c, ',' | '-' | '>' | '→') {
                continue;
            }
            let letter = Letter::from_char(c).ok_or_else(|| Error::InvalidLetter {
                raw: c.to_string(),
            })?;
            letters.push(letter);
        }
        Self::new(letters)
    }

    /// Build a chord from a spec that is known to hold only `A-Z` bytes.
    pub(crate) fn from_ascii_upper(spec: &str) -> Self {
        Self(spec.bytes().map(Letter).collect())
    }

    /// The letters of this chord, in typing order.
    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Number of letters in the chord (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first letter, used as the default display group.
    pub fn first(&self) -> Letter {
        self.0[0]
    }

    /// True when the chord equals `sequence` letter-for-letter and in length.
    pub fn matches(&self, sequence: &[Letter]) -> bool {
        self.0 == sequence
    }

    /// True when the chord is at least as long as `sequence` and begins with it.
    pub fn extends(&self, sequence: &[Letter]) -> bool {
        self.0.starts_with(sequence)
    }

    /// True when `self` is a strict prefix of `other` (shorter and agreeing on every letter).
    pub fn is_strict_prefix_of(&self, other: &Self) -> bool {
        self.len() < other.len() && other.extends(&self.0)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_sequence(&self.0))
    }
}

impl Serialize for Chord {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Chord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let keys = Vec::<String>::deserialize(deserializer)?;
        Self::from_keys(&keys).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_common_spellings() {
        let want = Chord::from_keys(["H", "V", "V"]).unwrap();
        for spec in ["hvv", "H V V", "h-v-v", "H → V → V", "H,V,V", "h->v->v"] {
            assert_eq!(Chord::parse(spec).unwrap(), want, "spec {spec:?}");
        }
    }

    #[test]
    fn parse_rejects_non_letters_and_empty() {
        assert!(matches!(
            Chord::parse("h1"),
            Err(Error::InvalidLetter { raw }) if raw == "1"
        ));
        assert!(matches!(Chord::parse("  "), Err(Error::EmptyChord)));
        assert!(matches!(
            Chord::from_keys(["H", "VV"]),
            Err(Error::InvalidLetter { .. })
        ));
    }

    #[test]
    fn prefix_relations() {
        let hb = Chord::parse("hb").unwrap();
        let hbb = Chord::parse("hbb").unwrap();
        assert!(hb.is_strict_prefix_of(&hbb));
        assert!(!hbb.is_strict_prefix_of(&hb));
        assert!(!hb.is_strict_prefix_of(&hb));
        assert!(hbb.extends(hb.letters()));
        assert!(hbb.extends(&[]));
        assert!(hb.matches(hb.letters()));
        assert!(!hbb.matches(hb.letters()));
    }

    #[test]
    fn serde_shape_is_array_of_letters() {
        let chord = Chord::parse("hvv").unwrap();
        let json = serde_json::to_string(&chord).unwrap();
        assert_eq!(json, r#"["H","V","V"]"#);
        let back: Chord = serde_json::from_str(r#"["h","v","v"]"#).unwrap();
        assert_eq!(back, chord);
        assert!(serde_json::from_str::<Chord>("[]").is_err());
        assert!(serde_json::from_str::<Chord>(r#"["HV"]"#).is_err());
    }

    #[test]
    fn display_uses_arrows() {
        assert_eq!(Chord::parse("as").unwrap().to_string(), "A → S");
    }
}
