use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Closed vocabulary of commands a keytip can dispatch to the executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum CommandId {
    Copy,
    Paste,
    PasteValues,
    Bold,
    Italic,
    BorderTop,
    BorderBottom,
    BorderLeft,
    BorderRight,
    BorderAll,
    ClearContent,
    SortDesc,
    AutoFitCol,
}

impl CommandId {
    /// Every command, in the order settings surfaces list them.
    pub const ALL: [Self; 13] = [
        Self::Copy,
        Self::Paste,
        Self::PasteValues,
        Self::Bold,
        Self::Italic,
        Self::BorderTop,
        Self::BorderBottom,
        Self::BorderLeft,
        Self::BorderRight,
        Self::BorderAll,
        Self::ClearContent,
        Self::SortDesc,
        Self::AutoFitCol,
    ];

    /// Stable wire identifier (matches the serde form).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::PasteValues => "pasteValues",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BorderTop => "borderTop",
            Self::BorderBottom => "borderBottom",
            Self::BorderLeft => "borderLeft",
            Self::BorderRight => "borderRight",
            Self::BorderAll => "borderAll",
            Self::ClearContent => "clearContent",
            Self::SortDesc => "sortDesc",
            Self::AutoFitCol => "autoFitCol",
        }
    }

    /// Human-readable description for pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copy => "Copy Selection",
            Self::Paste => "Paste",
            Self::PasteValues => "Paste Values Only",
            Self::Bold => "Make Bold",
            Self::Italic => "Make Italic",
            Self::BorderTop => "Add Top Border",
            Self::BorderBottom => "Add Bottom Border",
            Self::BorderLeft => "Add Left Border",
            Self::BorderRight => "Add Right Border",
            Self::BorderAll => "Add All Borders",
            Self::ClearContent => "Clear Content",
            Self::SortDesc => "Sort Descending",
            Self::AutoFitCol => "AutoFit Columns",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCommand { id: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_round_trip() {
        for cmd in CommandId::ALL {
            assert_eq!(cmd.as_str().parse::<CommandId>().unwrap(), cmd);
            let json = serde_json::to_string(&cmd).unwrap();
            assert_eq!(json, format!("\"{}\"", cmd.as_str()));
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert!(matches!(
            "pasteFormulas".parse::<CommandId>(),
            Err(Error::UnknownCommand { id }) if id == "pasteFormulas"
        ));
        // Wire ids are case-sensitive.
        assert!("PasteValues".parse::<CommandId>().is_err());
    }
}
