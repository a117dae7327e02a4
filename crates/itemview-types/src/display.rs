use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a raw item value is rendered in a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Text,
    Number,
    Date,
    DateTime,
    Boolean,
    Json,
}

impl DisplayType {
    pub const ALL: [DisplayType; 6] = [
        DisplayType::Text,
        DisplayType::Number,
        DisplayType::Date,
        DisplayType::DateTime,
        DisplayType::Boolean,
        DisplayType::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Text => "text",
            DisplayType::Number => "number",
            DisplayType::Date => "date",
            DisplayType::DateTime => "datetime",
            DisplayType::Boolean => "boolean",
            DisplayType::Json => "json",
        }
    }

    /// Date-like display types get a relative "time since" annotation.
    pub fn shows_time_since(&self) -> bool {
        matches!(self, DisplayType::Date | DisplayType::DateTime)
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DisplayType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownDisplayType(s.to_string()))
    }
}

/// Body of a display-type update: either an explicit type or a request
/// to revert the field to its intrinsic default.
///
/// On the wire this is the display type name, or the reserved string `"reset"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayAs {
    Set(DisplayType),
    Reset,
}

impl DisplayAs {
    pub const RESET: &'static str = "reset";

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayAs::Set(display_type) => display_type.as_str(),
            DisplayAs::Reset => Self::RESET,
        }
    }
}

impl From<DisplayType> for DisplayAs {
    fn from(display_type: DisplayType) -> Self {
        DisplayAs::Set(display_type)
    }
}

impl fmt::Display for DisplayAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayAs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == Self::RESET {
            Ok(DisplayAs::Reset)
        } else {
            s.parse().map(DisplayAs::Set)
        }
    }
}

impl Serialize for DisplayAs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DisplayAs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&DisplayType::DateTime).unwrap(),
            "\"datetime\""
        );
        let parsed: DisplayType = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, DisplayType::Json);
    }

    #[test]
    fn test_from_str_round_trips_every_variant() {
        for display_type in DisplayType::ALL {
            assert_eq!(display_type.as_str().parse::<DisplayType>(), Ok(display_type));
        }
        assert!("reset".parse::<DisplayType>().is_err());
    }

    #[test]
    fn test_display_as_reset_is_distinct_from_display_types() {
        assert_eq!(serde_json::to_string(&DisplayAs::Reset).unwrap(), "\"reset\"");
        assert_eq!(
            serde_json::to_string(&DisplayAs::Set(DisplayType::Number)).unwrap(),
            "\"number\""
        );
        assert_eq!("reset".parse::<DisplayAs>(), Ok(DisplayAs::Reset));
        assert_eq!(
            "boolean".parse::<DisplayAs>(),
            Ok(DisplayAs::Set(DisplayType::Boolean))
        );
        assert!("bogus".parse::<DisplayAs>().is_err());
    }
}
