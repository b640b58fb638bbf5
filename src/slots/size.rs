//! Slot size classes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a car or of the slot hosting it
///
/// Serialized as its ordinal (1, 2, 3) in ticket records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// All sizes, smallest first
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Position of this size inside per-class arrays
    pub fn index(self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }

    /// Ordinal used on disk
    pub fn ordinal(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Size::Small => "SMALL",
            Size::Medium => "MEDIUM",
            Size::Large => "LARGE",
        }
    }

    /// Sizes able to host a car of this size, smallest first
    pub fn at_least(self) -> impl Iterator<Item = Size> {
        Size::ALL.into_iter().filter(move |s| *s >= self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<Size> for u8 {
    fn from(size: Size) -> Self {
        size.ordinal()
    }
}

impl TryFrom<u8> for Size {
    type Error = Error;

    fn try_from(ordinal: u8) -> Result<Self> {
        match ordinal {
            1 => Ok(Size::Small),
            2 => Ok(Size::Medium),
            3 => Ok(Size::Large),
            other => Err(Error::InvalidArgument(format!(
                "Unknown slot size ordinal: {}",
                other
            ))),
        }
    }
}

impl FromStr for Size {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SMALL" => Ok(Size::Small),
            "MEDIUM" => Ok(Size::Medium),
            "LARGE" => Ok(Size::Large),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown size '{}', expected small, medium or large",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_ordering() {
        assert!(Size::Small < Size::Medium);
        assert!(Size::Medium < Size::Large);
        assert_eq!(Size::ALL.iter().max(), Some(&Size::Large));
    }

    #[test]
    fn test_at_least() {
        let fits: Vec<_> = Size::Medium.at_least().collect();
        assert_eq!(fits, vec![Size::Medium, Size::Large]);
        assert_eq!(Size::Small.at_least().count(), 3);
        assert_eq!(Size::Large.at_least().count(), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("small".parse::<Size>().ok(), Some(Size::Small));
        assert_eq!("MEDIUM".parse::<Size>().ok(), Some(Size::Medium));
        assert_eq!(" Large ".parse::<Size>().ok(), Some(Size::Large));
        assert!("huge".parse::<Size>().is_err());
    }

    #[test]
    fn test_ordinal_serialization() -> Result<()> {
        let json = serde_json::to_string(&Size::Medium)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        assert_eq!(json, "2");

        let size: Size =
            serde_json::from_str("3").map_err(|e| Error::Serialization(e.to_string()))?;
        assert_eq!(size, Size::Large);

        assert!(serde_json::from_str::<Size>("4").is_err());
        Ok(())
    }
}
