//! Deficiency and mode selection.
//!
//! Both enumerations are closed. Values that arrive as text or numeric ids
//! from a presentation layer go through `FromStr` / `TryFrom<u8>`, which
//! reject anything unknown instead of falling back to a default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Color-vision deficiency modelled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deficiency {
    /// Reduced sensitivity to red light.
    Protanomaly,
    /// Reduced sensitivity to green light.
    Deuteranomaly,
    /// Reduced sensitivity to blue light.
    Tritanomaly,
    /// Strong form of tritanomaly.
    #[serde(alias = "Severe Tritanomaly")]
    SevereTritanomaly,
}

impl Deficiency {
    /// Human-readable label for menus and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Protanomaly => "Protanomaly",
            Self::Deuteranomaly => "Deuteranomaly",
            Self::Tritanomaly => "Tritanomaly",
            Self::SevereTritanomaly => "Severe Tritanomaly",
        }
    }

    /// Stable numeric id, the inverse of `TryFrom<u8>`.
    pub const fn id(self) -> u8 {
        match self {
            Self::Protanomaly => 0,
            Self::Deuteranomaly => 1,
            Self::Tritanomaly => 2,
            Self::SevereTritanomaly => 3,
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Deficiency; 4] = [
            Deficiency::Protanomaly,
            Deficiency::Deuteranomaly,
            Deficiency::Tritanomaly,
            Deficiency::SevereTritanomaly,
        ];
        &ALL
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the label ("Severe Tritanomaly"), the variant name
/// ("SevereTritanomaly") and kebab/snake case ("severe-tritanomaly"),
/// ignoring ASCII case.
impl FromStr for Deficiency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "protanomaly" => Ok(Self::Protanomaly),
            "deuteranomaly" => Ok(Self::Deuteranomaly),
            "tritanomaly" => Ok(Self::Tritanomaly),
            "severetritanomaly" => Ok(Self::SevereTritanomaly),
            _ => Err(CoreError::UnsupportedVariant(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Deficiency {
    type Error = CoreError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.id() == id)
            .ok_or_else(|| CoreError::UnsupportedVariant(id.to_string()))
    }
}

/// Whether to simulate a deficiency or apply the corrective remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Simulate,
    Correct,
}

impl Mode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::Correct => "correct",
        }
    }

    pub const fn id(self) -> u8 {
        match self {
            Self::Simulate => 0,
            Self::Correct => 1,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Mode::Simulate, Mode::Correct]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "simulate" => Ok(Self::Simulate),
            "correct" => Ok(Self::Correct),
            _ => Err(CoreError::UnsupportedMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = CoreError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Simulate),
            1 => Ok(Self::Correct),
            _ => Err(CoreError::UnsupportedMode(id.to_string())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deficiency_parses_labels_and_names() {
        for d in Deficiency::all() {
            assert_eq!(d.label().parse::<Deficiency>().unwrap(), *d);
            assert_eq!(format!("{d:?}").parse::<Deficiency>().unwrap(), *d);
        }
        assert_eq!(
            "severe-tritanomaly".parse::<Deficiency>().unwrap(),
            Deficiency::SevereTritanomaly
        );
        assert_eq!(
            "  PROTANOMALY ".parse::<Deficiency>().unwrap(),
            Deficiency::Protanomaly
        );
    }

    #[test]
    fn test_unknown_deficiency_is_rejected() {
        let err = "Achromatopsia".parse::<Deficiency>().unwrap_err();
        assert_eq!(err, CoreError::UnsupportedVariant("Achromatopsia".into()));
        assert!("".parse::<Deficiency>().is_err());
    }

    #[test]
    fn test_deficiency_ids_roundtrip() {
        for d in Deficiency::all() {
            assert_eq!(Deficiency::try_from(d.id()).unwrap(), *d);
        }
        assert_eq!(
            Deficiency::try_from(4),
            Err(CoreError::UnsupportedVariant("4".into()))
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("simulate".parse::<Mode>().unwrap(), Mode::Simulate);
        assert_eq!("Correct".parse::<Mode>().unwrap(), Mode::Correct);
        assert_eq!(
            "enhance".parse::<Mode>().unwrap_err(),
            CoreError::UnsupportedMode("enhance".into())
        );
        assert_eq!(Mode::try_from(1).unwrap(), Mode::Correct);
        assert!(Mode::try_from(2).is_err());
    }

    #[test]
    fn test_serde_accepts_ui_label() {
        let d: Deficiency = serde_json::from_str("\"Severe Tritanomaly\"").unwrap();
        assert_eq!(d, Deficiency::SevereTritanomaly);
        let m: Mode = serde_json::from_str("\"correct\"").unwrap();
        assert_eq!(m, Mode::Correct);
        assert!(serde_json::from_str::<Mode>("\"other\"").is_err());
    }
}
