use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sedimentation quality class of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Unsatisfactory,
    Satisfactory,
    Good,
    Excellent,
}

impl Quality {
    /// All classes, worst first.
    pub const ALL: [Quality; 4] = [
        Quality::Unsatisfactory,
        Quality::Satisfactory,
        Quality::Good,
        Quality::Excellent,
    ];

    /// Position of the class in [`Quality::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short tag as written in laboratory tables.
    pub fn tag(self) -> &'static str {
        match self {
            Quality::Unsatisfactory => "неудовл",
            Quality::Satisfactory => "удовл",
            Quality::Good => "хор",
            Quality::Excellent => "отл",
        }
    }

    /// Human readable name, e.g. for legends.
    pub fn display_name(self) -> &'static str {
        match self {
            Quality::Unsatisfactory => "Unsatisfactory",
            Quality::Satisfactory => "Satisfactory",
            Quality::Good => "Good",
            Quality::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Quality {
    type Err = ParseEnumError;
    /// Parse a laboratory tag or an English class name (case-insensitive).
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let lower = str.trim().to_lowercase();
        Quality::ALL
            .iter()
            .copied()
            .find(|q| lower == q.tag() || lower == q.display_name().to_lowercase())
            .ok_or_else(|| {
                ParseEnumError(format!(
                    "Not a quality class: {}. Must be one of (неудовл|удовл|хор|отл)",
                    str
                ))
            })
    }
}

#[cfg(test)]
mod test {
    use crate::data::Quality;

    #[test]
    fn parse_tags_and_names() {
        assert_eq!("хор".parse::<Quality>().unwrap(), Quality::Good);
        assert_eq!(" удовл ".parse::<Quality>().unwrap(), Quality::Satisfactory);
        assert_eq!("неудовл".parse::<Quality>().unwrap(), Quality::Unsatisfactory);
        assert_eq!("EXCELLENT".parse::<Quality>().unwrap(), Quality::Excellent);
        assert!("bad".parse::<Quality>().is_err());
    }

    #[test]
    fn indices_follow_order() {
        for (i, q) in Quality::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }
}
