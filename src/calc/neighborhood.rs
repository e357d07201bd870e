//! Neighborhood functions weighting the update of units around the winner.

use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// Gaussian kernel, `exp(-d² / 2)` on radius-scaled distance.
    Gauss,
    /// Constant 1 inside the radius, 0 outside.
    Bubble,
}

impl Neighborhood {
    /// Weight for a squared lattice distance already scaled by `1 / radius²`.
    pub fn weight(&self, distance_sq: f64) -> f64 {
        match self {
            Neighborhood::Gauss => (-0.5 * distance_sq).exp(),
            Neighborhood::Bubble => {
                if distance_sq <= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Search radius beyond which the weight is treated as zero, in multiples of the radius.
    pub fn radius(&self) -> f64 {
        match self {
            Neighborhood::Gauss => 3.0,
            Neighborhood::Bubble => 1.0,
        }
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Neighborhood::Gauss
    }
}

impl FromStr for Neighborhood {
    type Err = ParseEnumError;
    /// Parse a string to a `Neighborhood`.
    ///
    /// Accepts `"gauss" | "bubble"`.
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        match str {
            "gauss" => Ok(Neighborhood::Gauss),
            "bubble" => Ok(Neighborhood::Bubble),
            _ => Err(ParseEnumError(format!(
                "Not a neighborhood: {}. Must be one of (gauss|bubble)",
                str
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::calc::neighborhood::Neighborhood;

    #[test]
    fn gauss() {
        let neigh = Neighborhood::Gauss;
        assert_eq!(neigh.weight(0.0), 1.0);
        assert!(neigh.weight(3.0 * 3.0) < 0.012);
        assert!(neigh.weight(1.0) > neigh.weight(2.0));
    }

    #[test]
    fn bubble() {
        let neigh = Neighborhood::Bubble;
        assert_eq!(neigh.weight(0.5), 1.0);
        assert_eq!(neigh.weight(1.5), 0.0);
    }

    #[test]
    fn distance_scaling() {
        let dist = 2_f32;
        let scale = 2_f32;

        let dist_sq = dist.powi(2);
        let dist_sq_sc = (1.0 / scale).powi(2) * (dist * scale).powi(2);

        assert_eq!(dist_sq, dist_sq_sc);
    }
}
