//! Low/medium/high ratings used for importance, urgency and desire

use serde::{Deserialize, Serialize};

/// A 1-3 rating. Serialized as the bare integer.
///
/// Out-of-range integers are rejected on conversion, so a `Task` can never
/// carry a rating outside `{1, 2, 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "i64")]
pub enum Rating {
    Low,
    #[default]
    Medium,
    High,
}

impl Rating {
    /// Numeric value used by the scorer
    pub fn value(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        f64::from(rating.value())
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(format!("rating must be 1, 2 or 3 (got {})", other)),
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "low" => Ok(Self::Low),
            "2" | "medium" | "med" => Ok(Self::Medium),
            "3" | "high" => Ok(Self::High),
            _ => Err(format!("Unknown rating: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_ordering() {
        assert!(Rating::Low < Rating::Medium);
        assert!(Rating::Medium < Rating::High);
    }

    #[test]
    fn test_rating_values() {
        assert_eq!(Rating::Low.value(), 1);
        assert_eq!(Rating::Medium.value(), 2);
        assert_eq!(Rating::High.value(), 3);
        assert_eq!(f64::from(Rating::High), 3.0);
    }

    #[test]
    fn test_rating_try_from_rejects_out_of_range() {
        assert_eq!(Rating::try_from(2u8).unwrap(), Rating::Medium);
        assert!(Rating::try_from(0u8).is_err());
        assert!(Rating::try_from(4i64).is_err());
        assert!(Rating::try_from(-1i64).is_err());
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("low".parse::<Rating>().unwrap(), Rating::Low);
        assert_eq!("HIGH".parse::<Rating>().unwrap(), Rating::High);
        assert_eq!("2".parse::<Rating>().unwrap(), Rating::Medium);
        assert!("urgent".parse::<Rating>().is_err());
    }

    #[test]
    fn test_rating_serde() {
        let json = serde_json::to_string(&Rating::High).unwrap();
        assert_eq!(json, "3");

        let rating: Rating = serde_json::from_str("1").unwrap();
        assert_eq!(rating, Rating::Low);

        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert!(serde_json::from_str::<Rating>("\"high\"").is_err());
    }
}
