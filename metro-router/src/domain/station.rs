//! Station identity and records.

use std::fmt;

use super::error::DomainError;
use super::point::Point;

/// A normalized station name.
///
/// Normalized names are trimmed and uppercase. The same physical stop
/// served by several lines shares one `StationName`; pairing it with a
/// [`Line`] gives the identity of a single station record.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationName;
///
/// let name = StationName::normalize(" Châtelet ").unwrap();
/// assert_eq!(name.as_str(), "CHÂTELET");
///
/// // Blank names are rejected
/// assert!(StationName::normalize("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Normalize a raw name: trim surrounding whitespace and uppercase it.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.0)
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit line identifier, e.g. `"1"` or `"3bis"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line(String);

impl Line {
    /// Parse a line identifier. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyLine);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the line identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a station record: normalized name plus line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationKey {
    pub name: StationName,
    pub line: Line,
}

impl StationKey {
    pub fn new(name: StationName, line: Line) -> Self {
        Self { name, line }
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.name, self.line)
    }
}

/// A station record as stored in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Name for display, e.g. "Châtelet".
    pub display_name: String,

    /// Normalized name and line.
    pub key: StationKey,

    /// Projected position in meters.
    pub location: Point,

    /// Yearly ridership, when the dataset provides it.
    pub ridership: Option<u64>,

    /// City the station belongs to, when the dataset provides it.
    pub city: Option<String>,
}

impl Station {
    /// Create a station with no loader-time attributes.
    pub fn new(display_name: impl Into<String>, key: StationKey, location: Point) -> Self {
        Self {
            display_name: display_name.into(),
            key,
            location,
            ridership: None,
            city: None,
        }
    }

    /// The path-query view of this station.
    pub fn to_stop(&self) -> Stop {
        Stop {
            name: self.key.name.clone(),
            display_name: self.display_name.clone(),
            line: self.key.line.clone(),
        }
    }
}

/// A station record as it appears in a path: normalized name, display
/// name and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub name: StationName,
    pub display_name: String,
    pub line: Line,
}

impl Stop {
    /// The key identifying the underlying station record.
    pub fn key(&self) -> StationKey {
        StationKey::new(self.name.clone(), self.line.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uppercases_and_trims() {
        let name = StationName::normalize("  gare de Lyon ").unwrap();
        assert_eq!(name.as_str(), "GARE DE LYON");
    }

    #[test]
    fn normalize_rejects_blank() {
        assert!(StationName::normalize("").is_err());
        assert!(StationName::normalize(" \t ").is_err());
    }

    #[test]
    fn line_parse() {
        assert_eq!(Line::parse(" 3bis ").unwrap().as_str(), "3bis");
        assert!(Line::parse("").is_err());
    }

    #[test]
    fn same_name_different_line_are_distinct_keys() {
        let name = StationName::normalize("CHATELET").unwrap();
        let a = StationKey::new(name.clone(), Line::parse("1").unwrap());
        let b = StationKey::new(name, Line::parse("4").unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn display() {
        let key = StationKey::new(
            StationName::normalize("Nation").unwrap(),
            Line::parse("2").unwrap(),
        );
        assert_eq!(key.to_string(), "NATION (line 2)");
        assert_eq!(format!("{:?}", key.name), "StationName(NATION)");
    }

    #[test]
    fn stop_roundtrips_key() {
        let station = Station::new(
            "Nation",
            StationKey::new(
                StationName::normalize("Nation").unwrap(),
                Line::parse("2").unwrap(),
            ),
            Point::new(0.0, 0.0).unwrap(),
        );
        let stop = station.to_stop();
        assert_eq!(stop.display_name, "Nation");
        assert_eq!(stop.key(), station.key);
    }
}
