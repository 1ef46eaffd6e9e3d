//! Projected coordinates.

use std::fmt;

use super::error::DomainError;

/// A position in a projected coordinate system, in meters.
///
/// Both components are finite by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Create a point, rejecting NaN and infinite components.
    pub fn new(x: f64, y: f64) -> Result<Self, DomainError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(DomainError::NonFinite { x, y });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point, in meters.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
        assert!(Point::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0).unwrap();
        let b = Point::new(300.0, 400.0).unwrap();
        assert_eq!(a.distance(&b), 500.0);
        assert_eq!(b.distance(&a), 500.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn display() {
        let p = Point::new(652109.5, 6861853.25).unwrap();
        assert_eq!(p.to_string(), "(652109.5, 6861853.25)");
    }
}
