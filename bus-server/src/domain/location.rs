//! Location identity types.

use std::fmt;

/// Error returned when parsing an invalid location id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location id: {reason}")]
pub struct InvalidLocationId {
    reason: &'static str,
}

/// A valid backend-issued location identifier.
///
/// The booking backend keys every physical stop by an opaque string id
/// (a UUID in practice). This type guarantees the id is non-empty and
/// contains no whitespace, so lookups by id can trust their key.
///
/// # Examples
///
/// ```
/// use bus_server::domain::LocationId;
///
/// let id = LocationId::parse("loc-nyabugogo").unwrap();
/// assert_eq!(id.as_str(), "loc-nyabugogo");
///
/// // Empty ids are rejected
/// assert!(LocationId::parse("").is_err());
///
/// // Whitespace is rejected
/// assert!(LocationId::parse("loc 1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocationId(String);

impl LocationId {
    /// Parse a location id from a string.
    ///
    /// The input must be non-empty and contain no whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLocationId> {
        if s.is_empty() {
            return Err(InvalidLocationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidLocationId {
                reason: "must not contain whitespace",
            });
        }

        Ok(LocationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationId({})", self.0)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical stop: immutable identity, display name, coordinates.
///
/// Locations are never mutated by this service; they arrive fully formed
/// from the trips backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Backend location id
    pub id: LocationId,
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(id: LocationId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_id() {
        assert!(LocationId::parse("loc-1").is_ok());
        assert!(LocationId::parse("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(LocationId::parse("a").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(LocationId::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(LocationId::parse("loc 1").is_err());
        assert!(LocationId::parse(" loc1").is_err());
        assert!(LocationId::parse("loc1\t").is_err());
        assert!(LocationId::parse("\n").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let id = LocationId::parse("loc-kimironko").unwrap();
        assert_eq!(id.as_str(), "loc-kimironko");
    }

    #[test]
    fn display() {
        let id = LocationId::parse("loc-1").unwrap();
        assert_eq!(format!("{}", id), "loc-1");
    }

    #[test]
    fn debug() {
        let id = LocationId::parse("loc-1").unwrap();
        assert_eq!(format!("{:?}", id), "LocationId(loc-1)");
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;

        let a = LocationId::parse("loc-1").unwrap();
        let b = LocationId::parse("loc-1").unwrap();
        let c = LocationId::parse("loc-2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn location_new() {
        let loc = Location::new(
            LocationId::parse("loc-1").unwrap(),
            "Nyabugogo",
            -1.9395,
            30.0442,
        );
        assert_eq!(loc.name, "Nyabugogo");
        assert_eq!(loc.id.as_str(), "loc-1");
    }
}
