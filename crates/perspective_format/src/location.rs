//! Grid locations and their comma-joined text form
//!
//! A location has up to four integer components. The leading `w` component
//! is optional in text: `x`, `x,y`, `x,y,z` and `w,x,y,z` are all accepted,
//! missing components default to zero. Formatting always produces three or
//! four components, dropping `w` when it is zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LocationError;

/// Position of an entity in the puzzle grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Fourth dimension, zero when not supplied
    pub w: i32,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    /// Create a three dimensional location
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { w: 0, x, y, z }
    }

    /// Create a four dimensional location
    pub fn with_w(w: i32, x: i32, y: i32, z: i32) -> Self {
        Self { w, x, y, z }
    }
}

/// Parse a location from its comma-joined form
pub fn parse_location(s: &str) -> Result<Location, LocationError> {
    if s.is_empty() {
        return Err(LocationError::Empty);
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() > 4 {
        return Err(LocationError::TooManyComponents(s.to_string()));
    }

    let mut values = [0i32; 4];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part.parse().map_err(|_| LocationError::InvalidComponent {
            input: s.to_string(),
            component: part.to_string(),
        })?;
    }

    let location = match parts.len() {
        4 => Location::with_w(values[0], values[1], values[2], values[3]),
        3 => Location::new(values[0], values[1], values[2]),
        2 => Location::new(values[0], values[1], 0),
        _ => Location::new(values[0], 0, 0),
    };
    Ok(location)
}

/// Format a location, omitting `w` when it is zero
pub fn format_location(location: &Location) -> String {
    location.to_string()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.w != 0 {
            write!(f, "{},{},{},{}", self.w, self.x, self.y, self.z)
        } else {
            write!(f, "{},{},{}", self.x, self.y, self.z)
        }
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_location(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_components() {
        assert_eq!(parse_location("1,2,3").unwrap(), Location::with_w(0, 1, 2, 3));
    }

    #[test]
    fn test_parse_four_components() {
        assert_eq!(parse_location("5,1,2,3").unwrap(), Location::with_w(5, 1, 2, 3));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(parse_location("7,-8").unwrap(), Location::new(7, -8, 0));
        assert_eq!(parse_location("-4").unwrap(), Location::new(-4, 0, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_location(""), Err(LocationError::Empty));
        assert!(matches!(
            parse_location("a,2,3"),
            Err(LocationError::InvalidComponent { component, .. }) if component == "a"
        ));
        assert!(matches!(
            parse_location("1,2,3,4,5"),
            Err(LocationError::TooManyComponents(_))
        ));
        assert!(parse_location("1,,3").is_err());
        assert!(parse_location(" 1,2,3").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format_location(&Location::new(1, 2, 3)), "1,2,3");
        assert_eq!(format_location(&Location::with_w(5, 1, 2, 3)), "5,1,2,3");
        assert_eq!(format_location(&Location::with_w(-1, 0, 0, 0)), "-1,0,0,0");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            Location::default(),
            Location::new(-3, 0, 9),
            Location::with_w(2, -1, -2, -3),
            Location::with_w(i32::MIN, i32::MAX, 0, 1),
        ];
        for location in samples {
            let text = format_location(&location);
            assert_eq!(text.parse::<Location>().unwrap(), location);
        }
    }

    #[test]
    fn test_explicit_zero_w_normalises() {
        let location = parse_location("0,4,5,6").unwrap();
        assert_eq!(format_location(&location), "4,5,6");
    }
}
