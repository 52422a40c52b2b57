//! Geographic coordinates, their textual form, and distances.

use std::fmt;
use std::str::FromStr;

use geo::{Distance as _, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::error::ParseCoordError;

/// Geographic point (lat/lon) in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether latitude and longitude are finite and within range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Parse a coordinate such as `48.2 16.3`, `48.2,16.3`, `N48.2 E16.3`
    /// or `16.3 E 48.2 N`.
    pub fn parse(input: &str) -> Result<Self, ParseCoordError> {
        let tokens = tokenize(input)?;

        let mut components: Vec<Component> = Vec::with_capacity(2);
        let mut prefix: Option<Hemisphere> = None;

        for token in tokens {
            match token {
                Token::Number(text) => {
                    let value: f64 = text
                        .parse()
                        .map_err(|_| ParseCoordError::new(input, format!("'{text}' is not a number")))?;
                    if !value.is_finite() {
                        return Err(ParseCoordError::new(input, "value is not finite"));
                    }
                    components.push(Component {
                        value,
                        signed: text.starts_with('-') || text.starts_with('+'),
                        hemisphere: prefix.take(),
                    });
                }
                Token::Hemisphere(h) => {
                    if prefix.is_some() {
                        return Err(ParseCoordError::new(input, "consecutive hemisphere letters"));
                    }
                    match components.last_mut() {
                        Some(last) if last.hemisphere.is_none() => last.hemisphere = Some(h),
                        _ => prefix = Some(h),
                    }
                }
            }
        }

        if prefix.is_some() {
            return Err(ParseCoordError::new(input, "hemisphere letter without a value"));
        }

        let [first, second]: [Component; 2] = components
            .try_into()
            .map_err(|_| ParseCoordError::new(input, "expected latitude and longitude"))?;

        let (lat, lon) = match (first.axis(), second.axis()) {
            (Some(a), Some(b)) if a == b => {
                return Err(ParseCoordError::new(
                    input,
                    "both values refer to the same axis",
                ))
            }
            (Some(Axis::Lon), _) | (None, Some(Axis::Lat)) => (second, first),
            _ => (first, second),
        };

        let coord = GeoCoord::new(lat.signed_value(input)?, lon.signed_value(input)?);
        if !(-90.0..=90.0).contains(&coord.lat) {
            return Err(ParseCoordError::new(input, "latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&coord.lon) {
            return Err(ParseCoordError::new(input, "longitude out of range"));
        }
        Ok(coord)
    }

    /// Human readable form, e.g. `48.2 N 16.3 E`
    pub fn display_text(&self) -> String {
        let (lat, ns) = hemisphere(self.lat, 'N', 'S');
        let (lon, ew) = hemisphere(self.lon, 'E', 'W');
        format!("{lat} {ns} {lon} {ew}")
    }

    /// Great-circle distance to another coordinate
    pub fn distance_to(&self, other: &GeoCoord) -> Distance {
        Distance::from_meters(Haversine.distance(self.to_point(), other.to_point()))
    }

    /// `geo` point with x = lon, y = lat
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl FromStr for GeoCoord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeoCoord::parse(s)
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Distance(f64);

impl Distance {
    pub fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_kilometers(km: f64) -> Self {
        Self(km * 1000.0)
    }

    pub fn as_meters(&self) -> f64 {
        self.0
    }

    pub fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.as_kilometers())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hemisphere {
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lat,
    Lon,
}

enum Token {
    Number(String),
    Hemisphere(Hemisphere),
}

struct Component {
    value: f64,
    signed: bool,
    hemisphere: Option<Hemisphere>,
}

impl Component {
    fn axis(&self) -> Option<Axis> {
        self.hemisphere.map(|h| match h {
            Hemisphere::North | Hemisphere::South => Axis::Lat,
            Hemisphere::East | Hemisphere::West => Axis::Lon,
        })
    }

    fn signed_value(&self, input: &str) -> Result<f64, ParseCoordError> {
        match self.hemisphere {
            Some(_) if self.signed => Err(ParseCoordError::new(
                input,
                "signed value with hemisphere letter",
            )),
            Some(Hemisphere::South) | Some(Hemisphere::West) => Ok(-self.value),
            _ => Ok(self.value),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseCoordError> {
    let mut tokens = Vec::new();
    let mut number = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') {
            number.push(c);
            continue;
        }
        if !number.is_empty() {
            tokens.push(Token::Number(std::mem::take(&mut number)));
        }
        let hemisphere = match c.to_ascii_uppercase() {
            'N' => Hemisphere::North,
            'S' => Hemisphere::South,
            'E' => Hemisphere::East,
            'W' => Hemisphere::West,
            c if c.is_whitespace() || c == ',' => continue,
            c => {
                return Err(ParseCoordError::new(
                    input,
                    format!("unexpected character '{c}'"),
                ))
            }
        };
        tokens.push(Token::Hemisphere(hemisphere));
    }
    if !number.is_empty() {
        tokens.push(Token::Number(number));
    }

    Ok(tokens)
}

fn format_degrees(value: f64) -> String {
    let text = format!("{:.5}", value.abs());
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Degrees text and hemisphere letter; values that round to zero are positive
fn hemisphere(value: f64, positive: char, negative: char) -> (String, char) {
    let text = format_degrees(value);
    if value < 0.0 && text != "0" {
        (text, negative)
    } else {
        (text, positive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_pair() {
        let coord: GeoCoord = "48.2 16.3".parse().unwrap();
        assert_eq!(coord, GeoCoord::new(48.2, 16.3));
    }

    #[test]
    fn test_parse_comma_and_signs() {
        let coord = GeoCoord::parse("-33.86,151.2").unwrap();
        assert_eq!(coord, GeoCoord::new(-33.86, 151.2));

        let coord = GeoCoord::parse("+10 -20").unwrap();
        assert_eq!(coord, GeoCoord::new(10.0, -20.0));
    }

    #[test]
    fn test_parse_hemisphere_letters() {
        assert_eq!(
            GeoCoord::parse("N 48.2 E 16.3").unwrap(),
            GeoCoord::new(48.2, 16.3)
        );
        assert_eq!(
            GeoCoord::parse("48.2N 16.3W").unwrap(),
            GeoCoord::new(48.2, -16.3)
        );
        assert_eq!(
            GeoCoord::parse("s12.5 e130").unwrap(),
            GeoCoord::new(-12.5, 130.0)
        );
    }

    #[test]
    fn test_parse_swapped_axes() {
        assert_eq!(
            GeoCoord::parse("16.3 E 48.2 N").unwrap(),
            GeoCoord::new(48.2, 16.3)
        );
        assert_eq!(
            GeoCoord::parse("16.3 48.2 N").unwrap(),
            GeoCoord::new(48.2, 16.3)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(GeoCoord::parse("").is_err());
        assert!(GeoCoord::parse("48.2").is_err());
        assert!(GeoCoord::parse("48.2 16.3 7").is_err());
        assert!(GeoCoord::parse("abc def").is_err());
        assert!(GeoCoord::parse("91 16").is_err());
        assert!(GeoCoord::parse("45 181").is_err());
        assert!(GeoCoord::parse("48.2 N 16.3 N").is_err());
        assert!(GeoCoord::parse("-48.2 S 16.3").is_err());
        assert!(GeoCoord::parse("48.2 16.3 E W").is_err());
        assert!(GeoCoord::parse("1.2.3 4").is_err());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(GeoCoord::new(48.2, 16.3).display_text(), "48.2 N 16.3 E");
        assert_eq!(GeoCoord::new(-12.5, -70.0).to_string(), "12.5 S 70 W");
        assert_eq!(
            GeoCoord::new(47.123456789, 8.0).display_text(),
            "47.12346 N 8 E"
        );
    }

    #[test]
    fn test_display_text_rounds_to_zero_without_sign() {
        assert_eq!(
            GeoCoord::new(-0.000001, -0.000001).display_text(),
            "0 N 0 E"
        );
        assert_eq!(
            GeoCoord::new(-0.000006, -0.000004).display_text(),
            "0.00001 S 0 E"
        );
    }

    #[test]
    fn test_display_text_parses_back() {
        let coord = GeoCoord::new(-33.8568, 151.2153);
        assert_eq!(GeoCoord::parse(&coord.display_text()).unwrap(), coord);
    }

    #[test]
    fn test_distance() {
        let vienna = GeoCoord::new(48.2, 16.3);
        let schneeberg = GeoCoord::new(47.7672, 15.8069);
        let d = vienna.distance_to(&schneeberg);
        assert!(d.as_kilometers() > 55.0 && d.as_kilometers() < 65.0);
        assert_eq!(vienna.distance_to(&vienna), Distance::from_meters(0.0));
    }

    #[test]
    fn test_distance_units() {
        let d = Distance::from_kilometers(100.0);
        assert_eq!(d.as_meters(), 100_000.0);
        assert_eq!(d.to_string(), "100.0 km");
    }
}
