//! Hex coordinate model.
//!
//! Hexes are addressed by short ids in one of two notations:
//!
//! - **Letter+number** (`p12`): column letter, 1-indexed row.
//! - **4-digit numeric** (`1612`, CCRR): zero-padded column then row.
//!
//! The canonical form of an id is lowercase, trimmed, with no redundant
//! zero padding (letter+number) or exact zero padding (numeric). Geometry
//! uses an odd-q offset layout: distance goes through cube coordinates,
//! neighbors come from a parity-dependent offset table.
//!
//! Ordering is west→east then north→south (column, then row). This single
//! comparator drives canonical edge ordering and every deterministically
//! sorted result list in the crate.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Hex id notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// Column letter followed by 1-indexed row number (`p12`).
    LetterNumber,
    /// Four digits, zero-padded column then row (`1612`).
    Numeric4,
}

impl Notation {
    /// Parse notation from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "letter_number" | "letter+number" => Some(Self::LetterNumber),
            "numeric4" | "numeric" => Some(Self::Numeric4),
            _ => None,
        }
    }

    /// Detect the notation a canonical-looking id is written in.
    pub fn detect(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.len() == 4 && id.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self::Numeric4)
        } else if id
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_alphabetic())
        {
            Some(Self::LetterNumber)
        } else {
            None
        }
    }
}

impl Default for Notation {
    fn default() -> Self {
        Self::LetterNumber
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LetterNumber => write!(f, "letter_number"),
            Self::Numeric4 => write!(f, "numeric4"),
        }
    }
}

/// Error type for hex id parsing and formatting.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HexFormatError {
    /// The id does not match the notation's pattern.
    #[error("hex id '{id}' does not match the {notation} notation")]
    Pattern {
        /// Offending id.
        id: String,
        /// Expected notation.
        notation: Notation,
    },
    /// The id encodes a zero or negative 1-indexed coordinate.
    #[error("hex id '{id}' encodes a non-positive coordinate")]
    NonPositive {
        /// Offending id.
        id: String,
    },
    /// The coordinate cannot be expressed in the notation.
    #[error("coordinate ({col},{row}) is not representable in the {notation} notation")]
    Unrepresentable {
        /// Column.
        col: i32,
        /// Row.
        row: i32,
        /// Target notation.
        notation: Notation,
    },
    /// A trail edge key is not two ids joined by `-`.
    #[error("malformed trail edge key '{key}'")]
    EdgeKey {
        /// Offending key.
        key: String,
    },
}

/// Offset coordinate of a hex, 1-indexed from the north-west corner.
///
/// Signed so that [`neighbors`] can step off the western and northern map
/// edges; parsing never produces a non-positive coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HexCoord {
    /// Column, west→east.
    pub col: i32,
    /// Row, north→south.
    pub row: i32,
}

impl HexCoord {
    /// Create a coordinate.
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

fn letter_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-z])([0-9]{1,3})$").unwrap())
}

fn numeric4_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]{2})([0-9]{2})$").unwrap())
}

/// Parse a hex id into a coordinate under the given notation.
///
/// Input is trimmed and lowercased first. Fails when the id does not match
/// the notation's pattern or encodes a non-positive coordinate.
pub fn parse(id: &str, notation: Notation) -> Result<HexCoord, HexFormatError> {
    let norm = id.trim().to_ascii_lowercase();
    let pattern_err = || HexFormatError::Pattern {
        id: id.to_string(),
        notation,
    };
    let caps = match notation {
        Notation::LetterNumber => letter_number_re().captures(&norm),
        Notation::Numeric4 => numeric4_re().captures(&norm),
    }
    .ok_or_else(pattern_err)?;

    let (col, row) = match notation {
        Notation::LetterNumber => {
            let letter = caps[1].bytes().next().expect("regex guarantees one letter");
            let col = i32::from(letter - b'a') + 1;
            let row: i32 = caps[2].parse().map_err(|_| pattern_err())?;
            (col, row)
        }
        Notation::Numeric4 => {
            let col: i32 = caps[1].parse().map_err(|_| pattern_err())?;
            let row: i32 = caps[2].parse().map_err(|_| pattern_err())?;
            (col, row)
        }
    };

    if col < 1 || row < 1 {
        return Err(HexFormatError::NonPositive { id: id.to_string() });
    }
    Ok(HexCoord { col, row })
}

/// Format a coordinate as a canonical hex id under the given notation.
pub fn format(coord: HexCoord, notation: Notation) -> Result<String, HexFormatError> {
    let unrepresentable = || HexFormatError::Unrepresentable {
        col: coord.col,
        row: coord.row,
        notation,
    };
    if coord.col < 1 || coord.row < 1 {
        return Err(unrepresentable());
    }
    match notation {
        Notation::LetterNumber => {
            if coord.col > 26 || coord.row > 999 {
                return Err(unrepresentable());
            }
            let letter = (b'a' + (coord.col - 1) as u8) as char;
            Ok(std::format!("{letter}{}", coord.row))
        }
        Notation::Numeric4 => {
            if coord.col > 99 || coord.row > 99 {
                return Err(unrepresentable());
            }
            Ok(std::format!("{:02}{:02}", coord.col, coord.row))
        }
    }
}

/// Normalize a hex id: parse then re-format.
pub fn normalize(id: &str, notation: Notation) -> Result<String, HexFormatError> {
    format(parse(id, notation)?, notation)
}

fn cube(coord: HexCoord) -> (i64, i64, i64) {
    // odd-q offset → cube, on 0-indexed coordinates
    let col = i64::from(coord.col) - 1;
    let row = i64::from(coord.row) - 1;
    let x = col;
    let z = row - (col - (col & 1)) / 2;
    let y = -x - z;
    (x, y, z)
}

/// Hex distance between two coordinates.
pub fn distance(a: HexCoord, b: HexCoord) -> u32 {
    let (ax, ay, az) = cube(a);
    let (bx, by, bz) = cube(b);
    let d = (ax - bx)
        .abs()
        .max((ay - by).abs())
        .max((az - bz).abs());
    d as u32
}

// odd-q neighbor offsets on 0-indexed coordinates, indexed by column parity
const NEIGHBOR_OFFSETS: [[(i32, i32); 6]; 2] = [
    // even 0-indexed column
    [(1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (0, 1)],
    // odd 0-indexed column
    [(1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1), (0, 1)],
];

/// The six coordinates adjacent to `coord`.
///
/// Results are not filtered by map bounds; coordinates off the western or
/// northern edge come back non-positive and fail [`format`].
pub fn neighbors(coord: HexCoord) -> [HexCoord; 6] {
    let parity = ((coord.col - 1).rem_euclid(2)) as usize;
    NEIGHBOR_OFFSETS[parity]
        .map(|(dc, dr)| HexCoord::new(coord.col + dc, coord.row + dr))
}

/// Order two coordinates west→east then north→south.
pub fn compare(a: HexCoord, b: HexCoord) -> Ordering {
    a.col.cmp(&b.col).then(a.row.cmp(&b.row))
}

/// Coordinate sort key of a canonical id, or `None` when malformed.
fn coord_key(id: &str) -> Option<(i32, i32)> {
    let notation = Notation::detect(id)?;
    parse(id, notation).ok().map(|c| (c.col, c.row))
}

/// A normalized hex id.
///
/// Wraps the canonical string form. `Ord` follows the coordinate comparator
/// (west→east then north→south), with the raw string as the final tiebreak
/// so the order stays total even for ids the comparator cannot decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexId(String);

impl HexId {
    /// Parse and normalize an id under the given notation.
    pub fn parse(id: &str, notation: Notation) -> Result<Self, HexFormatError> {
        Ok(Self(normalize(id, notation)?))
    }

    /// Parse an id, detecting the notation from its shape.
    pub fn parse_any(id: &str) -> Result<Self, HexFormatError> {
        let notation = Notation::detect(id).ok_or_else(|| HexFormatError::Pattern {
            id: id.to_string(),
            notation: Notation::LetterNumber,
        })?;
        Self::parse(id, notation)
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The coordinate this id encodes, if decodable.
    pub fn coord(&self) -> Option<HexCoord> {
        let notation = Notation::detect(&self.0)?;
        parse(&self.0, notation).ok()
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for HexId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexId {
    fn cmp(&self, other: &Self) -> Ordering {
        (coord_key(&self.0), &self.0).cmp(&(coord_key(&other.0), &other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_letter_number() {
        let c = parse("P12", Notation::LetterNumber).unwrap();
        assert_eq!(c, HexCoord::new(16, 12));
    }

    #[test]
    fn test_parse_numeric4() {
        let c = parse("1612", Notation::Numeric4).unwrap();
        assert_eq!(c, HexCoord::new(16, 12));
    }

    #[test]
    fn test_parse_rejects_pattern_mismatch() {
        assert!(matches!(
            parse("12p", Notation::LetterNumber),
            Err(HexFormatError::Pattern { .. })
        ));
        assert!(matches!(
            parse("p12", Notation::Numeric4),
            Err(HexFormatError::Pattern { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(matches!(
            parse("p0", Notation::LetterNumber),
            Err(HexFormatError::NonPositive { .. })
        ));
        assert!(matches!(
            parse("0012", Notation::Numeric4),
            Err(HexFormatError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_normalize_strips_padding_and_case() {
        assert_eq!(normalize(" P07 ", Notation::LetterNumber).unwrap(), "p7");
        assert_eq!(normalize("0709", Notation::Numeric4).unwrap(), "0709");
    }

    #[test]
    fn test_distance_adjacent_and_self() {
        let a = parse("p12", Notation::LetterNumber).unwrap();
        assert_eq!(distance(a, a), 0);
        for n in neighbors(a) {
            assert_eq!(distance(a, n), 1);
        }
    }

    #[test]
    fn test_neighbors_returns_six_distinct() {
        let a = HexCoord::new(5, 5);
        let ns = neighbors(a);
        for i in 0..6 {
            assert_ne!(ns[i], a);
            for j in (i + 1)..6 {
                assert_ne!(ns[i], ns[j]);
            }
        }
    }

    #[test]
    fn test_neighbors_not_bounds_filtered() {
        let ns = neighbors(HexCoord::new(1, 1));
        assert!(ns.iter().any(|n| n.col < 1 || n.row < 1));
    }

    #[test]
    fn test_compare_west_east_then_north_south() {
        let p2 = parse("p2", Notation::LetterNumber).unwrap();
        let p10 = parse("p10", Notation::LetterNumber).unwrap();
        let q1 = parse("q1", Notation::LetterNumber).unwrap();
        assert_eq!(compare(p2, p10), Ordering::Less);
        assert_eq!(compare(p10, q1), Ordering::Less);
    }

    #[test]
    fn test_hex_id_orders_by_coordinate_not_string() {
        let p2 = HexId::parse("p2", Notation::LetterNumber).unwrap();
        let p10 = HexId::parse("p10", Notation::LetterNumber).unwrap();
        assert!(p2 < p10);
    }

    proptest! {
        #[test]
        fn prop_round_trip_letter_number(col in 1i32..=26, row in 1i32..=999) {
            let id = format(HexCoord::new(col, row), Notation::LetterNumber).unwrap();
            let upper = id.to_ascii_uppercase();
            prop_assert_eq!(
                normalize(&upper, Notation::LetterNumber).unwrap(),
                normalize(&id, Notation::LetterNumber).unwrap()
            );
            prop_assert_eq!(parse(&id, Notation::LetterNumber).unwrap(), HexCoord::new(col, row));
        }

        #[test]
        fn prop_round_trip_numeric4(col in 1i32..=99, row in 1i32..=99) {
            let id = format(HexCoord::new(col, row), Notation::Numeric4).unwrap();
            prop_assert_eq!(parse(&id, Notation::Numeric4).unwrap(), HexCoord::new(col, row));
            prop_assert_eq!(normalize(&id, Notation::Numeric4).unwrap(), id);
        }

        #[test]
        fn prop_distance_symmetric(ac in 1i32..=26, ar in 1i32..=50, bc in 1i32..=26, br in 1i32..=50) {
            let a = HexCoord::new(ac, ar);
            let b = HexCoord::new(bc, br);
            prop_assert_eq!(distance(a, b), distance(b, a));
        }
    }
}
