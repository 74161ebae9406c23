//! Decoding of simulated-read identifiers
//!
//! Simulated benchmark reads encode their ground-truth origin in the query
//! name, using the fixed micro-format
//! `"<chr>:<regionStart>-<regionEnd>_<label>_<offset>_..."`. The offset is
//! relative to the region, so the ground-truth placement of the read is
//! `regionStart + offset .. regionEnd + offset`.

use std::num::ParseIntError;

#[derive(Debug)]
pub enum NameParseErr {
    /// No `:` between chromosome and region
    MissingChromDelimiter,
    /// No `-` between region start and end
    MissingRangeDelimiter,
    /// No `_` terminating the region end
    MissingRegionTerminator,
    /// Fewer than three underscore-delimited fields (no offset)
    MissingOffsetField,
    InvalidField(ParseIntError),
}

impl std::fmt::Display for NameParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameParseErr::MissingChromDelimiter => {
                write!(f, "Expected ':' after chromosome name")
            }
            NameParseErr::MissingRangeDelimiter => {
                write!(f, "Expected '-' between region start and end")
            }
            NameParseErr::MissingRegionTerminator => {
                write!(f, "Expected '_' after region end")
            }
            NameParseErr::MissingOffsetField => {
                write!(f, "Expected offset in third '_'-delimited field")
            }
            NameParseErr::InvalidField(e) => write!(f, "Invalid integer field: {}", e),
        }
    }
}

impl std::error::Error for NameParseErr {}

/// Ground-truth origin decoded from a read identifier
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedOrigin {
    pub chrom: String,
    pub region_start: i64,
    pub region_end: i64,
    pub read_offset: i64,
}

impl DerivedOrigin {
    pub fn derived_start(&self) -> i64 {
        self.region_start + self.read_offset
    }

    pub fn derived_end(&self) -> i64 {
        self.region_end + self.read_offset
    }
}

/// Parse a read identifier into its ground-truth origin
pub fn decode_read_name(name: &str) -> Result<DerivedOrigin, NameParseErr> {
    let (chrom, rest) = name
        .split_once(':')
        .ok_or(NameParseErr::MissingChromDelimiter)?;
    let (start_str, rest) = rest
        .split_once('-')
        .ok_or(NameParseErr::MissingRangeDelimiter)?;
    let (end_str, _) = rest
        .split_once('_')
        .ok_or(NameParseErr::MissingRegionTerminator)?;

    // The offset lives in the third underscore-delimited field of the
    // whole name: "<chr>:<start>-<end>_<label>_<offset>_..."
    let offset_str = name
        .split('_')
        .nth(2)
        .ok_or(NameParseErr::MissingOffsetField)?;

    let region_start = start_str
        .parse::<i64>()
        .map_err(NameParseErr::InvalidField)?;
    let region_end = end_str.parse::<i64>().map_err(NameParseErr::InvalidField)?;
    let read_offset = offset_str
        .parse::<i64>()
        .map_err(NameParseErr::InvalidField)?;

    Ok(DerivedOrigin {
        chrom: chrom.to_string(),
        region_start,
        region_end,
        read_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_name() {
        let origin = decode_read_name("chr7:1000-1200_read_50_x").unwrap();
        assert_eq!(origin.chrom, "chr7");
        assert_eq!(origin.region_start, 1000);
        assert_eq!(origin.region_end, 1200);
        assert_eq!(origin.read_offset, 50);
        assert_eq!(origin.derived_start(), 1050);
        assert_eq!(origin.derived_end(), 1250);
    }

    #[test]
    fn test_decode_trailing_fields_ignored() {
        let origin = decode_read_name("chrX:500-600_sim_25_0_extra").unwrap();
        assert_eq!(origin.read_offset, 25);
        assert_eq!(origin.derived_start(), 525);
    }

    #[test]
    fn test_decode_missing_colon() {
        assert!(matches!(
            decode_read_name("chr7_1000-1200_read_50"),
            Err(NameParseErr::MissingChromDelimiter)
        ));
    }

    #[test]
    fn test_decode_missing_range() {
        assert!(matches!(
            decode_read_name("chr7:10001200_read_50"),
            Err(NameParseErr::MissingRangeDelimiter)
        ));
    }

    #[test]
    fn test_decode_missing_offset() {
        // Only two underscore fields, no offset
        assert!(matches!(
            decode_read_name("chr7:1000-1200_read"),
            Err(NameParseErr::MissingOffsetField)
        ));
    }

    #[test]
    fn test_decode_non_numeric_offset() {
        assert!(matches!(
            decode_read_name("chr7:1000-1200_read_fifty_x"),
            Err(NameParseErr::InvalidField(_))
        ));
    }

    #[test]
    fn test_round_trip_with_region() {
        // Decoding then re-adding the offset reproduces the derived interval
        let origin = decode_read_name("chr2:40000-40150_r_1234_0").unwrap();
        assert_eq!(
            origin.derived_start() - origin.read_offset,
            origin.region_start
        );
        assert_eq!(origin.derived_end() - origin.read_offset, origin.region_end);
        assert!(origin.derived_start() < origin.derived_end());
    }
}
