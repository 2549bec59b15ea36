///! Element set parser
///!
///! Each record is an optional name line followed by two 69-column data
///! lines. Data lines are checksummed; line 2 must repeat the catalog number
///! of the line 1 before it. A completed line 2 merges the record into the
///! store.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use satsnap_common::RecordUpdate;

use super::columns::{column, width};
use super::detect::ELEMENT_LINE_WIDTH;
use super::store::{MergeOutcome, RecordStore};
use crate::error::{Result, SnapshotError};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Two-digit years above this belong to the 1900s
const YEAR_PIVOT: u32 = 56;

/// Data line discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    First,
    Second,
}

/// Modulo-10 sum of the digits in the first 68 columns, minus signs counting 1
pub fn checksum(line: &str) -> u32 {
    line.chars()
        .take(ELEMENT_LINE_WIDTH - 1)
        .map(|c| match c {
            '0'..='9' => c.to_digit(10).unwrap_or(0),
            '-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10
}

/// Four-digit year for a two-digit epoch year
pub fn epoch_year(yy: u32) -> i32 {
    if yy > YEAR_PIVOT {
        1900 + yy as i32
    } else {
        2000 + yy as i32
    }
}

fn verify_checksum(line: &str) -> Result<()> {
    let last = column(line, ELEMENT_LINE_WIDTH - 1, ELEMENT_LINE_WIDTH);
    let expected = last
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| invalid_field("checksum", last, line))?;
    let computed = checksum(line);
    if computed != expected {
        return Err(SnapshotError::Checksum {
            expected,
            computed,
            line: line.to_string(),
        });
    }
    Ok(())
}

fn line_type(line: &str) -> Result<LineType> {
    match column(line, 0, 2) {
        "1 " => Ok(LineType::First),
        "2 " => Ok(LineType::Second),
        _ => Err(SnapshotError::InvalidLine {
            line: line.to_string(),
        }),
    }
}

fn invalid_field(field: &'static str, value: &str, line: &str) -> SnapshotError {
    SnapshotError::InvalidField {
        field,
        value: value.to_string(),
        line: line.to_string(),
    }
}

fn parse_f64(line: &str, field: &'static str, start: usize, end: usize) -> Result<f64> {
    let raw = column(line, start, end);
    raw.trim()
        .parse::<f64>()
        .map_err(|_| invalid_field(field, raw, line))
}

fn parse_u32(line: &str, field: &'static str, start: usize, end: usize) -> Result<u32> {
    let raw = column(line, start, end);
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid_field(field, raw, line))
}

/// Eccentricity column carries an implied leading decimal point
fn parse_eccentricity(line: &str) -> Result<f64> {
    let raw = column(line, 26, 33);
    format!("0.{}", raw)
        .parse::<f64>()
        .map_err(|_| invalid_field("eccentricity", raw, line))
}

/// Epoch from the year and fractional day columns, counted in days from Jan 1 00:00
fn parse_epoch(line: &str) -> Result<DateTime<Utc>> {
    let year = epoch_year(parse_u32(line, "epoch year", 18, 20)?);
    let day = parse_f64(line, "epoch day", 20, 32)?;
    if !day.is_finite() {
        return Err(invalid_field("epoch day", column(line, 20, 32), line));
    }

    let start_of_year = NaiveDate::from_yo_opt(year, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| invalid_field("epoch year", column(line, 18, 20), line))?
        .and_utc();
    let offset = Duration::microseconds((day * MICROS_PER_DAY).round() as i64);
    Ok(start_of_year + offset)
}

/// Fields carried from a line 1 (and the name line before it) to its line 2
#[derive(Debug, Default)]
struct ElementSetState {
    name: String,
    raw_id: Option<String>,
    classification: Option<char>,
    epoch: Option<DateTime<Utc>>,
    international_designator: Option<String>,
}

impl ElementSetState {
    fn read_first_line(&mut self, line: &str) -> Result<()> {
        self.raw_id = Some(column(line, 2, 7).to_string());
        self.classification = column(line, 7, 8).chars().next();
        self.international_designator = Some(column(line, 9, 17).to_string());
        self.epoch = Some(parse_epoch(line)?);
        Ok(())
    }

    fn read_second_line(&self, line: &str, catalog_set: &str) -> Result<(String, RecordUpdate)> {
        let found = column(line, 2, 7);
        if self.raw_id.as_deref() != Some(found) {
            return Err(SnapshotError::IdentifierMismatch {
                expected: self.raw_id.clone().unwrap_or_else(|| "none".to_string()),
                found: found.to_string(),
            });
        }

        let update = RecordUpdate {
            name: Some(self.name.clone()),
            catalog_set: Some(catalog_set.to_string()),
            classification: self.classification,
            epoch: self.epoch,
            international_designator: self.international_designator.clone(),
            inclination: Some(parse_f64(line, "inclination", 8, 16)?),
            raan: Some(parse_f64(line, "right ascension", 17, 25)?),
            eccentricity: Some(parse_eccentricity(line)?),
            argument_of_perigee: Some(parse_f64(line, "argument of perigee", 34, 42)?),
            mean_anomaly: Some(parse_f64(line, "mean anomaly", 43, 51)?),
            mean_motion: Some(parse_f64(line, "mean motion", 52, 63)?),
            revolution_number: Some(parse_u32(line, "revolution number", 63, 68)?),
            owner: None,
        };
        Ok((found.trim().to_string(), update))
    }
}

/// Parse element sets from one file into `store`, tagging them with `catalog_set`.
///
/// Returns the number of element sets accepted (created or updated).
pub fn parse_element_sets(lines: &[String], catalog_set: &str, store: &mut RecordStore) -> Result<usize> {
    let mut state = ElementSetState::default();
    let mut accepted = 0;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if width(line) != ELEMENT_LINE_WIDTH {
            state.name = line.to_string();
            continue;
        }

        verify_checksum(line)?;
        match line_type(line)? {
            LineType::First => state.read_first_line(line)?,
            LineType::Second => {
                let (id, update) = state.read_second_line(line, catalog_set)?;
                match store.merge(&id, update, true) {
                    MergeOutcome::Created | MergeOutcome::Updated => accepted += 1,
                    MergeOutcome::Stale | MergeOutcome::Skipped => {}
                }
            }
        }
    }

    tracing::debug!("Accepted {} element sets for set '{}'", accepted, catalog_set);
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| format!("{}\n", l)).collect()
    }

    #[test]
    fn test_checksum_matches_final_digit() {
        assert_eq!(checksum(ISS_LINE1), 7);
        assert_eq!(checksum(ISS_LINE2), 7);
    }

    #[test]
    fn test_year_pivot() {
        assert_eq!(epoch_year(56), 2056);
        assert_eq!(epoch_year(57), 1957);
        assert_eq!(epoch_year(0), 2000);
        assert_eq!(epoch_year(99), 1999);
    }

    #[test]
    fn test_eccentricity_implied_decimal() {
        let line = format!("{}1234567{}", &ISS_LINE2[..26], &ISS_LINE2[33..]);
        assert!((parse_eccentricity(&line).unwrap() - 0.1234567).abs() < 1e-12);
    }

    #[test]
    fn test_epoch_counts_days_from_new_year() {
        let line = "1 00005U 98067A   20001.00000000 -.00002182  00000-0 -11606-4 0  2927";
        assert_eq!(parse_epoch(line).unwrap(), Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(parse_epoch(line).unwrap().timestamp_millis(), 1_577_923_200_000);
    }

    #[test]
    fn test_epoch_keeps_sub_second_precision() {
        let epoch = parse_epoch(ISS_LINE1).unwrap();
        // 264.51782528 -> Jan 1 2008 plus 264 days (Sep 21) plus 0.51782528 day
        let expected = Utc.with_ymd_and_hms(2008, 9, 21, 0, 0, 0).unwrap()
            + Duration::microseconds((0.51782528 * MICROS_PER_DAY).round() as i64);
        assert_eq!(epoch, expected);
    }

    #[test]
    fn test_parse_full_element_set() {
        let mut store = RecordStore::new();
        let count = parse_element_sets(&lines(&["ISS (ZARYA)", ISS_LINE1, ISS_LINE2]), "stations", &mut store).unwrap();
        assert_eq!(count, 1);

        let rec = store.get("25544").unwrap();
        assert_eq!(rec.name, "ISS (ZARYA)");
        assert_eq!(rec.catalog_set, "stations");
        assert_eq!(rec.classification, Some('U'));
        assert_eq!(rec.international_designator, "98067A  ");
        assert_eq!(rec.inclination, 51.6416);
        assert_eq!(rec.raan, 247.4627);
        assert!((rec.eccentricity - 0.0006703).abs() < 1e-12);
        assert_eq!(rec.argument_of_perigee, 130.536);
        assert_eq!(rec.mean_anomaly, 325.0288);
        assert_eq!(rec.mean_motion, 15.72125391);
        assert_eq!(rec.revolution_number, 56353);
        assert!(rec.owner.is_none());
    }

    #[test]
    fn test_two_line_sets_reuse_previous_name() {
        let mut store = RecordStore::new();
        let raw = [
            "FIRST NAME",
            "1 00005U 98067A   20001.00000000 -.00002182  00000-0 -11606-4 0  2927",
            "2 00005  51.6416 247.4627 0006703 130.5360   0.0000 15.00000000563534",
            "1 00011U 98067A   20005.00000000 -.00002182  00000-0 -11606-4 0  2928",
            "2 00011  51.6416 247.4627 0006703 130.5360  10.0000 14.00000000563531",
        ];
        parse_element_sets(&lines(&raw), "mixed", &mut store).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("00011").unwrap().name, "FIRST NAME");
    }

    #[test]
    fn test_checksum_failure() {
        let bad = format!("{}8", &ISS_LINE1[..68]);
        let mut store = RecordStore::new();
        let err = parse_element_sets(&lines(&["ISS", bad.as_str(), ISS_LINE2]), "stations", &mut store).unwrap_err();
        match err {
            SnapshotError::Checksum { expected, computed, .. } => {
                assert_eq!(expected, 8);
                assert_eq!(computed, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_line_discriminant() {
        // '3' adds 2 to the digit sum of a line-1 body, so fix up the checksum
        let body = format!("3{}", &ISS_LINE1[1..68]);
        let line = format!("{}{}", body, checksum(&body));
        let mut store = RecordStore::new();
        let err = parse_element_sets(&lines(&[line.as_str()]), "stations", &mut store).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidLine { .. }));
    }

    #[test]
    fn test_identifier_mismatch() {
        let other = "2 00011  51.6416 247.4627 0006703 130.5360  10.0000 14.00000000563531";
        let mut store = RecordStore::new();
        let err = parse_element_sets(&lines(&["ISS", ISS_LINE1, other]), "stations", &mut store).unwrap_err();
        match err {
            SnapshotError::IdentifierMismatch { expected, found } => {
                assert_eq!(expected, "25544");
                assert_eq!(found, "00011");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_second_line_without_first_is_mismatch() {
        let mut store = RecordStore::new();
        let err = parse_element_sets(&lines(&[ISS_LINE2]), "stations", &mut store).unwrap_err();
        assert!(matches!(err, SnapshotError::IdentifierMismatch { .. }));
    }

    #[test]
    fn test_older_element_set_is_not_counted() {
        let raw = [
            "NEW",
            "1 00005U 98067A   20001.00000000 -.00002182  00000-0 -11606-4 0  2927",
            "2 00005  51.6416 247.4627 0006703 130.5360   0.0000 15.00000000563534",
            "OLD",
            "1 00005U 98067A   20000.50000000 -.00002182  00000-0 -11606-4 0  2921",
            "2 00005  51.6416 247.4627 0006703 130.5360   0.0000 15.00000000563534",
        ];
        let mut store = RecordStore::new();
        let count = parse_element_sets(&lines(&raw), "stations", &mut store).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.get("00005").unwrap().name, "NEW");
    }

    proptest! {
        #[test]
        fn mutated_digit_changes_checksum(pos in 0usize..68, bump in 1u32..10) {
            let line = ISS_LINE2;
            let original = line.as_bytes()[pos] as char;
            prop_assume!(original.is_ascii_digit());

            let replaced = char::from_digit((original.to_digit(10).unwrap() + bump) % 10, 10).unwrap();
            let mut mutated: Vec<char> = line.chars().collect();
            mutated[pos] = replaced;
            let mutated: String = mutated.into_iter().collect();

            prop_assert_ne!(checksum(&mutated), checksum(line));
            prop_assert!(verify_checksum(&mutated).is_err());
        }
    }
}
