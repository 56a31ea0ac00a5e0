//! Parse the dates given on the command line.

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::R3dbrcErr;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y%m%d%H%M%S",
    "%Y%m%d%H%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d"];

/// Parse a date such as `201703041210` or `2017-03-04T12:10`.
///
/// A date without a time means midnight.
pub fn parse_date_time(val: &str) -> Result<NaiveDateTime, R3dbrcErr> {
    let val = val.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(val, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(val, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| R3dbrcErr::InvalidDate(val.to_owned()))
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_date_time() {
        let expected = NaiveDate::from_ymd_opt(2017, 3, 4)
            .unwrap()
            .and_hms_opt(12, 10, 0)
            .unwrap();

        for val in &[
            "201703041210",
            "20170304121000",
            "2017-03-04T12:10",
            "2017-03-04T12:10:00",
            "2017-03-04 12:10",
            " 2017-03-04 12:10:00 ",
        ] {
            assert_eq!(parse_date_time(val).unwrap(), expected, "{}", val);
        }

        let midnight = NaiveDate::from_ymd_opt(2017, 3, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_date_time("20170304").unwrap(), midnight);
        assert_eq!(parse_date_time("2017-03-04").unwrap(), midnight);
    }

    #[test]
    fn test_parse_bad_dates() {
        for val in &["", "yesterday", "2017-13-04T12:10", "2017030412"] {
            match parse_date_time(val) {
                Err(R3dbrcErr::InvalidDate(_)) => {}
                other => panic!("unexpected result for {}: {:?}", val, other),
            }
        }
    }
}
