//! Module for errors.
use chrono::{Duration, NaiveDateTime};
use std::{error::Error, fmt::Display, path::PathBuf};

/// Error from locating, extracting, or listing radar files.
#[derive(Debug)]
pub enum R3dbrcErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Error reading a zip archive.
    Zip(::zip::result::ZipError),
    /// Bad regular expression for a timestamp pattern.
    Regex(::regex::Error),
    /// Error parsing a configuration file.
    Config(::serde_yaml::Error),
    /// Unknown product name.
    InvalidProduct(strum::ParseError),

    // My own errors from this crate
    /// There were no candidate files to choose from.
    NoCandidatesFound,
    /// A candidate file name did not contain a parseable timestamp.
    MalformedCandidateName(String),
    /// The closest candidate was still too far away in time.
    DeviationExceeded {
        /// Deviation of the closest candidate from the target time.
        deviation: Duration,
        /// The maximum allowed deviation.
        limit: Duration,
    },
    /// The daily radar archive does not exist.
    ArchiveMissing(PathBuf),
    /// No gridded product in the directory for this date.
    NoProductFile(PathBuf),
    /// An archive member would be extracted outside of the target directory.
    UnsafeMemberName(String),
    /// Unable to understand a date string.
    InvalidDate(String),
    /// The start of a date range is after the end.
    InvalidDateRange {
        /// Beginning of the range.
        start: NaiveDateTime,
        /// End of the range.
        end: NaiveDateTime,
    },
    /// A path template with an unknown placeholder or unbalanced braces.
    InvalidTemplate(String),
    /// A configuration value that is out of range.
    InvalidConfig(String),
}

impl Display for R3dbrcErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::R3dbrcErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            Zip(err) => write!(f, "zip archive error: {}", err),
            Regex(err) => write!(f, "invalid timestamp pattern: {}", err),
            Config(err) => write!(f, "configuration error: {}", err),
            InvalidProduct(err) => write!(f, "invalid product name: {}", err),

            NoCandidatesFound => write!(f, "no candidate files found"),
            MalformedCandidateName(name) => {
                write!(f, "no valid timestamp in file name: {}", name)
            }
            DeviationExceeded { deviation, limit } => write!(
                f,
                "closest file is {}s from the requested time, limit is {}s",
                deviation.num_seconds(),
                limit.num_seconds()
            ),
            ArchiveMissing(path) => write!(f, "{} does not exist", path.display()),
            NoProductFile(dir) => write!(f, "no product file found in {}", dir.display()),
            UnsafeMemberName(name) => write!(f, "refusing to extract archive member: {}", name),
            InvalidDate(val) => write!(f, "input date not understood: {}", val),
            InvalidDateRange { start, end } => write!(
                f,
                "beginning date {} is after ending date {}",
                start, end
            ),
            InvalidTemplate(template) => write!(f, "invalid path template: {}", template),
            InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl Error for R3dbrcErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use crate::errors::R3dbrcErr::*;

        match self {
            IO(err) => Some(err),
            Zip(err) => Some(err),
            Regex(err) => Some(err),
            Config(err) => Some(err),
            InvalidProduct(err) => Some(err),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for R3dbrcErr {
    fn from(err: ::std::io::Error) -> R3dbrcErr {
        R3dbrcErr::IO(err)
    }
}

impl From<::zip::result::ZipError> for R3dbrcErr {
    fn from(err: ::zip::result::ZipError) -> R3dbrcErr {
        R3dbrcErr::Zip(err)
    }
}

impl From<::regex::Error> for R3dbrcErr {
    fn from(err: ::regex::Error) -> R3dbrcErr {
        R3dbrcErr::Regex(err)
    }
}

impl From<::serde_yaml::Error> for R3dbrcErr {
    fn from(err: ::serde_yaml::Error) -> R3dbrcErr {
        R3dbrcErr::Config(err)
    }
}

impl From<strum::ParseError> for R3dbrcErr {
    fn from(err: strum::ParseError) -> R3dbrcErr {
        R3dbrcErr::InvalidProduct(err)
    }
}
