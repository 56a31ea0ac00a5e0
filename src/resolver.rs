//! Pick the file whose name carries the timestamp closest to a target time.
//!
//! Radar files embed their scan time in the file name, e.g. `64_20170304_121000.nc` or
//! `CPOL_20170304.121000.nc`. A [`TimestampPattern`] finds and parses that stamp, and the
//! [`NearestFileResolver`] does a linear scan for the smallest absolute deviation from a target.

use chrono::{Duration, NaiveDateTime};
use log::debug;
use regex::Regex;

use crate::errors::R3dbrcErr;

/// How to find and parse the timestamp embedded in a file name.
#[derive(Debug, Clone)]
pub struct TimestampPattern {
    regex: Regex,
    format: String,
}

impl TimestampPattern {
    const UNDERSCORE_RE: &'static str = "[0-9]{8}_[0-9]{6}";
    const UNDERSCORE_FMT: &'static str = "%Y%m%d_%H%M%S";
    const ANY_SEPARATOR_RE: &'static str = "[0-9]{8}.[0-9]{6}";
    const ANY_SEPARATOR_FMT: &'static str = "%Y%m%d.%H%M%S";

    /// Build a pattern from a regular expression locating the stamp and a `chrono` format string
    /// to parse it.
    pub fn new(regex: &str, format: &str) -> Result<Self, R3dbrcErr> {
        Ok(TimestampPattern {
            regex: Regex::new(regex)?,
            format: format.to_owned(),
        })
    }

    /// Stamps like `20170304_121000`, used by the members of the daily radar archives.
    pub fn underscore() -> Self {
        TimestampPattern {
            regex: Regex::new(Self::UNDERSCORE_RE).expect("hard coded regex is valid"),
            format: Self::UNDERSCORE_FMT.to_owned(),
        }
    }

    /// Stamps like `20170304.121000`, used by the gridded products.
    ///
    /// Any single character is located as the separator, but only a `.` will parse.
    pub fn any_separator() -> Self {
        TimestampPattern {
            regex: Regex::new(Self::ANY_SEPARATOR_RE).expect("hard coded regex is valid"),
            format: Self::ANY_SEPARATOR_FMT.to_owned(),
        }
    }

    /// Find the first stamp in `name` and parse it.
    pub fn extract(&self, name: &str) -> Result<NaiveDateTime, R3dbrcErr> {
        let stamp = self
            .regex
            .find(name)
            .ok_or_else(|| R3dbrcErr::MalformedCandidateName(name.to_owned()))?;

        NaiveDateTime::parse_from_str(stamp.as_str(), &self.format)
            .map_err(|_| R3dbrcErr::MalformedCandidateName(name.to_owned()))
    }
}

/// A file name along with the time parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    name: String,
    valid_time: NaiveDateTime,
}

impl Candidate {
    /// Parse the timestamp out of a file name.
    pub fn parse(name: &str, pattern: &TimestampPattern) -> Result<Self, R3dbrcErr> {
        let valid_time = pattern.extract(name)?;

        Ok(Candidate {
            name: name.to_owned(),
            valid_time,
        })
    }

    /// The file name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The time embedded in the name.
    pub fn valid_time(&self) -> NaiveDateTime {
        self.valid_time
    }

    fn deviation_from(&self, target: NaiveDateTime) -> Duration {
        let diff = self.valid_time - target;
        if diff < Duration::zero() {
            -diff
        } else {
            diff
        }
    }
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The closest candidate.
    pub candidate: Candidate,
    /// Absolute difference between the candidate's time and the target, never negative.
    pub deviation: Duration,
}

/// Selects the candidate closest in time to a target, within an optional tolerance.
#[derive(Debug, Clone)]
pub struct NearestFileResolver {
    pattern: TimestampPattern,
    max_deviation: Option<Duration>,
}

impl NearestFileResolver {
    /// Create a resolver with no limit on the deviation.
    pub fn new(pattern: TimestampPattern) -> Self {
        NearestFileResolver {
            pattern,
            max_deviation: None,
        }
    }

    /// Reject results further than `limit` from the target.
    pub fn with_max_deviation(self, limit: Option<Duration>) -> Self {
        NearestFileResolver {
            max_deviation: limit,
            ..self
        }
    }

    /// The pattern used to find timestamps in names.
    pub fn pattern(&self) -> &TimestampPattern {
        &self.pattern
    }

    /// The tolerance, if any.
    pub fn max_deviation(&self) -> Option<Duration> {
        self.max_deviation
    }

    /// Find the candidate closest to `target`.
    ///
    /// Every name must carry a parseable timestamp, the first malformed name aborts the search.
    /// When two candidates are equally close the one that comes first wins.
    pub fn resolve<I, S>(
        &self,
        target: NaiveDateTime,
        candidates: I,
    ) -> Result<Resolution, R3dbrcErr>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut best: Option<Resolution> = None;
        let mut count = 0;

        for name in candidates {
            let candidate = Candidate::parse(name.as_ref(), &self.pattern)?;
            let deviation = candidate.deviation_from(target);
            count += 1;

            match best {
                Some(ref current) if current.deviation <= deviation => {}
                _ => {
                    best = Some(Resolution {
                        candidate,
                        deviation,
                    })
                }
            }
        }

        let best = best.ok_or(R3dbrcErr::NoCandidatesFound)?;
        debug!(
            "closest of {} candidates to {} is {} ({}s)",
            count,
            target,
            best.candidate.name(),
            best.deviation.num_seconds()
        );

        if let Some(limit) = self.max_deviation {
            if best.deviation > limit {
                return Err(R3dbrcErr::DeviationExceeded {
                    deviation: best.deviation,
                    limit,
                });
            }
        }

        Ok(best)
    }
}

/// Find the candidate whose embedded timestamp is closest to `target`.
///
/// Shorthand for building a [`NearestFileResolver`] and calling
/// [`resolve`](NearestFileResolver::resolve) on it once.
pub fn resolve<I, S>(
    target: NaiveDateTime,
    candidates: I,
    pattern: &TimestampPattern,
    max_deviation: Option<Duration>,
) -> Result<Resolution, R3dbrcErr>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    NearestFileResolver::new(pattern.clone())
        .with_max_deviation(max_deviation)
        .resolve(target, candidates)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
