//! Resolve pairs of times into r3dbrc files, one pair or a whole date range.

use chrono::{Duration, NaiveDateTime};
use log::{error, info, warn};
use std::{
    error::Error,
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    archive::RadarArchive, config::Config, errors::R3dbrcErr, gridded::GriddedProducts,
    rc_file::RcFile, resolver::TimestampPattern,
};

/// Ties the gridded products, the radar archive, and the output locations together.
#[derive(Debug, Clone)]
pub struct Runner {
    config: Config,
    gridded: GriddedProducts,
    archive: RadarArchive,
    out_dir: PathBuf,   // Where the r3dbrc goes.
    unzip_dir: PathBuf, // Where extracted scans go, they are never cleaned up.
    run_command: bool,
}

/// What came of processing one pair of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairOutput {
    /// The file that was written.
    pub path: PathBuf,
    /// What was written to it.
    pub rc_file: RcFile,
}

/// Tally of a run over a date range.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of pairs that made it all the way to an r3dbrc.
    pub succeeded: usize,
    /// First time of each pair that failed.
    pub failed: Vec<NaiveDateTime>,
}

impl Runner {
    /// Set up for a configuration.
    pub fn new(config: Config, out_dir: &dyn AsRef<Path>, unzip_dir: &dyn AsRef<Path>) -> Self {
        let gridded = GriddedProducts::new(config.gridded.clone());
        let archive = RadarArchive::new(config.archive.clone(), config.rid.clone());

        Runner {
            config,
            gridded,
            archive,
            out_dir: out_dir.as_ref().to_path_buf(),
            unzip_dir: unzip_dir.as_ref().to_path_buf(),
            run_command: false,
        }
    }

    /// Run the configured program after each r3dbrc is written.
    pub fn with_command(self, run_command: bool) -> Self {
        Runner {
            run_command,
            ..self
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a time and the time one step later.
    pub fn process_at(&self, time: NaiveDateTime) -> Result<PairOutput, R3dbrcErr> {
        let step = self.config.time_step();
        let next = time.checked_add_signed(step).ok_or_else(|| {
            R3dbrcErr::InvalidConfig(format!(
                "time step of {} minutes from {} is out of range",
                step.num_minutes(),
                time
            ))
        })?;

        self.process_pair(time, next)
    }

    /// Find the files closest to both times, extract the scans, and write the r3dbrc.
    pub fn process_pair(
        &self,
        t0: NaiveDateTime,
        t1: NaiveDateTime,
    ) -> Result<PairOutput, R3dbrcErr> {
        let times = [t0, t1];

        let mut files = times
            .iter()
            .map(|&t| self.gridded.nearest(t))
            .collect::<Result<Vec<_>, _>>()?;

        // Make sure both archives are there before extracting anything.
        for t in &times {
            self.archive.locate(t.date())?;
        }

        let first_scan = self.archive.extract_nearest(t0, &self.unzip_dir)?;
        let last_scan = self.archive.extract_nearest(t1, &self.unzip_dir)?;

        // The output product is stamped with the time of the last scan.
        let valid_time = match self.config.output_product {
            Some(_) => Some(self.scan_time(&last_scan)?),
            None => None,
        };

        files.push(first_scan);
        files.push(last_scan);

        info!("Radar files found:");
        for file in &files {
            info!("  {}", file.display());
        }

        let mut rc_file = RcFile::new(self.config.header_lines.clone(), files);
        if let (Some(product), Some(valid_time)) = (&self.config.output_product, valid_time) {
            rc_file = rc_file.with_output_product(product, valid_time);
        }

        let path = rc_file.write_to(&self.out_dir, &self.config.rc_file_name)?;

        if self.run_command {
            if let Some(ref command) = self.config.command {
                Self::run(command)?;
            }
        }

        Ok(PairOutput { path, rc_file })
    }

    /// Process every pair in a range, skipping over the ones that fail.
    ///
    /// If `start` and `end` are the same the range is the following 24 hours.
    pub fn process_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BatchSummary, R3dbrcErr> {
        let mut summary = BatchSummary::default();

        for time in time_steps(start, end, self.config.time_step())? {
            match self.process_at(time) {
                Ok(_) => summary.succeeded += 1,
                Err(err) => {
                    error!("Problem with time stamp {}, moving to next timestamp.", time);
                    log_error_chain(&err);
                    summary.failed.push(time);
                }
            }
        }

        info!(
            "{} pairs processed, {} failed",
            summary.succeeded,
            summary.failed.len()
        );

        Ok(summary)
    }

    // Timestamp of an extracted scan, taken from its path inside the unzip directory.
    fn scan_time(&self, scan: &Path) -> Result<NaiveDateTime, R3dbrcErr> {
        let member = scan.strip_prefix(&self.unzip_dir).unwrap_or(scan);
        TimestampPattern::underscore().extract(&member.to_string_lossy())
    }

    fn run(command: &str) -> Result<(), R3dbrcErr> {
        let mut parts = command.split_whitespace();
        let program = match parts.next() {
            Some(program) => program,
            None => return Ok(()),
        };

        info!("running {}", command);
        let status = Command::new(program).args(parts).status()?;
        if !status.success() {
            warn!("{} exited with {}", command, status);
        }

        Ok(())
    }
}

/// Every time from `start` to `end` inclusive, `step` apart.
///
/// If `start` and `end` are the same the range is extended by 24 hours.
pub fn time_steps(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
) -> Result<impl Iterator<Item = NaiveDateTime>, R3dbrcErr> {
    if start > end {
        return Err(R3dbrcErr::InvalidDateRange { start, end });
    }

    let step_seconds = step.num_seconds();
    if step_seconds <= 0 {
        return Err(R3dbrcErr::InvalidConfig(format!(
            "time step must be positive, not {} seconds",
            step_seconds
        )));
    }

    let end = if start == end {
        end.checked_add_signed(Duration::hours(24))
            .ok_or(R3dbrcErr::InvalidDateRange { start, end })?
    } else {
        end
    };

    let steps = (end - start).num_seconds() / step_seconds;

    Ok((0..=steps).map(move |n| start + Duration::seconds(n * step_seconds)))
}

/// Log an error and everything that caused it.
pub fn log_error_chain(err: &dyn Error) {
    error!("  {}", err);

    let mut cause = err.source();
    while let Some(inner) = cause {
        error!("  caused by: {}", inner);
        cause = inner.source();
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
