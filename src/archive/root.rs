use chrono::NaiveDate;
use std::path::PathBuf;

use super::RadarArchive;

use crate::errors::R3dbrcErr;

impl RadarArchive {
    /// Where the zip file for a day should be, whether or not it exists.
    pub fn archive_path(&self, date: NaiveDate) -> Result<PathBuf, R3dbrcErr> {
        self.config.archive_path(&self.rid, date)
    }

    /// Get the path to the zip file for a day, failing if there isn't one.
    pub fn locate(&self, date: NaiveDate) -> Result<PathBuf, R3dbrcErr> {
        let path = self.archive_path(date)?;

        if !path.is_file() {
            return Err(R3dbrcErr::ArchiveMissing(path));
        }

        Ok(path)
    }
}
