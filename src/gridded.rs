//! Find the gridded product closest to a time.

use chrono::NaiveDateTime;
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    config::GriddedConfig,
    errors::R3dbrcErr,
    resolver::{NearestFileResolver, TimestampPattern},
};

/// Gridded NetCDF products stored in one directory per day.
#[derive(Debug, Clone)]
pub struct GriddedProducts {
    config: GriddedConfig,
    resolver: NearestFileResolver,
}

impl GriddedProducts {
    const EXTENSION: &'static str = "nc";

    /// Set up a locator.
    pub fn new(config: GriddedConfig) -> Self {
        let resolver = NearestFileResolver::new(TimestampPattern::any_separator())
            .with_max_deviation(config.max_deviation());

        GriddedProducts { config, resolver }
    }

    /// Get the path of the product closest in time to `target`.
    pub fn nearest(&self, target: NaiveDateTime) -> Result<PathBuf, R3dbrcErr> {
        let day_dir = self.config.day_dir(target.date());
        let names = self.product_names(&day_dir)?;
        debug!("{} products in {}", names.len(), day_dir.display());

        match self.resolver.resolve(target, &names) {
            Ok(res) => Ok(day_dir.join(res.candidate.name())),
            Err(R3dbrcErr::NoCandidatesFound) => Err(R3dbrcErr::NoProductFile(day_dir)),
            Err(err) => Err(err),
        }
    }

    // Sorted names of the NetCDF files in a directory, none if the directory doesn't exist.
    // Hidden files are skipped.
    fn product_names(&self, day_dir: &Path) -> Result<Vec<String>, R3dbrcErr> {
        if !day_dir.is_dir() {
            return Ok(vec![]);
        }

        let mut names: Vec<String> = std::fs::read_dir(day_dir)?
            .filter_map(Result::ok)
            .map(|de| de.path())
            .filter(|p| p.is_file())
            .filter(|p| p.extension().map_or(false, |ext| ext == Self::EXTENSION))
            .filter_map(|p| p.file_name().map(ToOwned::to_owned))
            .map(|p| p.to_string_lossy().to_string())
            .filter(|name| !name.starts_with('.'))
            .collect();

        names.sort();

        Ok(names)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
