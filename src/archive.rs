//! Daily zip archives of radar scans.

use crate::{
    config::ArchiveConfig,
    radar::RadarId,
    resolver::{NearestFileResolver, TimestampPattern},
};

/// The archive of one radar, one zip file per day.
#[derive(Debug, Clone)]
pub struct RadarArchive {
    config: ArchiveConfig, // Where the daily zip files live.
    rid: RadarId,          // The radar.
    resolver: NearestFileResolver,
}

mod extract;
mod root;

impl RadarArchive {
    /// Set up access to the archives for a radar.
    pub fn new(config: ArchiveConfig, rid: RadarId) -> Self {
        let resolver = NearestFileResolver::new(TimestampPattern::underscore())
            .with_max_deviation(config.max_deviation());

        RadarArchive {
            config,
            rid,
            resolver,
        }
    }

    /// The radar this archive holds.
    pub fn rid(&self) -> &RadarId {
        &self.rid
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
