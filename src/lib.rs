#![deny(missing_docs)]
//! Find the radar files closest in time to a pair of dates and write the r3dbrc configuration
//! for the 3D wind retrieval.
//!
//! Gridded products live in one directory per day, the radar scans in one zip archive per day.
//! The [`NearestFileResolver`] picks the file whose name has the closest timestamp.

//
// Public API
//
pub use crate::archive::RadarArchive;
pub use crate::batch::{log_error_chain, time_steps, BatchSummary, PairOutput, Runner};
pub use crate::cmd_line::CommonCmdLineArgs;
pub use crate::config::{ArchiveConfig, Config, GriddedConfig, OutputProduct, Product};
pub use crate::errors::R3dbrcErr;
pub use crate::gridded::GriddedProducts;
pub use crate::radar::RadarId;
pub use crate::rc_file::RcFile;
pub use crate::resolver::{resolve, Candidate, NearestFileResolver, Resolution, TimestampPattern};
pub use crate::time_parse::parse_date_time;

//
// Implementation only
//
#[macro_use]
extern crate clap;
#[macro_use]
extern crate strum_macros;

mod archive;
mod batch;
mod cmd_line;
mod config;
mod errors;
mod gridded;
mod radar;
mod rc_file;
mod resolver;
mod time_parse;
