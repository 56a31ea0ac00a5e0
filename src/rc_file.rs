//! The r3dbrc configuration file read by the wind retrieval.

use chrono::NaiveDateTime;
use log::info;
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{config::OutputProduct, errors::R3dbrcErr};

/// Contents of an r3dbrc file.
///
/// Written as the header lines, then the resolved files, then the output product path, one per
/// line with no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcFile {
    header_lines: Vec<String>,
    files: Vec<PathBuf>,
    output_product: Option<PathBuf>,
}

impl RcFile {
    /// Create the contents from the resolved input files.
    pub fn new(header_lines: Vec<String>, files: Vec<PathBuf>) -> Self {
        RcFile {
            header_lines,
            files,
            output_product: None,
        }
    }

    /// Append the path of the output product valid at `valid_time`.
    pub fn with_output_product(self, product: &OutputProduct, valid_time: NaiveDateTime) -> Self {
        RcFile {
            output_product: Some(product.path_at(valid_time)),
            ..self
        }
    }

    /// The resolved input files.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Where the retrieval will write its product, if configured.
    pub fn output_product(&self) -> Option<&Path> {
        self.output_product.as_deref()
    }

    /// Write to `dir/file_name`, replacing any existing file, and return the path.
    pub fn write_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf, R3dbrcErr> {
        let path = dir.join(file_name);
        std::fs::write(&path, self.to_string())?;
        info!("{} written", path.display());

        Ok(path)
    }
}

impl fmt::Display for RcFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lines = self
            .header_lines
            .iter()
            .cloned()
            .chain(self.files.iter().map(|p| p.display().to_string()))
            .chain(self.output_product.iter().map(|p| p.display().to_string()));

        for (i, line) in lines.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }

        Ok(())
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
