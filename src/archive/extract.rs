//! Pull a single scan out of a daily zip file.

use chrono::NaiveDateTime;
use log::debug;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use zip::ZipArchive;

use super::RadarArchive;

use crate::errors::R3dbrcErr;

impl RadarArchive {
    /// Extract the scan closest in time to `target` into `unzip_dir`.
    ///
    /// The member keeps its path relative to the root of the zip file. Returns the path of the
    /// extracted file.
    pub fn extract_nearest(
        &self,
        target: NaiveDateTime,
        unzip_dir: &Path,
    ) -> Result<PathBuf, R3dbrcErr> {
        let zip_path = self.locate(target.date())?;
        let mut zip = ZipArchive::new(File::open(&zip_path)?)?;

        let names = Self::names_in(&mut zip)?;
        debug!("{} members in {}", names.len(), zip_path.display());

        let res = self.resolver.resolve(target, &names)?;

        Self::extract_member(&mut zip, res.candidate.name(), unzip_dir)
    }

    /// Names of the files in a zip archive, in archive order. Directories are skipped.
    pub fn member_names(zip_path: &Path) -> Result<Vec<String>, R3dbrcErr> {
        let mut zip = ZipArchive::new(File::open(zip_path)?)?;
        Self::names_in(&mut zip)
    }

    // Raw access so a member this build can't decompress still has a name.
    fn names_in(zip: &mut ZipArchive<File>) -> Result<Vec<String>, R3dbrcErr> {
        let mut names = Vec::with_capacity(zip.len());

        for idx in 0..zip.len() {
            let member = zip.by_index_raw(idx)?;
            if !member.is_dir() {
                names.push(member.name().to_owned());
            }
        }

        Ok(names)
    }

    fn extract_member(
        zip: &mut ZipArchive<File>,
        name: &str,
        unzip_dir: &Path,
    ) -> Result<PathBuf, R3dbrcErr> {
        let mut member = zip.by_name(name)?;

        let relative = member
            .enclosed_name()
            .map(ToOwned::to_owned)
            .ok_or_else(|| R3dbrcErr::UnsafeMemberName(name.to_owned()))?;
        let out_path = unzip_dir.join(relative);

        if let Some(parent) = out_path.parent() {
            create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(&out_path)?);
        std::io::copy(&mut member, &mut out)?;
        out.flush()?;
        debug!("extracted {} to {}", name, out_path.display());

        Ok(out_path)
    }
}
