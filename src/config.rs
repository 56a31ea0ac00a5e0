//! Where to look for files, how strict to be about time differences, and what to write.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{errors::R3dbrcErr, radar::RadarId};

/// Radar products with a built in configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, AsStaticStr, EnumIter, Hash)]
pub enum Product {
    /// CPOL gridded data paired with the Berrimah archive.
    #[strum(to_string = "cpol", serialize = "CPOL")]
    Cpol,
    /// OceanPOL gridded data paired with the Berrimah archive.
    #[strum(
        to_string = "opol",
        serialize = "oceanpol",
        serialize = "OPOL",
        serialize = "OceanPOL"
    )]
    OceanPol,
}

impl Product {
    /// The configuration for this product.
    pub fn config(self) -> Config {
        match self {
            Product::Cpol => Config::cpol(),
            Product::OceanPol => Config::oceanpol(),
        }
    }
}

/// Everything needed to locate a pair of files and write the r3dbrc.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Radar id for the archive paths.
    pub rid: RadarId,
    /// Minutes between the two times in a pair, also the step through a date range.
    pub time_step_minutes: i64,
    /// The gridded products.
    pub gridded: GriddedConfig,
    /// The daily radar archives.
    pub archive: ArchiveConfig,
    /// Name of the file to write in the output directory.
    #[serde(default = "Config::default_rc_file_name")]
    pub rc_file_name: String,
    /// Lines written before the file list.
    #[serde(default)]
    pub header_lines: Vec<String>,
    /// Where the wind retrieval should put its results, appended after the file list.
    #[serde(default)]
    pub output_product: Option<OutputProduct>,
    /// Program to run after each r3dbrc is written.
    #[serde(default)]
    pub command: Option<String>,
}

/// Location of the gridded products, `{root}/{year}/{YYYYMMDD}/*.nc`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GriddedConfig {
    #[allow(missing_docs)]
    pub root: PathBuf,
    /// Largest acceptable time difference in seconds.
    #[serde(default)]
    pub max_deviation_seconds: Option<i64>,
}

/// Location of the daily zip archives.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    #[allow(missing_docs)]
    pub root: PathBuf,
    /// Path below the root, with `{rid}`, `{year}` and `{date}` placeholders.
    pub layout: String,
    /// Largest acceptable time difference in seconds.
    #[serde(default)]
    pub max_deviation_seconds: Option<i64>,
}

/// The output product of the wind retrieval, `{directory}/{prefix}_{YYYYMMDD_HHMMSS}.nc`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputProduct {
    #[allow(missing_docs)]
    pub directory: PathBuf,
    #[allow(missing_docs)]
    pub prefix: String,
}

impl Config {
    const DEFAULT_RC_FILE_NAME: &'static str = "r3dbrc";
    const DEFAULT_LAYOUT: &'static str = "{rid}/{year}/{rid}_{date}_level1b_grid_150km.zip";
    const BERRIMAH_2019_LAYOUT: &'static str = "{rid}_{date}_level1b_grid_150km.zip";
    const MAX_DEVIATION_SECONDS: i64 = 360;

    fn default_rc_file_name() -> String {
        Self::DEFAULT_RC_FILE_NAME.to_owned()
    }

    /// CPOL gridded data with the Berrimah level 1b archive.
    pub fn cpol() -> Self {
        Config {
            rid: RadarId::from(64),
            time_step_minutes: 10,
            gridded: GriddedConfig {
                root: PathBuf::from(
                    "/scratch/kl02/vhl548/cpol_level_1b/v2020/gridded/grid_150km_1000m",
                ),
                max_deviation_seconds: None,
            },
            archive: ArchiveConfig {
                root: PathBuf::from("/g/data/rq0/admin/level_1b/grid_150km"),
                layout: Self::DEFAULT_LAYOUT.to_owned(),
                max_deviation_seconds: None,
            },
            rc_file_name: Self::default_rc_file_name(),
            header_lines: vec![],
            output_product: None,
            command: None,
        }
    }

    /// OceanPOL gridded data with the 2019 Berrimah pickup, checked to within 6 minutes.
    pub fn oceanpol() -> Self {
        Config {
            rid: RadarId::from(63),
            time_step_minutes: 7,
            gridded: GriddedConfig {
                root: PathBuf::from("/scratch/kl02/vhl548/opol/v2020/gridded/grid_150km_1000m"),
                max_deviation_seconds: Some(Self::MAX_DEVIATION_SECONDS),
            },
            archive: ArchiveConfig {
                root: PathBuf::from("/scratch/kl02/jss548/data_pickup/berrima_level_1b/2019"),
                layout: Self::BERRIMAH_2019_LAYOUT.to_owned(),
                max_deviation_seconds: Some(Self::MAX_DEVIATION_SECONDS),
            },
            rc_file_name: ".r3dbrc".to_owned(),
            header_lines: vec![
                "/home/548/ajp548/3DWIND_WITH_DVAD/dout/".to_owned(),
                "/home/548/ajp548/3DWIND_WITH_DVAD/r3d_main.init".to_owned(),
            ],
            output_product: Some(OutputProduct {
                directory: PathBuf::from("/g/data/kl02/ajp548/3DWIND/OceanPOL"),
                prefix: "OceanPOL_BERR_3dwind".to_owned(),
            }),
            command: Some("./r3d_main".to_owned()),
        }
    }

    /// Parse a YAML configuration.
    pub fn from_yaml(text: &str) -> Result<Self, R3dbrcErr> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that deserialize fine but can't be used.
    pub fn validate(&self) -> Result<(), R3dbrcErr> {
        if self.time_step_minutes <= 0 || Duration::try_minutes(self.time_step_minutes).is_none() {
            return Err(R3dbrcErr::InvalidConfig(format!(
                "time_step_minutes must be a positive number of minutes, not {}",
                self.time_step_minutes
            )));
        }

        check_tolerance("gridded", self.gridded.max_deviation_seconds)?;
        check_tolerance("archive", self.archive.max_deviation_seconds)?;

        // Catch bad layouts now rather than part way through a batch.
        fill_template(&self.archive.layout, &self.rid, NaiveDate::MIN)?;

        Ok(())
    }

    /// Load a YAML configuration file.
    pub fn load(path: &dyn AsRef<Path>) -> Result<Self, R3dbrcErr> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Time between the two members of a pair.
    pub fn time_step(&self) -> Duration {
        Duration::try_minutes(self.time_step_minutes).unwrap_or_else(Duration::max_value)
    }
}

fn check_tolerance(section: &str, seconds: Option<i64>) -> Result<(), R3dbrcErr> {
    match seconds {
        Some(s) if s < 0 || Duration::try_seconds(s).is_none() => {
            Err(R3dbrcErr::InvalidConfig(format!(
                "{}.max_deviation_seconds out of range: {}",
                section, s
            )))
        }
        _ => Ok(()),
    }
}

// Out of range values have been rejected by `Config::validate` when loading, saturate the rest.
fn tolerance(seconds: Option<i64>) -> Option<Duration> {
    seconds.map(|s| Duration::try_seconds(s).unwrap_or_else(Duration::max_value))
}

impl GriddedConfig {
    /// Directory holding the products for a day.
    pub fn day_dir(&self, date: NaiveDate) -> PathBuf {
        self.root
            .join(date.year().to_string())
            .join(date.format("%Y%m%d").to_string())
    }

    /// The tolerance as a duration.
    pub fn max_deviation(&self) -> Option<Duration> {
        tolerance(self.max_deviation_seconds)
    }
}

impl ArchiveConfig {
    /// Path to the archive for a radar and day.
    pub fn archive_path(&self, rid: &RadarId, date: NaiveDate) -> Result<PathBuf, R3dbrcErr> {
        Ok(self.root.join(fill_template(&self.layout, rid, date)?))
    }

    /// The tolerance as a duration.
    pub fn max_deviation(&self) -> Option<Duration> {
        tolerance(self.max_deviation_seconds)
    }
}

impl OutputProduct {
    /// Path of the product valid at `valid_time`.
    pub fn path_at(&self, valid_time: NaiveDateTime) -> PathBuf {
        self.directory.join(format!(
            "{}_{}.nc",
            self.prefix,
            valid_time.format("%Y%m%d_%H%M%S")
        ))
    }
}

/// Replace the `{rid}`, `{year}`, and `{date}` placeholders in a path template.
pub fn fill_template(template: &str, rid: &RadarId, date: NaiveDate) -> Result<String, R3dbrcErr> {
    let invalid = || R3dbrcErr::InvalidTemplate(template.to_owned());

    let mut filled = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find(&['{', '}'][..]) {
        if rest[open..].starts_with('}') {
            return Err(invalid());
        }

        filled.push_str(&rest[..open]);
        rest = &rest[open + 1..];

        let close = rest.find('}').ok_or_else(invalid)?;
        match &rest[..close] {
            "rid" => filled.push_str(rid.as_str()),
            "year" => filled.push_str(&date.year().to_string()),
            "date" => filled.push_str(&date.format("%Y%m%d").to_string()),
            _ => return Err(invalid()),
        }
        rest = &rest[close + 1..];
    }
    filled.push_str(rest);

    Ok(filled)
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use std::str::FromStr;
    use strum::{AsStaticRef, IntoEnumIterator};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 3, 4).unwrap()
    }

    #[test]
    fn test_fill_template() {
        let rid = RadarId::from(64);
        assert_eq!(
            fill_template(Config::DEFAULT_LAYOUT, &rid, day()).unwrap(),
            "64/2017/64_20170304_level1b_grid_150km.zip"
        );
        assert_eq!(fill_template("plain.zip", &rid, day()).unwrap(), "plain.zip");

        for bad in &["{rid", "rid}", "{radar}_{date}.zip", "{}"] {
            match fill_template(bad, &rid, day()) {
                Err(R3dbrcErr::InvalidTemplate(t)) => assert_eq!(&t, bad),
                other => panic!("unexpected result for {}: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_preset_paths() {
        let cpol = Config::cpol();
        assert_eq!(
            cpol.archive.archive_path(&cpol.rid, day()).unwrap(),
            PathBuf::from(
                "/g/data/rq0/admin/level_1b/grid_150km/64/2017/64_20170304_level1b_grid_150km.zip"
            )
        );
        assert_eq!(
            cpol.gridded.day_dir(day()),
            PathBuf::from(
                "/scratch/kl02/vhl548/cpol_level_1b/v2020/gridded/grid_150km_1000m/2017/20170304"
            )
        );
        assert_eq!(cpol.time_step(), Duration::minutes(10));
        assert!(cpol.gridded.max_deviation().is_none());

        let opol = Config::oceanpol();
        assert_eq!(
            opol.archive.archive_path(&opol.rid, day()).unwrap(),
            PathBuf::from(
                "/scratch/kl02/jss548/data_pickup/berrima_level_1b/2019/63_20170304_level1b_grid_150km.zip"
            )
        );
        assert_eq!(opol.archive.max_deviation(), Some(Duration::seconds(360)));
        assert_eq!(opol.gridded.max_deviation(), Some(Duration::seconds(360)));
        assert_eq!(opol.rc_file_name, ".r3dbrc");
    }

    #[test]
    fn test_product_names() {
        assert_eq!(Product::from_str("cpol").unwrap(), Product::Cpol);
        assert_eq!(Product::from_str("opol").unwrap(), Product::OceanPol);
        assert_eq!(Product::from_str("OceanPOL").unwrap(), Product::OceanPol);
        assert!(Product::from_str("nexrad").is_err());
        assert_eq!(Product::OceanPol.as_static(), "opol");

        for product in Product::iter() {
            assert_eq!(Product::from_str(product.as_static()).unwrap(), product);
        }
        assert_eq!(Product::Cpol.config(), Config::cpol());
    }

    #[test]
    fn test_from_yaml() {
        let text = r#"
rid: 2
time_step_minutes: 6
gridded:
  root: /data/gridded
  max_deviation_seconds: 120
archive:
  root: /data/archive
  layout: "{rid}/{year}/{rid}_{date}.zip"
output_product:
  directory: /data/winds
  prefix: MEL_3dwind
"#;
        let config = Config::from_yaml(text).unwrap();

        assert_eq!(config.rid.as_str(), "02");
        assert_eq!(config.time_step(), Duration::minutes(6));
        assert_eq!(config.gridded.max_deviation(), Some(Duration::seconds(120)));
        assert_eq!(config.archive.max_deviation(), None);
        assert_eq!(config.rc_file_name, "r3dbrc");
        assert!(config.header_lines.is_empty());
        assert!(config.command.is_none());
        assert_eq!(
            config.archive.archive_path(&config.rid, day()).unwrap(),
            PathBuf::from("/data/archive/02/2017/02_20170304.zip")
        );
        assert_eq!(config.output_product.unwrap().prefix, "MEL_3dwind");
    }

    #[test]
    fn test_from_yaml_errors() {
        let bad_layout = r#"
rid: 2
time_step_minutes: 6
gridded:
  root: /data/gridded
archive:
  root: /data/archive
  layout: "{station}.zip"
"#;
        assert!(matches!(
            Config::from_yaml(bad_layout),
            Err(R3dbrcErr::InvalidTemplate(_))
        ));

        let missing_archive = "rid: 2\ntime_step_minutes: 6\ngridded:\n  root: /data\n";
        assert!(matches!(
            Config::from_yaml(missing_archive),
            Err(R3dbrcErr::Config(_))
        ));
    }

    fn yaml_with(time_step_minutes: &str, gridded_seconds: &str, archive_seconds: &str) -> String {
        format!(
            "rid: 63\ntime_step_minutes: {}\ngridded:\n  root: /data/gridded\n  max_deviation_seconds: {}\narchive:\n  root: /data/archive\n  layout: \"{{rid}}.zip\"\n  max_deviation_seconds: {}\n",
            time_step_minutes, gridded_seconds, archive_seconds
        )
    }

    #[test]
    fn test_from_yaml_rejects_bad_time_step() {
        assert!(Config::from_yaml(&yaml_with("7", "360", "360")).is_ok());

        for step in &["0", "-10", "9223372036854775807"] {
            match Config::from_yaml(&yaml_with(step, "360", "360")) {
                Err(R3dbrcErr::InvalidConfig(msg)) => assert!(msg.contains("time_step_minutes")),
                other => panic!("unexpected result for {}: {:?}", step, other),
            }
        }
    }

    #[test]
    fn test_from_yaml_rejects_bad_tolerance() {
        assert!(Config::from_yaml(&yaml_with("7", "0", "~")).is_ok());

        for seconds in &["-1", "9223372036854775807"] {
            match Config::from_yaml(&yaml_with("7", seconds, "360")) {
                Err(R3dbrcErr::InvalidConfig(msg)) => assert!(msg.starts_with("gridded.")),
                other => panic!("unexpected result for {}: {:?}", seconds, other),
            }
            match Config::from_yaml(&yaml_with("7", "360", seconds)) {
                Err(R3dbrcErr::InvalidConfig(msg)) => assert!(msg.starts_with("archive.")),
                other => panic!("unexpected result for {}: {:?}", seconds, other),
            }
        }
    }

    #[test]
    fn test_out_of_range_values_saturate() {
        let gridded = GriddedConfig {
            root: PathBuf::from("/data"),
            max_deviation_seconds: Some(i64::MAX),
        };
        assert_eq!(gridded.max_deviation(), Some(Duration::max_value()));

        let mut config = Config::cpol();
        config.time_step_minutes = i64::MAX;
        assert_eq!(config.time_step(), Duration::max_value());
        assert!(matches!(
            config.validate(),
            Err(R3dbrcErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_output_product_path() {
        let product = OutputProduct {
            directory: PathBuf::from("/winds/OceanPOL"),
            prefix: "OceanPOL_BERR_3dwind".to_owned(),
        };
        let valid_time = day().and_hms_opt(12, 20, 0).unwrap();

        assert_eq!(
            product.path_at(valid_time),
            PathBuf::from("/winds/OceanPOL/OceanPOL_BERR_3dwind_20170304_122000.nc")
        );
    }
}
