//! Command line options that are used across applications.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use strum::{AsStaticRef, IntoEnumIterator};

use crate::{
    batch::Runner,
    config::{Config, Product},
    errors::R3dbrcErr,
    radar::RadarId,
};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // Where to find files and what to write
    config: Config,
    // Directory to write the r3dbrc into
    out_dir: PathBuf,
    // Directory to extract radar scans into
    unzip_dir: PathBuf,
    // Run the wind retrieval after writing the r3dbrc
    run: bool,
}

impl<'a, 'b> CommonCmdLineArgs {
    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .author(crate_authors!())
            .about(about)
            .version(crate_version!())
            .arg(
                Arg::with_name("product")
                    .short("p")
                    .long("product")
                    .takes_value(true)
                    .conflicts_with("config")
                    .help("Gridded product to pair with the radar archive (cpol or opol)."),
            )
            .arg(
                Arg::with_name("config")
                    .short("c")
                    .long("config")
                    .takes_value(true)
                    .help("YAML configuration file to use instead of a built in product."),
            )
            .arg(
                Arg::with_name("rid")
                    .short("r")
                    .long("rid")
                    .takes_value(true)
                    .help("Radar Rapic ID.")
                    .long_help("Radar Rapic ID. Defaults to the one for the product."),
            )
            .arg(
                Arg::with_name("output")
                    .short("o")
                    .long("output")
                    .takes_value(true)
                    .default_value(".")
                    .help("Output directory for writing the r3dbrc."),
            )
            .arg(
                Arg::with_name("unzip")
                    .short("u")
                    .long("unzip")
                    .takes_value(true)
                    .default_value(".")
                    .help("Unzipping temporary directory (files won't be deleted!)."),
            )
            .arg(
                Arg::with_name("run")
                    .long("run")
                    .help("Run the wind retrieval after each r3dbrc is written.")
                    .long_help(concat!(
                        "Run the wind retrieval after each r3dbrc is written. Only has an effect",
                        " if the configuration names a command."
                    )),
            )
            .after_help(concat!(
                "Dates may be given as 201703041210, 2017-03-04T12:10, or 2017-03-04 12:10:00.",
                " A date without a time is midnight."
            ))
    }

    /// Process an `App` to get the parsed values out of it and the matches object so an application
    /// can continue with further argument parsing.
    pub fn matches(
        app: App<'a, 'b>,
        default_product: Product,
    ) -> Result<(Self, ArgMatches<'a>), R3dbrcErr> {
        let matches = app.get_matches();
        let cmd_line_opts = Self::from_matches(&matches, default_product)?;

        Ok((cmd_line_opts, matches))
    }

    /// Build the options from already parsed arguments.
    pub fn from_matches(
        matches: &ArgMatches,
        default_product: Product,
    ) -> Result<Self, R3dbrcErr> {
        let mut config = match (matches.value_of("config"), matches.value_of("product")) {
            (Some(path), _) => Config::load(&path)?,
            (None, Some(name)) => Product::from_str(name)?.config(),
            (None, None) => default_product.config(),
        };

        if let Some(rid) = matches.value_of("rid") {
            config.rid = RadarId::from(rid);
        }

        let out_dir = matches
            .value_of("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let unzip_dir = matches
            .value_of("unzip")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(CommonCmdLineArgs {
            config,
            out_dir,
            unzip_dir,
            run: matches.is_present("run"),
        })
    }

    /// Names accepted by `--product`.
    pub fn product_names() -> Vec<&'static str> {
        Product::iter().map(|product| product.as_static()).collect()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the output directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Get the directory to extract scans into
    pub fn unzip_dir(&self) -> &Path {
        &self.unzip_dir
    }

    /// Build a runner for these options.
    pub fn runner(&self) -> Runner {
        Runner::new(self.config.clone(), &self.out_dir, &self.unzip_dir).with_command(self.run)
    }
}
