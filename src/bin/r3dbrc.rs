//! r3dbrc - Write the r3dbrc for 3D winds at a single date.
//!
//! Finds the gridded product and radar scan closest to the date and to the date one time step
//! later, extracts the scans, and writes the file list.

use clap::Arg;
use r3dbrc::{parse_date_time, CommonCmdLineArgs, Product};
use std::error::Error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut cause = e.source();
        while let Some(inner) = cause {
            println!("caused by: {}", inner);
            cause = inner.source();
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let app = CommonCmdLineArgs::new_app("r3dbrc", "Generate the r3dbrc file for 3D Winds.").arg(
        Arg::with_name("date")
            .short("d")
            .long("date")
            .takes_value(true)
            .required(true)
            .help("Datetime format: 201703041210 or 2017-03-04T12:10"),
    );

    let (common_args, matches) = CommonCmdLineArgs::matches(app, Product::Cpol)?;

    let date = matches
        .value_of("date")
        .map(parse_date_time)
        .transpose()?
        .ok_or("missing date")?;

    let output = common_args.runner().process_at(date)?;
    println!("{}", output.path.display());

    Ok(())
}
