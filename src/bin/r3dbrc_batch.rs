//! r3dbrc-batch - Write the r3dbrc and run the 3D winds for every time step in a date range.
//!
//! A time step that fails is reported and skipped.

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
    let app = CommonCmdLineArgs::new_app(
        "r3dbrc-batch",
        "Generate the .r3dbrc file for 3D Winds over a range of dates.",
    )
    .arg(
        Arg::with_name("sdate")
            .short("s")
            .long("sdate")
            .takes_value(true)
            .required(true)
            .help("Start datetime, format: 201703041210 or 2017-03-04T12:10"),
    )
    .arg(
        Arg::with_name("edate")
            .short("e")
            .long("edate")
            .takes_value(true)
            .required(true)
            .help("End datetime, format: 201703041210 or 2017-03-04T12:10")
            .long_help(concat!(
                "End datetime, format: 201703041210 or 2017-03-04T12:10. If it is the same as",
                " the start datetime the range covers the following 24 hours."
            )),
    );

    let (common_args, matches) = CommonCmdLineArgs::matches(app, Product::OceanPol)?;

    let start = parse_date_time(matches.value_of("sdate").ok_or("missing start date")?)?;
    let end = parse_date_time(matches.value_of("edate").ok_or("missing end date")?)?;

    let summary = common_args.runner().process_range(start, end)?;

    if !summary.failed.is_empty() {
        println!("Time stamps with problems:");
        for time in &summary.failed {
            println!("  {}", time);
        }
    }

    Ok(())
}
