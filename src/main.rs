#[macro_use]
extern crate lazy_static;
extern crate reqwest;
mod config;
mod filters;
mod mirrors;
mod options;
mod output;
mod sort;
use crate::config::{AppError, Config};
use crate::filters::filter_mirrors;
use crate::mirrors::fetch_mirrors;
use crate::options::{parse_args, ParsedOptions};
use crate::output::{render_mirrorlist, write_mirrorlist};
use crate::sort::sort_mirrors;
use std::env;
use std::process::ExitCode;

fn print_usage() {
    println!("USAGE");
    println!();
    println!("  archmirrors [OPTIONS]");
    println!();
    println!("OPTIONS");
    println!("  active");
    println!("    filter by only active servers");
    println!();
    println!("  country COUNTRY");
    println!("    filter by country (can be called multiple times)");
    println!();
    println!("  countrycode COUNTRYCODE");
    println!("    filter by country code (can be called multiple times)");
    println!();
    println!("  protocol PROTOCOL");
    println!("    filter by protocol (can be called multiple times)");
    println!();
    println!("  lastsync DATE");
    println!("    filter by last synchronisation date");
    println!();
    println!("  sortby SORT");
    println!("    sort by one of the following properties (can be called multiple times):");
    println!("    completion_pct, country, country_code, delay, duration_avg");
    println!("    duration_stddev, last_sync or score");
    println!();
    println!("  ipv4");
    println!("    filter by ipv4 availability");
    println!();
    println!("  ipv6");
    println!("    filter by ipv6 availability");
    println!();
    println!("  timeout MILLISECONDS");
    println!("    mirror status fetch timeout (default 15000)");
    println!();
    println!("  output FILENAME");
    println!("    output the result to a file (default to the standard output)");
    println!();
    println!("EXAMPLES");
    println!("  archmirrors");
    println!("  archmirrors help");
    println!("  archmirrors country france country spain");
    println!("  archmirrors sortby delay sortby score");
    println!("  archmirrors output mirrorlist.pacnew");
}

fn run(options: &ParsedOptions) -> Result<(), AppError> {
    let config = Config::from_options(options)?;

    let mirrors = fetch_mirrors(&config)?;
    let mut mirrors = filter_mirrors(mirrors, &config);
    sort_mirrors(&mut mirrors, &config.sorts);
    let mirrorlist = render_mirrorlist(&mirrors);

    match config.output.as_deref() {
        None => println!("{}", mirrorlist),
        Some(path) => {
            write_mirrorlist(path, &mirrorlist)?;
            println!("Successfully wrote mirrors to {}.", path);
        }
    }
    Ok(())
}

/// What to do with an invocation, decided before any network access.
#[derive(Debug, PartialEq)]
enum Preflight {
    Run,
    ShowUsage,
    UnknownArgument(String),
    LoneArgument(String),
}

fn preflight(parsed: &ParsedOptions) -> Preflight {
    // help wins over everything else
    if parsed.flag("help") {
        return Preflight::ShowUsage;
    }
    if let Some(unknown) = parsed.unknown.first() {
        return Preflight::UnknownArgument(unknown.clone());
    }
    if let Some(lone) = parsed.lone.first() {
        return Preflight::LoneArgument(lone.clone());
    }
    Preflight::Run
}

fn main() -> ExitCode {
    let parsed = parse_args(env::args().skip(1));

    match preflight(&parsed) {
        Preflight::ShowUsage => {
            print_usage();
            ExitCode::SUCCESS
        }
        Preflight::UnknownArgument(token) => {
            println!("Unknown argument: {}", token);
            ExitCode::from(1)
        }
        Preflight::LoneArgument(token) => {
            println!("Lone argument: {}", token);
            ExitCode::from(2)
        }
        Preflight::Run => match run(&parsed) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("{}", error);
                ExitCode::from(3)
            }
        },
    }
}
