use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::error;

use haar_catalog::config::WindowConfig;
use haar_catalog::load_catalog;
use haar_catalog::stats::catalog_stats;
use haar_catalog::validate::{coincident_rects, duplicate_pairs, out_of_bounds};

/// Re-checks a generated wavelet catalog against the construction rules
/// and prints its distribution statistics.
///
/// The checks run brute force, independently of the generator's
/// deduplication shortcuts, so they also catch bugs in the generator
/// itself.
#[derive(Debug, Clone, Parser)]
struct Args {
    /// Input catalog file to check
    input: PathBuf,
    /// Window size :
    /// side of the sampling window the catalog was generated for
    #[clap(short, long, default_value = "20")]
    window_size: i32,
    /// Minimum rectangle size :
    /// smallest rectangle side the catalog was generated for
    #[clap(short, long, default_value = "3")]
    min_rect_size: i32,
    /// Strict :
    /// if specified, exit with a non-zero status when any check finds a
    /// violation or a record cannot be parsed
    #[clap(short, long)]
    strict: bool,
    /// Json :
    /// if specified, print the statistics block as JSON instead of text
    #[clap(short, long)]
    json: bool,
    /// verbose :
    /// if specified, will print more information
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    pretty_env_logger::init();
    let Args {
        input,
        window_size,
        min_rect_size,
        strict,
        json,
        verbose,
    } = Args::parse();
    if verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    println!("Loading Haar wavelets from {}", input.display());
    let catalog = match load_catalog(&input) {
        Ok(ok) => ok,
        Err(err) => {
            error!("Couldn't open catalog : {}", err);
            exit(1);
        }
    };
    println!("Loaded {} wavelets.", catalog.records.len());

    for malformed in &catalog.malformed {
        println!(
            "Malformed record at line {}: {}",
            malformed.line_number, malformed.reason
        );
    }

    let window = WindowConfig {
        window_size,
        min_rect_width: min_rect_size,
        min_rect_height: min_rect_size,
    };

    let stats = catalog_stats(&catalog.records, window.window_size);
    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => {
                error!("Couldn't serialize statistics : {}", err);
                exit(1);
            }
        }
    } else {
        print!("{}", stats);
    }

    println!("Checking for overlapped rectangles...");
    let coincident = coincident_rects(&catalog.records);
    for &index in &coincident {
        println!("Overlaps ==> {}", catalog.records[index].wavelet);
    }

    println!("Checking for problems with rectangle sizes...");
    let bounds = out_of_bounds(&catalog.records, &window);
    for &index in &bounds {
        println!("Size problem ==> {}", catalog.records[index].wavelet);
    }

    println!("Checking for duplicated wavelets...");
    let duplicates = duplicate_pairs(&catalog.records);
    for &(first, second) in &duplicates {
        println!("Repeats ==> {}", catalog.records[first].wavelet);
        log::debug!("record {} repeats record {}", second, first);
    }

    let findings =
        catalog.malformed.len() + coincident.len() + bounds.len() + duplicates.len();
    if findings > 0 {
        println!("{} findings.", findings);
        if strict {
            exit(2);
        }
    }
}
