use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::error;

use haar_catalog::config::GenerationConfig;
use haar_catalog::{generate, save_catalog};

/// Generates the catalog of valid Haar wavelets for a square sampling
/// window and writes it as a line-oriented text file.
#[derive(Debug, Parser)]
struct Args {
    /// Output catalog file
    output: PathBuf,
    /// Window size :
    /// side of the square sampling window (in pixels)
    #[clap(short, long, default_value = "20")]
    window_size: i32,
    /// Minimum rectangle size :
    /// smallest allowed rectangle side
    #[clap(short, long, default_value = "3")]
    min_rect_size: i32,
    /// Overwrite :
    /// if specified, will overwrite the output file if it already exists
    #[clap(short, long)]
    overwrite: bool,
    /// Thread count :
    /// the number of threads used by rayon
    /// if not specified, rayon will use the number of cores available on the machine
    #[clap(short, long)]
    thread_count: Option<usize>,
    /// verbose :
    /// if specified, will print more information
    #[clap(short, long)]
    verbose: bool,
}

impl Args {
    fn handle_verbose(&self) {
        if !self.verbose {
            return;
        }
        log::set_max_level(log::LevelFilter::Debug);
    }

    fn handle_thread_count(&self) {
        if let Some(thread_count) = self.thread_count {
            rayon::ThreadPoolBuilder::new()
                .num_threads(thread_count)
                .build_global()
                .unwrap();
        }
    }

    fn validate_paths(&self) {
        if self.output.exists() && !self.overwrite {
            error!(
                "Output file already exists : {:?}\nUse --overwrite to overwrite it",
                self.output
            );
            exit(1);
        }
    }

    fn config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default();
        config.window.window_size = self.window_size;
        config.window.min_rect_width = self.min_rect_size;
        config.window.min_rect_height = self.min_rect_size;
        config
    }
}

lazy_static::lazy_static! {
    static ref ARGS: Args = Args::parse();
}

fn main() {
    pretty_env_logger::init();
    ARGS.handle_verbose();
    ARGS.handle_thread_count();
    ARGS.validate_paths();

    let config = ARGS.config();
    let wavelets = generate(&config);

    for plan in &config.plans {
        let count = wavelets
            .iter()
            .filter(|w| w.dimensions() == plan.dimensions)
            .count();
        println!("Total {}D wavelets generated: {}", plan.dimensions, count);
    }
    println!("Wavelets generated: {}", wavelets.len());

    print!("Writing wavelets to file...");
    if let Err(err) = save_catalog(&ARGS.output, &wavelets) {
        println!();
        error!("Couldn't write catalog : {}", err);
        exit(1);
    }
    println!(" done.");
}
