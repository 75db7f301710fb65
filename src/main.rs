//! CheBanca to HomeBank converter CLI
//!
//! Converts a CheBanca movements export into a CSV file that HomeBank can import.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- movimenti.xlsx
//! cargo run -- --delimiter ';' --mapping categorie.map movimenti.csv
//! cargo run -- -o homebank.csv --date-format '%d-%m-%y' movimenti.csv
//! ```
//!
//! The HomeBank file is written next to the input unless `--output` is given.
//! Diagnostics go to stderr; set `RUST_LOG` or pass `-v` for more detail.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Conversion error (file not found, malformed export, bad mapping file, etc.)
//! - 2: Invalid option values
//! - 255 (-1): Missing input file argument

use chebanca_homebank::cli;
use chebanca_homebank::pipeline::Converter;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    init_logging(args.verbose);

    let converter = match args.category_mapper() {
        Ok(mapper) => Converter::new(args.to_reader_config(), mapper)
            .with_date_format(args.date_format.clone()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output_path = args.output_path();
    if let Err(e) = converter.convert_file(&args.input_file, &output_path) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("HomeBank table written to {}", output_path.display());
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
