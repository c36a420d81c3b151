//! Command-line front end
//!
//! One file: `uncrush crushed.png standard.png`. A whole tree:
//! `uncrush --dir Payload/`, which writes each result next to its source
//! with a suffix appended to the file stem and keeps going past files
//! that fail.

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use uncrush::{convert_file, convert_tree};

/// Convert Apple-optimized (CgBI) PNGs back into standard PNGs
#[derive(Parser, Debug)]
#[command(name = "uncrush", version)]
struct Cli {
    /// Source PNG to convert (file mode, together with OUTPUT)
    input: Option<PathBuf>,

    /// Where to write the converted PNG (file mode)
    output: Option<PathBuf>,

    /// Convert every .png under this directory instead
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Suffix appended to each output's file stem in directory mode
    #[arg(long, default_value = "-uncrushed")]
    suffix: String,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match (&cli.input, &cli.output, &cli.dir) {
        (Some(input), Some(output), None) => convert_file(input, output)
            .with_context(|| format!("converting {}", input.display()))?,
        (None, None, Some(dir)) => {
            let summary =
                convert_tree(dir, &cli.suffix).with_context(|| format!("walking {}", dir.display()))?;
            println!(
                "{} converted, {} failed, {} skipped",
                summary.converted, summary.failed, summary.skipped
            );
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("Try 'uncrush --help' for more information.");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// `RUST_LOG` still wins; `-v` only raises the default filter
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
