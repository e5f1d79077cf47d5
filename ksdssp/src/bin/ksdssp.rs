//! Command-line Kabsch-Sander secondary structure assignment.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ksdssp::{assign_all, read_models, write_records, write_summary, Config};
use ksdssp_core::Result;

#[derive(Parser, Debug)]
#[command(
    name = "ksdssp",
    version,
    about = "Assign protein secondary structure with the Kabsch-Sander algorithm"
)]
struct Args {
    /// Input PDB file ("-" or absent for stdin)
    input: Option<PathBuf>,

    /// Output file for HELIX/SHEET records ("-" or absent for stdout)
    output: Option<PathBuf>,

    /// Hydrogen bond energy cutoff in kcal/mol
    #[arg(short = 'c', long, default_value_t = -0.5, allow_hyphen_values = true)]
    cutoff: f64,

    /// Minimum number of residues in a helix
    #[arg(long, default_value_t = 3, value_name = "N")]
    min_helix: usize,

    /// Minimum number of residues per sheet strand
    #[arg(long, default_value_t = 3, value_name = "N")]
    min_strand: usize,

    /// Do not merge ladders across beta bulges
    #[arg(short = 'B', long)]
    no_bulges: bool,

    /// Write a plain-text summary report to this file
    #[arg(short = 'S', long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase diagnostic verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ksdssp: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        hbond_cutoff: args.cutoff,
        min_helix_length: args.min_helix,
        min_strand_length: args.min_strand,
        merge_bulges: !args.no_bulges,
    };

    let input = read_input(args.input.as_deref())?;
    let mut models = read_models(&input)?;
    log::info!("read {} model(s)", models.len());

    assign_all(&mut models, &config);
    for model in &models {
        log::info!(
            "assigned {} helix(es), {} ladder(s), {} sheet(s)",
            model.helices.len(),
            model.ladders.len(),
            model.sheets.len(),
        );
    }

    let mut out = open_output(args.output.as_deref())?;
    write_records(&mut out, &models)?;
    out.flush()?;

    if let Some(path) = &args.summary {
        let mut report = BufWriter::new(File::create(path)?);
        write_summary(&mut report, &models)?;
        report.flush()?;
    }
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => Ok(std::fs::read_to_string(p)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn open_output(path: Option<&std::path::Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if p.as_os_str() != "-" => Ok(Box::new(BufWriter::new(File::create(p)?))),
        _ => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
