use std::path::PathBuf;

use brushograph::{init_logging, load_config, run_analyze, run_optimize, RunOptions};
use clap::Parser;

/// Insert color pickups and brush washes into painting plotter G-Code
#[derive(Parser, Debug)]
#[command(name = "brushograph", version, about)]
struct Cli {
    /// Input G-Code file
    input: PathBuf,

    /// Output file (default: <input stem>_optimized<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drawing distance between color pickups in mm [default: 100]
    #[arg(short = 'd', long = "distance")]
    distance: Option<f64>,

    /// Force a pickup after this multiple of the distance [default: 2.0]
    #[arg(short = 'f', long = "force-multiplier")]
    force_multiplier: Option<f64>,

    /// Insert pickups as soon as the distance is reached
    #[arg(long)]
    aggressive: bool,

    /// Debug logging and progress output
    #[arg(long)]
    debug: bool,

    /// Only analyze the file structure
    #[arg(long)]
    analyze: bool,

    /// Config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rewrite bare Z moves and G1 repositions in the output
    #[arg(long)]
    normalize: bool,

    /// Write the run report as JSON to this file
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            config: self.config.clone(),
            distance_threshold: self.distance,
            force_multiplier: self.force_multiplier,
            aggressive: self.aggressive,
            debug: self.debug,
            normalize: self.normalize,
            report_json: self.report_json.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_json)?;
    tracing::debug!(
        "brushograph {} (built {})",
        brushograph::VERSION,
        brushograph::BUILD_DATE
    );

    let options = cli.run_options();
    let config = load_config(options.config.as_deref())?;

    if cli.analyze {
        let analysis = run_analyze(&options.input, config.optimizer.contact_z)?;
        println!("File structure analysis:");
        println!("{}", analysis);
        return Ok(());
    }

    let outcome = run_optimize(&options, config)?;
    println!("{}", outcome.report.summary());
    println!("Optimized G-code saved to {}", outcome.output_path.display());

    Ok(())
}
