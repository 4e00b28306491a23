use anyhow::Result;
use biotope_lib::app::{App, RunOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session file describing species, organisms and vegetation
    #[arg(short, long)]
    session: PathBuf,

    /// Custom config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of days to simulate
    #[arg(short, long, default_value_t = 365)]
    days: u32,

    /// Seed for the random source, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Run without the foraging extension
    #[arg(long)]
    no_foraging: bool,

    /// Write the final summary here (gzip-compressed if it ends in .gz)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> Result<()> {
    let args = Args::parse();
    biotope_core::init_logging(args.log_level);

    let options = RunOptions {
        session: args.session,
        config: args.config,
        days: args.days,
        seed: args.seed,
        foraging: !args.no_foraging,
        output: args.output,
    };

    let mut app = App::from_options(&options)?;
    let outcome = app.run(options.days)?;

    println!(
        "Simulated {} days: {} alive, {} dead",
        outcome.days_run, outcome.summary.alive_total, outcome.summary.dead_total
    );
    for (species, count) in &outcome.summary.organisms {
        println!("  {species}: {count}");
    }
    if outcome.extinct {
        println!("All organisms are dead.");
    }

    if let Some(path) = &options.output {
        app.save(path)?;
    }
    Ok(())
}
