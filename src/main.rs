//! slowbar - a slow synthetic workload behind a progress bar.

use clap::Parser;
use eyre::{Context, Result};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use slowbar::cli::Cli;
use slowbar::config::Config;
use slowbar::{NoProgress, Progress, ThreadSleeper};

fn setup_logging(level: Option<&str>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    // Priority: --log-level > config file > RUST_LOG > warn
    match level {
        Some(s) => {
            let filter = s.parse::<LevelFilter>().unwrap_or_else(|_| {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                LevelFilter::Warn
            });
            builder.filter_level(filter);
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(LevelFilter::Warn);
        }
        None => {}
    }

    builder.try_init().context("Failed to initialise logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    let mut rng = match cli.seed {
        Some(seed) => {
            info!("Seeding with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let workload = &config.workload;
    let summary = if cli.quiet {
        workload.run(&mut rng, ThreadSleeper, NoProgress)?
    } else {
        let progress = Progress::new(workload.iterations, config.label.as_str())?;
        workload.run(&mut rng, ThreadSleeper, progress)?
    };

    println!(
        "Complete! {} units, {:.2}s asleep.",
        summary.units,
        summary.slept.as_secs_f64()
    );
    Ok(())
}
