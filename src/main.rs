use anyhow::{Context, Result};
use clap::Parser;
use pclfilter::cli::{Cli, Commands};
use pclfilter::config::load_pipeline_config;
use pclfilter::io::{read_records, write_records};
use pclfilter::warnings::LogWarningSink;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Run {
            records,
            pipeline,
            output,
            timing,
            ..
        } => {
            let config = load_pipeline_config(&pipeline)?;
            let records = read_records(&records)?;
            let mut pipeline = config.build();

            let (filtered, timings) = pipeline.run_with_timing(records, &LogWarningSink);
            if timing {
                for stage in &timings {
                    log::info!("{}", stage.format());
                }
            }

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_records(BufWriter::new(file), &filtered)?;
                }
                None => write_records(std::io::stdout().lock(), &filtered)?,
            }
            Ok(())
        }
        Commands::Validate { pipeline, .. } => {
            let config = load_pipeline_config(&pipeline)?;
            let built = config.build();
            println!(
                "{}: {} stage(s)",
                pipeline.display(),
                built.stage_count()
            );
            for (i, stage) in built.stages().iter().enumerate() {
                println!("  {}. {} ({:?})", i + 1, stage.name(), stage.kind());
            }
            Ok(())
        }
    }
}

// -v: info, -vv: debug, -vvv: trace; RUST_LOG takes precedence
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
