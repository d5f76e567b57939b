//! fclog CLI - load knowledge-base files and query them interactively.

use std::path::PathBuf;

use clap::Parser;
use fclog::kb::{KbConfig, Verbosity};
use fclog::repl::Repl;

#[derive(Parser)]
#[command(name = "fclog", version = env!("CARGO_PKG_VERSION"), about = "Forward-chaining reasoner with truth maintenance")]
struct Cli {
    /// Knowledge-base files to load, in order
    files: Vec<PathBuf>,

    /// What the knowledge base reports: quiet, assertions or inference
    #[arg(short, long, default_value = "quiet")]
    verbosity: Verbosity,

    /// Maximum derivations per assertion (unlimited when omitted)
    #[arg(long)]
    derivation_limit: Option<usize>,

    /// Load the files and exit without starting the REPL
    #[arg(long)]
    batch: bool,

    /// Print a JSON snapshot of the knowledge base after loading
    #[arg(long)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fclog=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = KbConfig::default()
        .with_verbosity(cli.verbosity)
        .with_derivation_limit(cli.derivation_limit);
    let mut repl = Repl::with_config(config);

    for file in &cli.files {
        let message = repl.load_file(&file.display().to_string())?;
        println!("{}", message);
    }

    if cli.dump {
        println!("{}", repl.session().kb().snapshot().to_json()?);
    }

    if cli.batch {
        return Ok(());
    }

    println!("fclog - forward-chaining reasoner");
    println!("Type :help for help, :quit to exit.\n");
    repl.run()?;
    Ok(())
}
