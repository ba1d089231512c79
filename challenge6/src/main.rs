use std::{fs, path::PathBuf};

use clap::Parser;
use tracing::{info, warn, Level};
use xorcrack::{
    config::AttackConfig,
    encode::{ascii::to_ascii, base64::from_base64},
    ToolsResult,
};

/// Breaks a base64 encoded repeating-key-xor ciphertext of unknown keylength.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "6.txt")]
    file: PathBuf,

    #[command(flatten)]
    config: AttackConfig,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ToolsResult<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let bytes = from_base64(&fs::read_to_string(&cli.file)?)?;
    info!("decoded {} bytes", bytes.len());

    let reference = cli.config.reference();
    let attempt = cli.config.repeating_key(&reference)?.attack(&bytes)?;
    if let Err(unreliable) = attempt.check() {
        warn!("{}", unreliable);
    }

    info!("key : {}", to_ascii(attempt.shortest_key(), true));
    println!("{}", attempt.text());
    Ok(())
}
