use std::{fs, path::PathBuf};

use clap::Parser;
use tracing::{info, warn, Level};
use xorcrack::{
    config::AttackConfig,
    encode::ascii::to_ascii,
    ToolsResult,
};

/// Finds the single-byte-xor encrypted line in a file of hex lines.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "4.txt")]
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

    let contents = fs::read_to_string(&cli.file)?;
    let reference = cli.config.reference();

    match cli.config.single_byte(&reference).detect(contents.lines())? {
        Some(found) => {
            info!("line {}, key {:?}\n{}", found.get_tag(), found.get_key() as char, found);
            if let Err(low) = found.plaintext().check() {
                warn!("{}", low);
            }
            println!("{}", to_ascii(found.plaintext().plaintext(), true));
        }
        None => warn!("{} has no lines", cli.file.display()),
    }
    Ok(())
}
