use clap::Parser;
use tracing::{info, warn, Level};
use xorcrack::{
    config::AttackConfig,
    encode::{ascii::to_ascii, hex::from_hex},
    ToolsResult,
};

/// Breaks a hex encoded single-byte-xor ciphertext.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "1b37373331363f78151b7f2b783431333d78397828372d363c78373e783a393b3736")]
    hex: String,

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

    let bytes = from_hex(&cli.hex)?;
    let reference = cli.config.reference();
    let result = cli.config.single_byte(&reference).attack(&bytes)?;

    info!("key {:?} ({:?})\n{}", result.get_key() as char, cli.config.strategy, result);
    if let Err(low) = result.check() {
        warn!("{}", low);
    }

    println!("{}", to_ascii(result.plaintext(), true));
    Ok(())
}
