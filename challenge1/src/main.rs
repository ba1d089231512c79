use clap::Parser;
use tracing::{debug, Level};
use xorcrack::{
    encode::{base64::to_base64, hex::from_hex},
    ToolsResult,
};

/// Converts hex to base64.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        default_value = "49276d206b696c6c696e6720796f757220627261696e206c696b65206120706f69736f6e6f7573206d757368726f6f6d"
    )]
    hex: String,

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
    debug!("decoded {} bytes", bytes.len());

    println!("{}", to_base64(&bytes));
    Ok(())
}
