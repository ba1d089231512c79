use clap::Parser;
use tracing::{debug, Level};
use xorcrack::{
    encode::hex::{from_hex, to_hex},
    encrypt::xor::XOREnc,
    ToolsResult,
};

/// Xors two equal-length hex buffers.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "1c0111001f010100061a024b53535009181c")]
    input: String,

    #[arg(default_value = "686974207468652062756c6c277320657965")]
    mask: String,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ToolsResult<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let bytes1 = from_hex(&cli.input)?;
    let bytes2 = from_hex(&cli.mask)?;

    let mut encrypted = Vec::with_capacity(bytes1.len());
    XOREnc::fixed_encrypt(&bytes1, &bytes2, &mut encrypted)?;
    debug!("xored {} bytes", encrypted.len());

    println!("{}", to_hex(&encrypted));
    Ok(())
}
