use clap::Parser;
use tracing::{info, Level};
use xorcrack::{
    encode::hex::to_hex,
    encrypt::xor::{random_key, XOREnc},
    ToolsResult,
};

/// Encrypts text with repeating-key-xor and prints it as hex.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(default_value = "Burning 'em, if you ain't quick and nimble\nI go crazy when I hear a cymbal")]
    text: String,

    /// Key to encrypt with, a random key of --random-length bytes if omitted
    #[arg(short, long)]
    key: Option<String>,

    #[arg(long, default_value_t = 3)]
    random_length: usize,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ToolsResult<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let key = match cli.key {
        Some(key) => key.into_bytes(),
        None => {
            let key = random_key(cli.random_length);
            info!("random key {}", to_hex(&key));
            key
        }
    };

    let encrypted = XOREnc::repeating(cli.text.as_bytes(), &key)?;
    println!("{}", to_hex(&encrypted));
    Ok(())
}
