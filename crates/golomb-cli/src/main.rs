use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "golomb")]
#[command(about = "Compress or expand binary integer data with Exponential-Golomb coding")]
#[command(long_about = "\
Compress or expand binary integer data with Exponential-Golomb coding.

Small values take fewer bits than large ones, the data is processed in a \
single pass, and nothing is buffered beyond one output byte, which suits \
memory-tight and low-latency use. The encoded stream is raw code units with \
no header: decode with the same format, order and adaptive settings that \
encoded it, or the result is garbage.

Multi-byte elements use the machine's native byte order; stick to i8/u8 for \
cross-platform interchange.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode raw integer elements into a Golomb bitstream
    Encode(cmd::encode::EncodeArgs),

    /// Decode a Golomb bitstream back into integer elements
    Decode(cmd::decode::DecodeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Encode(args) => cmd::encode::run(args),
        Commands::Decode(args) => cmd::decode::run(args),
    }
}
