
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use swf_adpcm::{Channels, DecodeSummary, DecoderOptions, Error, PacketFramer, PcmWriter};

/// Decodes SWF ADPCM sound data to raw 16-bit signed little-endian PCM.
#[derive(Parser, Debug)]
#[command(name = "swf-adpcm-decode")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file containing one SWF ADPCM sound data record
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for raw s16le samples, or `-` for stdout
    #[arg(short, long)]
    output: String,

    /// Treat the input as stereo (not supported)
    #[arg(short, long)]
    stereo: bool,
}

fn open_output(path: &str) -> io::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(File::create(path)?))
    }
}

/// Returns the decode error if there is one, otherwise the flush error.
fn finish(result: Result<DecodeSummary, Error>, flushed: Result<(), Error>)
    -> Result<DecodeSummary, Error> {
    let summary = result?;
    flushed?;
    Ok(summary)
}

/// Prefixes I/O errors with the path they happened on.
fn describe(err: &Error, path: &str) -> String {
    match err {
        Error::Io(_) => format!("{}: {}", path, err),
        _ => err.to_string(),
    }
}

fn run(args: &Args) -> Result<DecodeSummary, String> {
    let options = DecoderOptions {
        channels: if args.stereo { Channels::Stereo } else { Channels::Mono },
    };
    let input = args.input.display().to_string();
    let data = std::fs::read(&args.input).map_err(|err| format!("{}: {}", input, err))?;
    info!("read {} bytes from {}", data.len(), input);

    // unsupported input is rejected before the output is created
    let mut framer = PacketFramer::new(&data, &options).map_err(|err| describe(&err, &input))?;

    let out = open_output(&args.output).map_err(|err| format!("{}: {}", args.output, err))?;
    let mut writer = PcmWriter::new(BufWriter::new(out));
    let result = framer.decode_into(&mut writer);
    // samples decoded before an error are still written out
    let flushed = writer.flush();
    finish(result, flushed).map_err(|err| describe(&err, &args.output))
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(summary) => {
            let bits = summary.code_size.map_or(0, |code_size| code_size.bits());
            info!("decoded {} samples in {} blocks ({} bits per code)",
                summary.samples, summary.blocks, bits);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
