use anyhow::{Context, Result};
use clap::Parser;
use mrse::{DecoderConfig, MorseDecoder, SampleSource, WavSource};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input WAV file
    #[arg(value_name = "WAV_FILE")]
    wav_file: PathBuf,

    /// Block RMS (0-1 of full scale) above which a block counts as tone
    #[arg(long, default_value_t = mrse::config::RMS_THRESHOLD)]
    rms_threshold: f64,

    /// Tone runs longer than this many blocks are dashes
    #[arg(long, default_value_t = mrse::config::DASH_MIN_BLOCKS)]
    dash_blocks: usize,

    /// Detector block length in milliseconds
    #[arg(long, default_value_t = 10)]
    block_ms: u64,
}

impl Cli {
    fn config(&self) -> DecoderConfig {
        DecoderConfig {
            rms_threshold: self.rms_threshold,
            block_duration: Duration::from_millis(self.block_ms),
            dash_min_blocks: self.dash_blocks,
        }
    }
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=info` or `RUST_LOG=debug` to see output.
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Opening WAV file: {:?}", cli.wav_file);
    let mut source = WavSource::open(&cli.wav_file)
        .with_context(|| format!("failed to open {}", cli.wav_file.display()))?;
    log::info!("WAV spec: {:?}", source.spec());

    let mut decoder =
        MorseDecoder::new(source.sample_rate(), source.bits_per_sample(), &cli.config())?;
    log::info!("Block size: {} samples", decoder.block_size());

    decoder.process_source(&mut source)?;
    let transcript = decoder
        .finalize()
        .context("could not work out the timing of this recording")?;

    let mut stdout = std::io::stdout().lock();
    for word in transcript.words() {
        write!(stdout, "{} ", word?)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;

    Ok(())
}
