use anyhow::{bail, Context, Result};
use clap::Parser;
use firstframe::{MimeTable, Thumbnailer, ThumbnailOptions};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video to take the first frame from
    #[arg(default_value = "example.mp4")]
    video: PathBuf,

    /// JPEG file to write (overwritten if it exists)
    #[arg(short, long, default_value = "thumbnail.jpg")]
    output: PathBuf,

    /// Seconds to wait for the first frame
    #[arg(long, default_value = "10")]
    timeout: f64,

    /// JPEG quality between 0 and 1
    #[arg(long, default_value = "0.95")]
    quality: f32,

    /// Chrome/Chromium executable (auto-detected if not set)
    #[arg(long, env = "FIRSTFRAME_CHROME")]
    chrome: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,

    /// Extra extension to MIME type mapping, e.g. `mkv=video/x-matroska`
    #[arg(long = "mime", value_name = "EXT=TYPE")]
    mime: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_options(args: &Args) -> Result<ThumbnailOptions> {
    let timeout = match Duration::try_from_secs_f64(args.timeout) {
        Ok(timeout) if !timeout.is_zero() => timeout,
        _ => bail!("--timeout must be a positive number of seconds, got {}", args.timeout),
    };

    let mut mime_table = MimeTable::default();
    for entry in &args.mime {
        let Some((ext, mime)) = MimeTable::parse_entry(entry) else {
            bail!("Invalid --mime entry {:?}, expected EXT=TYPE", entry);
        };
        mime_table.insert(&ext, mime);
    }

    let mut options = ThumbnailOptions::default()
        .with_timeout(timeout)
        .with_jpeg_quality(args.quality)
        .with_mime_table(mime_table)
        .with_headless(!args.headful);
    if let Some(chrome) = &args.chrome {
        options = options.with_browser_executable(chrome);
    }
    options.validate()?;
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    info!("firstframe v{}", env!("CARGO_PKG_VERSION"));

    let options = build_options(&args)?;
    let thumbnail = Thumbnailer::new(options)
        .generate(&args.video, &args.output)
        .await
        .with_context(|| format!("Failed to generate thumbnail for {}", args.video.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&thumbnail)?);
    }
    Ok(())
}
