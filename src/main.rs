use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

use eyre::Result;
use log::{debug, info, warn};

use ytchan::api::DataApiClient;
use ytchan::config::{Config, Overrides};
use ytchan::download::{self, DownloadOptions};
use ytchan::selection::Selection;
use ytchan::{VideoRecord, output, transcript};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytchan.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytchan")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn build_after_help() -> String {
    let yt_dlp_line = match tool_version("yt-dlp") {
        Some(v) => format!("  \x1b[32m✅\x1b[0m yt-dlp     {v}"),
        None => "  \x1b[31m❌\x1b[0m yt-dlp     (not found, needed for downloads)".to_string(),
    };

    let log_path = log_dir().join("ytchan.log");

    format!(
        "\nREQUIRED TOOLS:\n{yt_dlp_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

/// Print `message` and read one trimmed line; `None` on end of input
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

enum Flow {
    NextChannel,
    Quit,
}

struct App {
    config: Config,
    client: reqwest::Client,
    api: DataApiClient,
    download_opts: DownloadOptions,
    transcripts: bool,
}

impl App {
    async fn run_channel(&self, channel_url: &str) -> Result<Flow> {
        println!("\nFetching channel information...");
        let channel_id = match ytchan::resolve_channel_id(&self.api, channel_url).await {
            Ok(id) => id,
            Err(e) if e.is_not_found() => {
                println!("Error: Could not find channel ID. Please check the URL and try again.");
                return Ok(Flow::NextChannel);
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Resolved {channel_url} to {channel_id}");

        println!("Fetching videos from channel...");
        let videos = ytchan::list_channel_videos(&self.api, &channel_id, self.config.max_results).await?;
        if videos.is_empty() {
            println!("No videos found for this channel.");
            return Ok(Flow::NextChannel);
        }

        println!("\n{}", output::render_video_list(&videos));

        loop {
            println!("\n{}", output::render_menu());
            let Some(choice) = prompt("\nYour choice: ")? else {
                return Ok(Flow::Quit);
            };

            match Selection::parse(&choice, videos.len()) {
                Selection::Quit => return Ok(Flow::Quit),
                Selection::Back => return Ok(Flow::NextChannel),
                Selection::All => {
                    self.process_all(&videos).await;
                    return Ok(Flow::NextChannel);
                }
                Selection::Index(idx) => {
                    self.process_one(&videos[idx]).await;
                    return Ok(Flow::NextChannel);
                }
                Selection::Invalid(message) => println!("{message}"),
            }
        }
    }

    async fn process_one(&self, video: &VideoRecord) {
        println!("\nPreparing to download: {}", video.title);
        match download::download_video(&video.url(), &self.download_opts) {
            Ok(()) => {
                println!(
                    "\nVideo downloaded successfully to: {}",
                    self.download_opts.output_dir.display()
                );
            }
            Err(e) => {
                eprintln!("\nFailed to download the video: {e}");
                return;
            }
        }

        if !self.transcripts {
            return;
        }
        println!("\nGetting video transcription...");
        match transcript::save_transcript(&self.client, video, &self.config.lang, &self.config.transcript_dir).await {
            Ok(path) => println!("Transcription saved to: {}", path.display()),
            Err(e) => eprintln!("Transcription failed for {}: {e}", video.title),
        }
    }

    async fn process_all(&self, videos: &[VideoRecord]) {
        println!("\nPreparing to download all {} videos...", videos.len());
        let urls: Vec<String> = videos.iter().map(|v| v.url()).collect();
        let downloaded = download::download_videos(&urls, &self.download_opts);
        let ok = downloaded.iter().filter(|d| **d).count();
        println!("\nDownloaded {ok}/{} videos", videos.len());

        if !self.transcripts {
            return;
        }
        println!("\nGetting transcriptions for downloaded videos...");
        let saved = transcript::save_transcripts(&self.client, videos, &self.config.lang, &self.config.transcript_dir).await;
        let ok = saved.iter().filter(|s| **s).count();
        println!("\nSaved {ok}/{} transcriptions", videos.len());
    }
}

fn display_welcome_message() {
    println!("\n=== YouTube Channel Downloader ===");
    println!("This program allows you to:");
    println!("1. List the videos of a YouTube channel");
    println!("2. Download specific videos or all videos");
    println!("3. Save video transcriptions");
    println!("==================================\n");
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let mut cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    let overrides = Overrides {
        base_dir: cli.base_dir.clone(),
        max_results: cli.max_results,
        lang: cli.lang.clone(),
    };
    let config = Config::load(&overrides)?;
    config.ensure_dirs()?;

    if cli.verbose {
        let config_path = ytchan::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!(
            "API key: {}\nDownloads: {}\nTranscripts: {}\nMax results: {}",
            config.masked_api_key(),
            config.download_dir.display(),
            config.transcript_dir.display(),
            config.max_results,
        );
    }

    let client = reqwest::Client::new();
    let app = App {
        api: DataApiClient::new(client.clone(), config.api_key.clone()),
        download_opts: DownloadOptions::new(config.download_dir.clone(), config.video_format.clone()),
        transcripts: !cli.no_transcripts,
        client,
        config,
    };

    display_welcome_message();

    let mut first_url = cli.url.take();
    loop {
        let channel_url = match first_url.take() {
            Some(url) => url,
            None => match prompt("\nEnter YouTube channel URL (or 'q' to quit): ")? {
                Some(url) => url,
                None => break,
            },
        };

        if channel_url.eq_ignore_ascii_case("q") {
            break;
        }
        if channel_url.is_empty() {
            continue;
        }

        match app.run_channel(&channel_url).await {
            Ok(Flow::NextChannel) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                warn!("Channel {channel_url} failed: {e}");
                eprintln!("\nAn error occurred: {e}");
            }
        }
    }

    println!("\nThank you for using YouTube Channel Downloader!");
    Ok(())
}
