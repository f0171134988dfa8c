use std::path::PathBuf;
use std::process::{Command, Stdio};

use eyre::{Result, bail};
use log::{debug, info};

/// How yt-dlp should fetch and name videos
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,
    pub format: String,
}

impl DownloadOptions {
    pub fn new(output_dir: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: format.into(),
        }
    }

    fn output_template(&self) -> String {
        self.output_dir.join("%(title)s.%(ext)s").to_string_lossy().to_string()
    }

    fn args<'a>(&'a self, template: &'a str, url: &'a str) -> Vec<&'a str> {
        vec!["--format", self.format.as_str(), "--no-playlist", "-o", template, url]
    }
}

/// Download one video with yt-dlp, progress goes straight to the terminal
pub fn download_video(url: &str, opts: &DownloadOptions) -> Result<()> {
    let template = opts.output_template();
    debug!("Downloading via yt-dlp: {url} -> {template}");

    let status = Command::new("yt-dlp")
        .args(opts.args(&template, url))
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(s) if s.success() => {
            info!("Downloaded {url} into {}", opts.output_dir.display());
            Ok(())
        }
        Ok(s) => bail!("yt-dlp exited with status {s}"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            bail!(
                "yt-dlp not found. Install it to enable downloads:\n  \
                 pip install yt-dlp\n  \
                 or: brew install yt-dlp"
            );
        }
        Err(e) => bail!("failed to run yt-dlp: {e}"),
    }
}

/// Download videos one after another; one success flag per URL
pub fn download_videos(urls: &[String], opts: &DownloadOptions) -> Vec<bool> {
    let total = urls.len();
    urls.iter()
        .enumerate()
        .map(|(idx, url)| {
            println!("\nDownloading video {}/{total}", idx + 1);
            match download_video(url, opts) {
                Ok(()) => {
                    println!("Successfully downloaded video {}/{total}", idx + 1);
                    true
                }
                Err(e) => {
                    eprintln!("Failed to download video {}/{total}: {e}", idx + 1);
                    false
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_template() {
        let opts = DownloadOptions::new("/data/downloads", "best[height<=720]");
        assert_eq!(opts.output_template(), "/data/downloads/%(title)s.%(ext)s");
    }

    #[test]
    fn test_args() {
        let opts = DownloadOptions::new("/d", "best[height<=720]");
        let template = opts.output_template();
        let url = "https://www.youtube.com/watch?v=abc";
        assert_eq!(
            opts.args(&template, url),
            vec![
                "--format",
                "best[height<=720]",
                "--no-playlist",
                "-o",
                "/d/%(title)s.%(ext)s",
                "https://www.youtube.com/watch?v=abc",
            ]
        );
    }

    #[test]
    fn test_download_videos_empty() {
        let opts = DownloadOptions::new("/d", "best");
        assert!(download_videos(&[], &opts).is_empty());
    }
}
