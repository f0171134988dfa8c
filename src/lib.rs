pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod lister;
pub mod mapper;
pub mod output;
pub mod resolver;
pub mod selection;
pub mod transcript;
pub mod url;

pub use error::{Error, Result};
pub use lister::list_channel_videos;
pub use resolver::resolve_channel_id;
pub use url::normalize_channel_url;

/// Stable identifier of a channel (`UC...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single video as listed for a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: String,
}

impl VideoRecord {
    /// Canonical watch URL handed to the downloader and transcript fetcher
    pub fn url(&self) -> String {
        watch_url(&self.id)
    }
}

/// A single captioned segment
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub start: f64,
}

/// Complete transcript for a video
#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub language: String,
    pub segments: Vec<Segment>,
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_video_record_url() {
        let record = VideoRecord {
            id: "abc".to_string(),
            title: "T".to_string(),
            description: String::new(),
            published_at: String::new(),
        };
        assert_eq!(record.url(), "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_channel_id_display() {
        let id = ChannelId::new("UC123");
        assert_eq!(id.to_string(), "UC123");
        assert_eq!(id.as_str(), "UC123");
    }
}
