/// Errors raised while resolving channels and listing their videos
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find a channel ID for {0}")]
    ChannelNotFound(String),

    #[error("YouTube API returned {status}: {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ChannelNotFound(_))
    }

    /// True when the API rejected the call because the daily quota is spent
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(
            self,
            Error::Api { reason: Some(reason), .. } if reason == "quotaExceeded" || reason == "dailyLimitExceeded"
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
