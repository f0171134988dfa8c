use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ChannelId, Error, Result};

pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Upstream cap on `maxResults` for a single search page
pub const MAX_PAGE_SIZE: u32 = 50;

/// Response of `search.list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Response of `channels.list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// A search result, video or channel resource as returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub id: Option<ItemId>,
    pub snippet: Option<Snippet>,
}

/// Search results nest the id in an object, resources carry it as a plain string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Plain(String),
    Resource {
        #[serde(rename = "videoId")]
        video_id: Option<String>,
        #[serde(rename = "channelId")]
        channel_id: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub channel_id: Option<String>,
}

impl RawItem {
    /// Channel id of a channel search hit or a `channels.list` item
    pub fn channel_id(&self) -> Option<&str> {
        let from_snippet = self.snippet.as_ref().and_then(|s| s.channel_id.as_deref());
        let from_id = match &self.id {
            Some(ItemId::Plain(id)) => Some(id.as_str()),
            Some(ItemId::Resource { channel_id, .. }) => channel_id.as_deref(),
            None => None,
        };
        from_snippet.or(from_id).filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Video,
    Channel,
}

impl SearchKind {
    fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Video => "video",
            SearchKind::Channel => "channel",
        }
    }
}

/// Parameters of one `search.list` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub channel_id: Option<String>,
    pub kind: SearchKind,
    pub newest_first: bool,
    pub max_results: u32,
    pub page_token: Option<String>,
}

impl SearchQuery {
    /// Channel search returning only the best match
    pub fn channels(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            channel_id: None,
            kind: SearchKind::Channel,
            newest_first: false,
            max_results: 1,
            page_token: None,
        }
    }

    /// One page of a channel's videos, newest first
    pub fn channel_videos(channel_id: &ChannelId, max_results: u32, page_token: Option<String>) -> Self {
        Self {
            q: None,
            channel_id: Some(channel_id.as_str().to_string()),
            kind: SearchKind::Video,
            newest_first: true,
            max_results: max_results.min(MAX_PAGE_SIZE),
            page_token,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("part", "snippet".to_string())];
        if let Some(ref q) = self.q {
            params.push(("q", q.clone()));
        }
        if let Some(ref channel_id) = self.channel_id {
            params.push(("channelId", channel_id.clone()));
        }
        params.push(("type", self.kind.as_str().to_string()));
        if self.newest_first {
            params.push(("order", "date".to_string()));
        }
        params.push(("maxResults", self.max_results.to_string()));
        if let Some(ref token) = self.page_token {
            params.push(("pageToken", token.clone()));
        }
        params
    }
}

/// Query of the legacy `channels.list?forUsername=` lookup
fn username_params(username: &str) -> Vec<(&'static str, String)> {
    vec![("part", "id".to_string()), ("forUsername", username.to_string())]
}

/// The two Data API endpoints the resolver and lister depend on
#[allow(async_fn_in_trait)]
pub trait YouTubeApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchListResponse>;

    /// Legacy `channels.list?forUsername=` lookup
    async fn channels_for_username(&self, username: &str) -> Result<ChannelListResponse>;
}

/// YouTube Data API v3 client authenticated with an API key
pub struct DataApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl DataApiClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<T> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url} {params:?}");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_api_error(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse(format!("{endpoint}: {e}")))
    }
}

impl YouTubeApi for DataApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchListResponse> {
        self.get("search", &query.params()).await
    }

    async fn channels_for_username(&self, username: &str) -> Result<ChannelListResponse> {
        self.get("channels", &username_params(username)).await
    }
}

/// Build an [`Error::Api`] from a Google error body, keeping the first `reason`
fn parse_api_error(status: u16, body: &str) -> Error {
    let json: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let error = json.get("error");

    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| body.trim().to_string());

    let reason = error
        .and_then(|e| e.get("errors"))
        .and_then(|errs| errs.get(0))
        .and_then(|e| e.get("reason"))
        .and_then(|r| r.as_str())
        .map(|r| r.to_string());

    Error::Api { status, reason, message }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = serde_json::json!({
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CDIQAA",
            "items": [
                {
                    "kind": "youtube#searchResult",
                    "id": { "kind": "youtube#video", "videoId": "abc" },
                    "snippet": {
                        "publishedAt": "2024-05-01T12:00:00Z",
                        "channelId": "UC123",
                        "title": "First",
                        "description": "desc"
                    }
                }
            ]
        });

        let resp: SearchListResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(resp.items.len(), 1);
        let snippet = resp.items[0].snippet.as_ref().unwrap();
        assert_eq!(snippet.title.as_deref(), Some("First"));
        assert_eq!(snippet.published_at.as_deref(), Some("2024-05-01T12:00:00Z"));
        assert_eq!(
            resp.items[0].id,
            Some(ItemId::Resource {
                video_id: Some("abc".to_string()),
                channel_id: None
            })
        );
    }

    #[test]
    fn test_deserialize_empty_search_response() {
        let resp: SearchListResponse = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
        assert!(resp.items.is_empty());
        assert!(resp.next_page_token.is_none());
    }

    #[test]
    fn test_channel_id_from_channels_list() {
        let json = serde_json::json!({ "items": [ { "kind": "youtube#channel", "id": "UCabc" } ] });
        let resp: ChannelListResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.items[0].channel_id(), Some("UCabc"));
    }

    #[test]
    fn test_channel_id_from_search_hit() {
        let json = serde_json::json!({
            "id": { "kind": "youtube#channel", "channelId": "UCfromid" },
            "snippet": { "channelId": "UCfromsnippet", "title": "Chan" }
        });
        let item: RawItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.channel_id(), Some("UCfromsnippet"));
    }

    #[test]
    fn test_channel_search_params() {
        let params = SearchQuery::channels("@handle").params();
        assert_eq!(
            params,
            vec![
                ("part", "snippet".to_string()),
                ("q", "@handle".to_string()),
                ("type", "channel".to_string()),
                ("maxResults", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_username_params() {
        assert_eq!(
            username_params("GoogleDevelopers"),
            vec![
                ("part", "id".to_string()),
                ("forUsername", "GoogleDevelopers".to_string()),
            ]
        );
    }

    #[test]
    fn test_channel_videos_params() {
        let id = ChannelId::new("UC123");
        let params = SearchQuery::channel_videos(&id, 80, Some("TOKEN".to_string())).params();
        assert_eq!(
            params,
            vec![
                ("part", "snippet".to_string()),
                ("channelId", "UC123".to_string()),
                ("type", "video".to_string()),
                ("order", "date".to_string()),
                ("maxResults", "50".to_string()),
                ("pageToken", "TOKEN".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_api_error_quota() {
        let body = r#"{
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [ { "domain": "youtube.quota", "reason": "quotaExceeded" } ]
            }
        }"#;
        let err = parse_api_error(403, body);
        assert!(err.is_quota_exceeded());
        assert_eq!(
            err.to_string(),
            "YouTube API returned 403: The request cannot be completed because you have exceeded your quota."
        );
    }

    #[test]
    fn test_parse_api_error_non_json_body() {
        match parse_api_error(502, "Bad Gateway\n") {
            Error::Api { status, reason, message } => {
                assert_eq!(status, 502);
                assert!(reason.is_none());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let client = DataApiClient::new(reqwest::Client::new(), "key").with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
