use log::debug;

use crate::api::{MAX_PAGE_SIZE, SearchQuery, YouTubeApi};
use crate::mapper::map_item;
use crate::{ChannelId, Result, VideoRecord};

pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Collect up to `max_results` of a channel's videos, newest first
///
/// Pages through `search.list` until enough records are collected or the API
/// stops returning a `nextPageToken`. Upstream order is kept as is.
pub async fn list_channel_videos<A: YouTubeApi>(
    api: &A,
    channel_id: &ChannelId,
    max_results: usize,
) -> Result<Vec<VideoRecord>> {
    let mut videos = Vec::new();
    let mut page_token: Option<String> = None;

    while videos.len() < max_results {
        let remaining = max_results - videos.len();
        let page_size = remaining.min(MAX_PAGE_SIZE as usize) as u32;

        let query = SearchQuery::channel_videos(channel_id, page_size, page_token.take());
        let resp = api.search(&query).await?;
        debug!(
            "Fetched {} items for {channel_id} (page size {page_size}, next page: {})",
            resp.items.len(),
            resp.next_page_token.is_some()
        );

        for item in &resp.items {
            videos.push(map_item(item)?);
        }

        // An empty token means no further pages, same as a missing one
        match resp.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    videos.truncate(max_results);
    Ok(videos)
}
