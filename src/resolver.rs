use log::{debug, info, warn};

use crate::api::{SearchQuery, YouTubeApi};
use crate::url::normalize_channel_url;
use crate::{ChannelId, Error, Result};

/// Path markers of channel URLs that carry a name instead of an id
const NAMED_MARKERS: [&str; 3] = ["/c/", "/user/", "/@"];

/// Network lookups tried in order for named channel URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Handle,
    Username,
    Search,
}

const LOOKUP_ORDER: [Lookup; 3] = [Lookup::Handle, Lookup::Username, Lookup::Search];

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Handle => write!(f, "handle search"),
            Lookup::Username => write!(f, "username lookup"),
            Lookup::Search => write!(f, "general search"),
        }
    }
}

/// Resolve a channel URL into its stable channel id
///
/// `/channel/<id>` URLs are answered without touching the network. `/c/`,
/// `/user/` and `/@` URLs fall through handle search, legacy username lookup
/// and a general channel search, first hit wins. Lookup failures only move on
/// to the next strategy.
pub async fn resolve_channel_id<A: YouTubeApi>(api: &A, url: &str) -> Result<ChannelId> {
    let url = normalize_channel_url(url);
    debug!("Normalized channel URL: {url}");

    if let Some(id) = channel_id_from_path(&url) {
        info!("Channel ID from /channel/ URL: {id}");
        return Ok(ChannelId::new(id));
    }

    let Some(name) = channel_name_from_path(&url) else {
        return Err(Error::ChannelNotFound(url));
    };
    debug!("Extracted channel name: {name}");

    for lookup in LOOKUP_ORDER {
        if let Some(id) = attempt(api, lookup, name).await {
            info!("Channel ID via {lookup}: {id}");
            return Ok(ChannelId::new(id));
        }
    }

    Err(Error::ChannelNotFound(url))
}

async fn attempt<A: YouTubeApi>(api: &A, lookup: Lookup, name: &str) -> Option<String> {
    let result = match lookup {
        Lookup::Handle => api
            .search(&SearchQuery::channels(format!("@{name}")))
            .await
            .map(|resp| resp.items),
        Lookup::Username => api.channels_for_username(name).await.map(|resp| resp.items),
        Lookup::Search => api.search(&SearchQuery::channels(name)).await.map(|resp| resp.items),
    };

    match result {
        Ok(items) => {
            let id = items.first().and_then(|item| item.channel_id()).map(|id| id.to_string());
            if id.is_none() {
                debug!("{lookup} for {name} returned no channel");
            }
            id
        }
        Err(e) => {
            warn!("{lookup} for {name} failed: {e}");
            None
        }
    }
}

fn path_end(s: &str) -> usize {
    s.find(['/', '?', '#']).unwrap_or(s.len())
}

/// Segment right after `/channel/`, if any
fn channel_id_from_path(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/channel/")?;
    let id = &rest[..path_end(rest)];
    (!id.is_empty()).then_some(id)
}

/// Handle (without `@`) or last path segment of a `/c/`, `/user/` or `/@` URL
fn channel_name_from_path(url: &str) -> Option<&str> {
    if !NAMED_MARKERS.iter().any(|m| url.contains(m)) {
        return None;
    }

    if let Some((_, rest)) = url.split_once("/@") {
        let handle = &rest[..path_end(rest)];
        return (!handle.is_empty()).then_some(handle);
    }

    // Only what follows the marker can be a name, so a bare `/c/` has none
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (_, rest) = path.split_once("/c/").or_else(|| path.split_once("/user/"))?;
    rest.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}
