use crate::api::{ItemId, RawItem};
use crate::{Error, Result, VideoRecord};

/// Map a search result or video resource into a [`VideoRecord`]
///
/// `id` and `snippet.title` are required; a response missing either is
/// reported as malformed instead of being skipped.
pub fn map_item(item: &RawItem) -> Result<VideoRecord> {
    let id = match &item.id {
        Some(ItemId::Plain(id)) => Some(id.clone()),
        Some(ItemId::Resource { video_id, .. }) => video_id.clone(),
        None => None,
    }
    .filter(|id| !id.is_empty())
    .ok_or_else(|| Error::MalformedResponse("item has no video id".to_string()))?;

    let snippet = item
        .snippet
        .as_ref()
        .ok_or_else(|| Error::MalformedResponse(format!("video {id} has no snippet")))?;

    let title = snippet
        .title
        .clone()
        .ok_or_else(|| Error::MalformedResponse(format!("video {id} has no title")))?;

    Ok(VideoRecord {
        id,
        title,
        description: snippet.description.clone().unwrap_or_default(),
        published_at: snippet.published_at.clone().unwrap_or_default(),
    })
}
