use crate::VideoRecord;

/// Render a channel listing, numbered from 1, with each video's watch URL
pub fn render_video_list(videos: &[VideoRecord]) -> String {
    let mut out = format!("Found {} videos:", videos.len());
    for (idx, video) in videos.iter().enumerate() {
        out.push_str(&format!("\n\n{}. {}\n   URL: {}", idx + 1, video.title, video.url()));
    }
    out
}

/// Render the selection menu shown after a listing
pub fn render_menu() -> &'static str {
    "Options:\n\
     - Enter video number to download a specific video\n\
     - Enter 'all' to download all videos\n\
     - Enter 'b' to go back to channel URL input\n\
     - Enter 'q' to quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_videos() -> Vec<VideoRecord> {
        vec![
            VideoRecord {
                id: "abc".to_string(),
                title: "Newest".to_string(),
                description: String::new(),
                published_at: "2024-02-01T00:00:00Z".to_string(),
            },
            VideoRecord {
                id: "def".to_string(),
                title: "Older".to_string(),
                description: String::new(),
                published_at: "2024-01-01T00:00:00Z".to_string(),
            },
        ]
    }

    #[test]
    fn test_render_video_list() {
        let output = render_video_list(&sample_videos());
        assert_eq!(
            output,
            "Found 2 videos:\n\n\
             1. Newest\n   URL: https://www.youtube.com/watch?v=abc\n\n\
             2. Older\n   URL: https://www.youtube.com/watch?v=def"
        );
    }

    #[test]
    fn test_render_video_list_empty() {
        assert_eq!(render_video_list(&[]), "Found 0 videos:");
    }

    #[test]
    fn test_menu_lists_every_choice() {
        let menu = render_menu();
        for choice in ["'all'", "'b'", "'q'", "number"] {
            assert!(menu.contains(choice));
        }
    }
}
