/// Small helpers shared by the config layer and the report renderer

/// URL utilities for feed endpoints
pub mod url {
    use url::Url;

    /// Extract host from URL
    pub fn extract_host(url_str: &str) -> Option<String> {
        Url::parse(url_str)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.to_string()))
    }

    /// Validate feed URL format
    pub fn is_valid_feed_url(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => (url.scheme() == "http" || url.scheme() == "https") && url.host_str().is_some(),
            Err(_) => false,
        }
    }
}

pub mod time {
    use chrono::Duration;

    /// Format duration in human-readable form
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.num_seconds();

        if total_seconds < 60 {
            format!("{}s", total_seconds)
        } else if total_seconds < 3600 {
            format!("{}m", total_seconds / 60)
        } else if total_seconds < 86400 {
            format!("{}h", total_seconds / 3600)
        } else {
            format!("{}d", total_seconds / 86400)
        }
    }
}

pub mod text {
    /// Truncate to at most `max_chars` characters, marking the cut with "..."
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        if max_chars <= 3 {
            return text.chars().take(max_chars).collect();
        }

        let truncated: String = text.chars().take(max_chars - 3).collect();
        match truncated.rfind(' ') {
            Some(last_space) if last_space > truncated.len() / 2 => {
                format!("{}...", &truncated[..last_space])
            }
            _ => format!("{}...", truncated),
        }
    }

    /// Collapse runs of whitespace (including newlines) into single spaces
    pub fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
