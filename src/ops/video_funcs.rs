/// Extracts a video id from a watch URL, a short URL, or a bare id.
///
/// Returns `None` for blank input or a URL that carries no id.
pub fn parse_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let id = if input.contains("youtube.com/watch") {
        let (_, query) = input.split_once('?')?;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .unwrap_or("")
    } else if let Some((_, rest)) = input.split_once("youtu.be/") {
        rest.split(['?', '&', '#', '/']).next().unwrap_or("")
    } else {
        input
    };

    let id = id.split('#').next().unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Formats seconds as `m:ss`, dropping the fractional part.
pub fn format_time(seconds: f64) -> String {
    let whole = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch_url() {
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?v=ioNng23DkIM"),
            Some("ioNng23DkIM".to_string())
        );
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?list=PL1&v=gdZLi9oWNZg&t=30"),
            Some("gdZLi9oWNZg".to_string())
        );
        assert_eq!(parse_video_id("https://www.youtube.com/watch?list=PL1"), None);
    }

    #[test]
    fn test_parse_short_url() {
        assert_eq!(
            parse_video_id("https://youtu.be/kOHB85vDuow"),
            Some("kOHB85vDuow".to_string())
        );
        assert_eq!(
            parse_video_id("youtu.be/kOHB85vDuow?t=12"),
            Some("kOHB85vDuow".to_string())
        );
    }

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(parse_video_id("  7tNtU5XFwrU "), Some("7tNtU5XFwrU".to_string()));
        assert_eq!(parse_video_id("   "), None);
        assert_eq!(parse_video_id(""), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(181.0), "3:01");
        assert_eq!(format_time(-3.0), "0:00");
    }
}
