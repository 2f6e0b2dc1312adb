//! 사용자에게 보내는 문구

pub const INVALID_LINK: &str = "Please provide a valid YouTube link.";
pub const SELECT_FORMAT: &str = "Select format:";
pub const LINK_EXPIRED: &str = "Link expired. Please send it again.";
pub const PROCESSING: &str = "Processing request... Please wait. ⏳";
pub const DONE: &str = "Done! ✅";

pub fn uploading(size_bytes: u64) -> String {
    format!("Uploading... 🚀 ({})", format_size(size_bytes))
}

pub fn format_size(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// 앞에서부터 최대 `max_chars`글자. 문자 경계에서 자른다.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
        assert_eq!(format_size(1536 * 1024), "1.5 MB");
        assert_eq!(format_size(0), "0.0 MB");
        assert_eq!(uploading(10 * 1024 * 1024), "Uploading... 🚀 (10.0 MB)");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("한국어 제목", 3), "한국어");
        assert_eq!(truncate_chars("", 3), "");
    }
}
