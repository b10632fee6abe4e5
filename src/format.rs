use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `1d 2h 3m 4s`; the day part is omitted under a day.
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = total_secs % 86_400 / 3_600;
    let minutes = total_secs % 3_600 / 60;
    let seconds = total_secs % 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else {
        format!("{hours}h {minutes}m {seconds}s")
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_under_a_day() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(3_661), "1h 1m 1s");
    }

    #[test]
    fn uptime_with_days() {
        assert_eq!(format_uptime(93_784), "1d 2h 3m 4s");
        assert_eq!(format_uptime(86_400 * 10), "10d 0h 0m 0s");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_unicode("svchost.exe", 20), "svchost.exe");
        assert_eq!(truncate_unicode("svchost.exe", 5), "svch\u{2026}");
        assert_eq!(truncate_unicode("日本語ツール", 5), "日本\u{2026}");
    }

    #[test]
    fn megabytes() {
        assert_eq!(bytes_to_mb(3 * 1024 * 1024), 3.0);
        assert_eq!(bytes_to_mb(0), 0.0);
    }
}
