//! Best-effort parsing of human-formatted engagement counts out of rendered
//! page text. Counts render as `"1,234 likes"`, `"12.5K likes"` or
//! `"3 comments"` depending on magnitude and locale experiments; anything
//! unparseable is treated as not visible.

use regex::Regex;

/// Extract the count rendered next to `metric` (`"like"` / `"comment"`).
pub(crate) fn parse_metric(text: &str, metric: &str) -> Option<u64> {
    let pattern = format!(r"(?i)(\d[\d.,]*)\s*([km])?\s*{metric}s?\b");
    let re = Regex::new(&pattern).expect("valid metric regex");
    let caps = re.captures(text)?;

    let digits = caps.get(1)?.as_str().replace(',', "");
    let multiplier: f64 = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(s) if s == "k" => 1_000.0,
        Some(s) if s == "m" => 1_000_000.0,
        _ => 1.0,
    };

    if (multiplier - 1.0).abs() < f64::EPSILON {
        if let Ok(n) = digits.parse::<u64>() {
            return Some(n);
        }
    }

    let value = digits.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((value * multiplier).round() as u64)
}

/// Shortcode segment following `/p/` or `/reel/` in a post URL.
pub(crate) fn post_id_from_url(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    let idx = segments
        .iter()
        .position(|s| *s == "p" || *s == "reel" || *s == "tv")?;
    segments.get(idx + 1).map(|s| (*s).to_string())
}
