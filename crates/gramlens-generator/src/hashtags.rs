//! Hashtag assembly for generated drafts.

/// Niche tags present on every draft.
const BASE_HASHTAGS: [&str; 3] = ["#EDM", "#ElectronicMusic", "#DanceMusic"];

/// Total tag cap when the brand's hashtag strategy is active / not.
const ACTIVE_CAP: usize = 8;
const MINIMAL_CAP: usize = 5;

/// Base tags plus theme-derived tags, extended with format-derived tags only
/// for brands with an active hashtag strategy. Case-insensitively
/// deduplicated; capped at [`ACTIVE_CAP`] / [`MINIMAL_CAP`].
pub(crate) fn build_hashtags(theme: &str, format: &str, strategy_active: bool) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for tag in BASE_HASHTAGS {
        push_unique(&mut tags, tag.to_string());
    }

    push_unique(&mut tags, format!("#{}", capitalize_first(theme)));
    push_unique(&mut tags, format!("#{theme}vibes"));

    if strategy_active {
        let format_tags: [&str; 3] = if format == "reel" {
            ["#Reels", "#InstaReels", "#ReelsDaily"]
        } else {
            ["#Carousel", "#InstaPost", "#SwipeThrough"]
        };
        for tag in format_tags {
            push_unique(&mut tags, tag.to_string());
        }
        tags.truncate(ACTIVE_CAP);
    } else {
        tags.truncate(MINIMAL_CAP);
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
        tags.push(tag);
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_strategy_yields_exactly_eight_tags() {
        let tags = build_hashtags("vibe", "reel", true);
        assert_eq!(tags.len(), 8);
        assert_eq!(
            tags,
            vec![
                "#EDM",
                "#ElectronicMusic",
                "#DanceMusic",
                "#Vibe",
                "#vibevibes",
                "#Reels",
                "#InstaReels",
                "#ReelsDaily",
            ]
        );
    }

    #[test]
    fn minimal_strategy_yields_exactly_five_tags() {
        let tags = build_hashtags("vibe", "reel", false);
        assert_eq!(tags.len(), 5);
        assert_eq!(
            tags,
            vec!["#EDM", "#ElectronicMusic", "#DanceMusic", "#Vibe", "#vibevibes"]
        );
    }

    #[test]
    fn carousel_formats_get_carousel_tags() {
        let tags = build_hashtags("night", "carousel", true);
        assert!(tags.contains(&"#Carousel".to_string()));
        assert!(tags.contains(&"#SwipeThrough".to_string()));
        assert!(!tags.iter().any(|t| t.contains("Reel")));
    }

    #[test]
    fn tags_never_repeat_within_a_post() {
        for (theme, format, active) in [
            ("vibe", "reel", true),
            ("music", "carousel", true),
            ("dancemusic", "reel", true),
            ("edm", "carousel", false),
        ] {
            let tags = build_hashtags(theme, format, active);
            for (i, tag) in tags.iter().enumerate() {
                assert!(
                    !tags[i + 1..]
                        .iter()
                        .any(|other| other.eq_ignore_ascii_case(tag)),
                    "duplicate tag {tag} for theme {theme}"
                );
            }
        }
    }
}
