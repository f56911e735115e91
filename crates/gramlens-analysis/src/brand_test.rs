use chrono::Utc;
use gramlens_core::MediaType;

use super::*;

fn artifact(id: &str, caption: &str) -> Artifact {
    Artifact {
        artifact_id: id.to_string(),
        source_url: format!("https://www.instagram.com/p/{id}/"),
        captured_at: Utc::now(),
        account_handle: "nightpulse".to_string(),
        post_id: Some(id.to_string()),
        caption_text: caption.to_string(),
        media_type: MediaType::Unknown,
        posted_at: None,
        like_count: None,
        comment_count: None,
    }
}

#[test]
fn empty_artifact_set_fails_fast() {
    let err = analyze_brand("nightpulse", &[]).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyArtifactSet));
}

#[test]
fn analysis_is_deterministic() {
    let artifacts = vec![
        artifact("a1", "LOVE this #vibe @friend"),
        artifact("a2", "another #vibe post"),
    ];

    let first = analyze_brand("nightpulse", &artifacts).expect("analyze");
    let second = analyze_brand("nightpulse", &artifacts).expect("analyze");

    assert_eq!(first.observed, second.observed);
    assert_eq!(first.inferred, second.inferred);
    assert_eq!(first.artifact_refs, second.artifact_refs);
}

#[test]
fn hashtag_mention_and_length_signals() {
    let artifacts = vec![
        artifact("a1", "LOVE this #vibe @friend"),
        artifact("a2", "another #vibe post"),
    ];

    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");

    assert_eq!(dna.observed[0], "2 recent posts analyzed");
    assert_eq!(dna.observed[2], "Hashtag strategy: Active");
    assert_eq!(dna.observed[3], "Mention strategy: Active");
    // lengths 23 and 18; mean 20.5 rounds to 21
    assert_eq!(dna.observed[4], "Average caption length: 21 characters");
    // the LOVE caps run reads as emphatic
    assert_eq!(dna.inferred[0], "Tone: Energetic/Emphatic");
    assert_eq!(
        dna.inferred[1],
        "Audience engagement approach: Community-focused"
    );
}

#[test]
fn quiet_captions_read_as_measured_broadcast() {
    let artifacts = vec![artifact("a1", "an understated caption without signals")];

    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");

    assert_eq!(dna.observed[1], "Uses emojis: No");
    assert_eq!(dna.observed[2], "Hashtag strategy: Minimal");
    assert_eq!(dna.observed[3], "Mention strategy: Minimal");
    assert_eq!(dna.inferred[0], "Tone: Measured");
    assert_eq!(
        dna.inferred[1],
        "Audience engagement approach: Broadcast-focused"
    );
}

#[test]
fn all_empty_captions_fall_back_to_declaration_order_pillars() {
    let artifacts = vec![artifact("a1", ""), artifact("a2", "")];

    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");

    assert_eq!(dna.observed[4], "Average caption length: 0 characters");
    assert_eq!(dna.inferred[2], "Content pillar: music, event, lifestyle");
}

#[test]
fn dominant_keyword_group_leads_the_pillar_list() {
    let artifacts = vec![artifact(
        "a1",
        "art design style and visual direction, plus one beat",
    )];

    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");

    let pillars = &dna.inferred[2];
    assert!(
        pillars.starts_with("Content pillar: visual"),
        "unexpected pillar statement: {pillars}"
    );
}

#[test]
fn emoji_glyphs_are_detected() {
    let artifacts = vec![artifact("a1", "🔥 new drop tonight ⚡")];
    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");
    assert_eq!(dna.observed[1], "Uses emojis: Yes");
}

#[test]
fn artifact_refs_preserve_input_order() {
    let artifacts = vec![
        artifact("a3", "one"),
        artifact("a1", "two"),
        artifact("a2", "three"),
    ];
    let dna = analyze_brand("nightpulse", &artifacts).expect("analyze");
    assert_eq!(dna.artifact_refs, vec!["a3", "a1", "a2"]);
}

#[test]
fn keywords_come_from_inferred_statements() {
    let dna = BrandDna {
        observed: vec!["ignored".to_string()],
        inferred: vec![
            "Tone: Energetic/Emphatic".to_string(),
            "Audience engagement approach: Community-focused".to_string(),
            "Content pillar: music, event, lifestyle".to_string(),
        ],
        artifact_refs: vec![],
    };

    let keywords = brand_keywords(&dna);

    assert_eq!(
        keywords,
        vec!["tone", "energetic", "emphatic", "audience", "engagement"]
    );
    assert!(keywords.len() <= 5);
}
