//! Self-contained HTML rendering of an analysis report.
//!
//! The document layout is internal to this crate; the pipeline only hands
//! over an [`AnalyzeReport`] and serves whatever comes back.

use chrono::{DateTime, Utc};
use gramlens_core::AnalyzeReport;

/// Render a report as a standalone HTML document.
#[must_use]
pub fn render_report(report: &AnalyzeReport) -> String {
    let mut doc = String::with_capacity(8 * 1024);

    doc.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    doc.push_str(&format!(
        "<title>gramlens report — @{}</title>\n",
        escape(&report.target_handle)
    ));
    doc.push_str(
        "<style>\n\
         body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 48rem; }\n\
         h1 { border-bottom: 2px solid #222; padding-bottom: .3rem; }\n\
         h2 { margin-top: 2rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: .4rem .6rem; text-align: left; }\n\
         .post { border: 1px solid #ccc; border-radius: 6px; padding: 1rem; margin: 1rem 0; }\n\
         .meta { color: #666; font-size: .85rem; }\n\
         </style>\n</head>\n<body>\n",
    );

    doc.push_str(&format!(
        "<h1>Brand report: @{}</h1>\n",
        escape(&report.target_handle)
    ));
    doc.push_str(&format!(
        "<p class=\"meta\">Generated {}</p>\n",
        format_timestamp(report.metadata.timestamp)
    ));

    doc.push_str("<h2>Brand DNA</h2>\n<h3>Observed</h3>\n<ul>\n");
    for statement in &report.brand_dna.observed {
        doc.push_str(&format!("<li>{}</li>\n", escape(statement)));
    }
    doc.push_str("</ul>\n<h3>Inferred</h3>\n<ul>\n");
    for statement in &report.brand_dna.inferred {
        doc.push_str(&format!("<li>{}</li>\n", escape(statement)));
    }
    doc.push_str("</ul>\n");

    doc.push_str("<h2>Competitor insights</h2>\n<table>\n<tr><th>Handle</th><th>Top formats</th><th>Common themes</th><th>Avg engagement</th></tr>\n");
    for insight in &report.competitor_insights {
        doc.push_str(&format!(
            "<tr><td>@{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&insight.handle),
            escape(&insight.top_formats.join(", ")),
            escape(&insight.common_themes.join(", ")),
            insight.engagement_avg
        ));
    }
    doc.push_str("</table>\n");

    doc.push_str("<h2>Generated drafts</h2>\n");
    for (i, post) in report.generated_posts.iter().enumerate() {
        doc.push_str(&format!(
            "<div class=\"post\">\n<h3>Draft {} — {}</h3>\n<p>{}</p>\n<p>{}</p>\n<p class=\"meta\">{}</p>\n</div>\n",
            i + 1,
            escape(&post.format),
            escape(&post.caption),
            escape(&post.hashtags.join(" ")),
            escape(&post.reasoning)
        ));
    }

    doc.push_str(&format!(
        "<p class=\"meta\">{} artifacts collected · {} competitors analyzed · {} posts generated · engagement metrics {}</p>\n",
        report.metadata.artifacts_collected,
        report.metadata.competitors_analyzed,
        report.metadata.posts_generated,
        if report.metadata.like_comment_visible { "visible" } else { "not visible" }
    ));

    doc.push_str("</body>\n</html>\n");
    doc
}

/// Download filename for a rendered report.
#[must_use]
pub fn report_filename(handle: &str, timestamp: DateTime<Utc>) -> String {
    format!("gramlens-{handle}-{}.html", timestamp.timestamp_millis())
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
