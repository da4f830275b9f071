//! HTML statistics report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use formdrill_core::statistics::{StatsReport, TopicStats};

use crate::text::window_label;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a statistics report.
pub fn generate_html(report: &StatsReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>formdrill statistics</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>formdrill statistics</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} topics | {} answers | {}</p>\n",
        html_escape(&window_label(report.window)),
        report.topics.len(),
        report.total_answers(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(session) = report.session_id {
        html.push_str(&format!("<p class=\"meta\">session {session}</p>\n"));
    }
    html.push_str("</header>\n");

    // Summary table
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Topic</th><th>Answers</th><th>Correct</th><th>Incorrect</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for topic in &report.topics {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{} ({:.2}%)</td><td>{} ({:.2}%)</td></tr>\n",
            html_escape(&topic.topic),
            topic.total,
            topic.correct,
            topic.correct_pct,
            topic.incorrect,
            topic.incorrect_pct,
        ));
    }
    html.push_str("</tbody></table>\n");

    if report.topics.iter().any(|t| t.total > 0) {
        html.push_str(&generate_bar_chart(&report.topics));
    }
    html.push_str("</section>\n");

    // Hardest formulas per topic
    html.push_str("<section class=\"hardest\">\n");
    html.push_str("<h2>Hardest formulas</h2>\n");
    for topic in report.topics.iter().filter(|t| !t.hardest.is_empty()) {
        html.push_str(&format!("<h3>{}</h3>\n", html_escape(&topic.topic)));
        html.push_str("<table>\n");
        html.push_str("<thead><tr><th>Formula</th><th>Incorrect</th><th>Answers</th><th>Incorrect %</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for hard in &topic.hardest {
            html.push_str(&format!(
                "<tr class=\"fail\"><td>{}</td><td>{}</td><td>{}</td><td>{:.2}%</td></tr>\n",
                html_escape(&hard.name),
                hard.incorrect,
                hard.total,
                hard.incorrect_pct
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &StatsReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Horizontal bars of the correct-answer share per topic.
fn generate_bar_chart(topics: &[TopicStats]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = topics.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, topic) in topics.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let share = topic.correct_pct / 100.0;
        let width = (share * max_width as f64) as usize;

        let color = if share >= 0.8 {
            "#22c55e"
        } else if share >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&topic.topic)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            topic.correct_pct
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
