//! Summary rendering (HTML for mail, plain text for the terminal)

use std::fmt::Write;

use ammonia::clean_text;

use super::{ActionItem, Summary};

/// Render a summary as an HTML fragment.
///
/// Points are always listed; decisions and action items only when present.
pub fn render_html(summary: &Summary) -> String {
    let mut html = String::from("<h2>Meeting Summary</h2>\n");

    html.push_str("<h3>Key Points</h3>\n<ul>\n");
    for point in &summary.points {
        let _ = writeln!(html, "  <li>{}</li>", clean_text(point));
    }
    html.push_str("</ul>\n");

    if !summary.decisions.is_empty() {
        html.push_str("<h3>Decisions</h3>\n<ul>\n");
        for decision in &summary.decisions {
            let _ = writeln!(html, "  <li>{}</li>", clean_text(decision));
        }
        html.push_str("</ul>\n");
    }

    if !summary.action_items.is_empty() {
        html.push_str("<h3>Action Items</h3>\n<ul>\n");
        for item in &summary.action_items {
            let _ = write!(
                html,
                "  <li><strong>{}</strong>: {}",
                clean_text(&item.owner),
                clean_text(&item.task)
            );
            if !item.due.is_empty() {
                let _ = write!(html, " <em>(due: {})</em>", clean_text(&item.due));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html
}

/// Render a summary as plain text.
pub fn render_text(summary: &Summary) -> String {
    let mut text = String::from("Key Points:\n");
    if summary.points.is_empty() {
        text.push_str("  (none)\n");
    }
    for point in &summary.points {
        let _ = writeln!(text, "  - {}", point);
    }

    if !summary.decisions.is_empty() {
        text.push_str("\nDecisions:\n");
        for decision in &summary.decisions {
            let _ = writeln!(text, "  - {}", decision);
        }
    }

    if !summary.action_items.is_empty() {
        text.push_str("\nAction Items:\n");
        for item in &summary.action_items {
            let _ = writeln!(text, "  - {}", format_action_item(item));
        }
    }

    text
}

fn format_action_item(item: &ActionItem) -> String {
    if item.due.is_empty() {
        format!("[{}] {}", item.owner, item.task)
    } else {
        format!("[{}] {} (due: {})", item.owner, item.task, item.due)
    }
}

/// Join points one per line, the way they are presented for editing.
pub fn points_to_text(points: &[String]) -> String {
    points.join("\n")
}

/// Split edited text back into points, dropping blank lines.
pub fn points_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
