//! Pure formatting of a [`TestResults`] record.

use crate::harness::results::TestResults;

/// Console-oriented multi-line rendering: one section per outcome, each
/// entry indented, with a `none` placeholder for empty sections.
pub fn results_to_console(results: &TestResults) -> String {
    let mut lines: Vec<String> = Vec::new();
    console_section(&mut lines, "Passing  tests", &results.passes);
    console_section(&mut lines, "Failing  tests", &results.fails);
    console_section(&mut lines, "Erroring tests", &results.errors);
    lines.join("\n")
}

fn console_section(lines: &mut Vec<String>, title: &str, entries: &[String]) {
    lines.push(title.to_string());
    for entry in entries {
        lines.push(format!("    {}", entry));
    }
    if entries.is_empty() {
        lines.push("    none".to_string());
    }
    lines.push(String::new());
}

/// Structured markup rendering of the same sections.
pub fn results_as_html(results: &TestResults) -> String {
    let mut html: Vec<String> = Vec::new();
    html_section(&mut html, "Passing  tests", "passes", &results.passes);
    html_section(&mut html, "Failing  tests", "fails", &results.fails);
    html_section(&mut html, "Erroring tests", "errors", &results.errors);
    html.join("\n")
}

fn html_section(html: &mut Vec<String>, title: &str, kind: &str, entries: &[String]) {
    html.push("<div class='test-messages-section'>".to_string());
    html.push(format!("<h2>{}</h2>", title));
    html.push("<hr>".to_string());
    html.push(format!("<ul class='test-messages test-{}'>", kind));
    for entry in entries {
        html.push(format!("<li>{}", entry));
    }
    if entries.is_empty() {
        html.push("<li class='test-message-none'>none".to_string());
    }
    html.push("</ul>".to_string());
    html.push("</div>".to_string());
}
