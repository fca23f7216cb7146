//! Markdown rendering of search results for tool responses

use crate::core::types::SearchResult;

/// Returned when there is nothing to render
pub const NO_RESULTS: &str = "No results found.";

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Render results as numbered Markdown blocks
///
/// Pure and deterministic. Optional fields that are absent, and an
/// empty snippet, are left out of the block.
pub fn format_search_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, result)| format_block(i + 1, result))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn format_block(number: usize, result: &SearchResult) -> String {
    let mut lines = vec![
        format!("## Result {number}: {}", result.title()),
        format!("**URL:** {}", result.url()),
    ];

    if !result.snippet().is_empty() {
        lines.push(format!("**Summary:** {}", result.snippet()));
    }
    if let Some(source) = result.source() {
        lines.push(format!("**Source:** {source}"));
    }
    if let Some(date) = result.published_date() {
        lines.push(format!("**Published:** {date}"));
    }

    lines.join("\n")
}
