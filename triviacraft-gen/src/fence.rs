//! Markdown code fence stripping
//!
//! Models are told not to wrap their JSON in fences, but regularly do anyway.

const FENCE: &str = "```";

/// Strip a Markdown code fence wrapping `text`, trimmed.
///
/// Only a fence that opens the text counts: the opening line may carry a
/// language tag (```` ```json ````) and a trailing closing fence is dropped.
/// Anything else is returned trimmed and otherwise untouched, so backticks
/// inside JSON string values survive.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match after_open.find('\n') {
        Some(nl) if is_fence_tag(&after_open[..nl]) => &after_open[nl + 1..],
        _ => after_open.strip_prefix("json").unwrap_or(after_open),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// An info string such as `json`, `JSON` or nothing at all.
fn is_fence_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: &str = r#"{"question":"Q?","answer":"A."}"#;

    #[test]
    fn test_unfenced_text_is_trimmed_only() {
        assert_eq!(strip_code_fences(INNER), INNER);
        assert_eq!(strip_code_fences("\n  {\"a\":1}  \n"), "{\"a\":1}");
    }

    #[test]
    fn test_json_tagged_fence() {
        let fenced = format!("```json\n{}\n```", INNER);
        assert_eq!(strip_code_fences(&fenced), INNER);
    }

    #[test]
    fn test_untagged_fence() {
        let fenced = format!("```\n{}\n```\n", INNER);
        assert_eq!(strip_code_fences(&fenced), INNER);
    }

    #[test]
    fn test_single_line_fence() {
        let fenced = format!("```json{}```", INNER);
        assert_eq!(strip_code_fences(&fenced), INNER);

        let fenced = format!("```{}```", INNER);
        assert_eq!(strip_code_fences(&fenced), INNER);
    }

    #[test]
    fn test_fence_not_at_start_is_left_alone() {
        let text = format!("Here you go:\n```JSON\n{}\n```", INNER);
        assert_eq!(strip_code_fences(&text), text);
    }

    #[test]
    fn test_backticks_inside_value_are_kept() {
        let inner =
            r#"{"question":"In Markdown, what do ``` lines start?","answer":"A code block."}"#;
        assert_eq!(strip_code_fences(inner), inner);

        let fenced = format!("```json\n{}\n```", inner);
        assert_eq!(strip_code_fences(&fenced), inner);

        let untagged = format!("```\n{}\n```\n", inner);
        assert_eq!(strip_code_fences(&untagged), inner);
    }

    #[test]
    fn test_missing_closing_fence() {
        let fenced = format!("```json\n{}", INNER);
        assert_eq!(strip_code_fences(&fenced), INNER);
    }

    #[test]
    fn test_idempotent() {
        let fenced = format!("```json\n{}\n```", INNER);
        let once = strip_code_fences(&fenced);
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn test_multiline_body_preserved() {
        let body = "{\n  \"question\": \"Q?\",\n  \"answer\": \"A.\"\n}";
        let fenced = format!("```json\n{}\n```", body);
        assert_eq!(strip_code_fences(&fenced), body);
    }
}
