//! Raw model output cleanup
//!
//! Models wrap JSON in Markdown fences, leak control characters and leave
//! trailing commas. [`sanitize`] turns such text into something `serde_json`
//! can read. It does not validate anything.

/// Clean raw model output before JSON parsing
///
/// Stages, in order:
/// 1. unwrap a Markdown code fence if present
/// 2. keep the outermost `{ ... }` object if one exists
/// 3. drop ASCII control characters (0x00-0x1F)
/// 4. drop trailing commas before `}` or `]` (outside string literals)
///
/// # Example
///
/// ```
/// use imposter_domain::response::sanitize;
///
/// let raw = "```json\n{\"clue\": \"fog\",}\n```";
/// assert_eq!(sanitize(raw), "{\"clue\": \"fog\"}");
/// ```
pub fn sanitize(raw: &str) -> String {
    let unfenced = strip_code_fence(raw.trim());
    let object = extract_object(unfenced);
    let printable: String = object.chars().filter(|c| !is_ascii_control(*c)).collect();
    strip_trailing_commas(printable.trim())
}

fn is_ascii_control(c: char) -> bool {
    (c as u32) < 0x20
}

fn strip_code_fence(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text;
    };
    // A fence after the first brace sits inside the object, usually in a string
    if text.find('{').is_some_and(|brace| brace < open) {
        return text;
    }
    let after_open = &text[open + 3..];
    // Skip the info string ("json", "JSON", ...) up to the end of the line
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open,
    };
    match body.rfind("```") {
        Some(close) => &body[..close],
        None => body,
    }
}

fn extract_object(text: &str) -> &str {
    if let Some(start) = text.find('{')
        && let Some(end) = text.rfind('}')
        && end > start
    {
        return &text[start..=end];
    }
    text
}

fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_unchanged() {
        let raw = r#"{"clue": "fog", "confidence": 80}"#;
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn test_strips_fence_with_language_tag() {
        let raw = "Here you go:\n```json\n{\"clue\": \"fog\"}\n```\nGood luck!";
        assert_eq!(sanitize(raw), r#"{"clue": "fog"}"#);
    }

    #[test]
    fn test_backticks_inside_string_untouched() {
        let raw = r#"{"rationale": "Avoid ``` style markdown here", "clue": "beacon", "confidence": 80}"#;
        assert_eq!(sanitize(raw), raw);
        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["clue"], "beacon");
    }

    #[test]
    fn test_fenced_object_with_backticks_in_string() {
        let raw = "```json\n{\"rationale\": \"no ``` here\", \"clue\": \"fog\"}\n```";
        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["rationale"], "no ``` here");
    }

    #[test]
    fn test_strips_bare_fence() {
        let raw = "```\n{\"clue\": \"fog\"}\n```";
        assert_eq!(sanitize(raw), r#"{"clue": "fog"}"#);
    }

    #[test]
    fn test_extracts_object_from_prose() {
        let raw = r#"Sure! {"target": "Player_2"} That's my vote."#;
        assert_eq!(sanitize(raw), r#"{"target": "Player_2"}"#);
    }

    #[test]
    fn test_strips_control_characters() {
        let raw = "{\"rationale\": \"line one\u{0007}\u{0000}\",\n\t\"clue\": \"fog\"}";
        let cleaned = sanitize(raw);
        assert!(!cleaned.chars().any(|c| (c as u32) < 0x20));
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["rationale"], "line one");
    }

    #[test]
    fn test_strips_trailing_commas() {
        let raw = r#"{"a": [1, 2, ], "b": {"c": 3 , }, }"#;
        let cleaned = sanitize(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["a"][1], 2);
        assert_eq!(value["b"]["c"], 3);
    }

    #[test]
    fn test_trailing_comma_inside_string_kept() {
        let raw = r#"{"rationale": "odd, }", "clue": "x",}"#;
        let cleaned = sanitize(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["rationale"], "odd, }");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = r#"{"rationale": "she said \"no,\" ]", "clue": "x",}"#;
        let value: serde_json::Value = serde_json::from_str(&sanitize(raw)).unwrap();
        assert_eq!(value["clue"], "x");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("```json\n```"), "");
    }
}
