//! Textual repair steps for malformed model responses.
//!
//! Language models asked for JSON routinely wrap it in markdown code
//! fences, prepend prose, leave trailing commas or run out of output
//! budget mid-array. Each transform here fixes one such malformation;
//! [`repair`] runs them in a fixed order. The steps are deliberately
//! explicit and individually testable rather than one big regex pass,
//! and every step is a single linear scan over the input.

use regex::Regex;

/// Strips a leading ```` ```json ```` (case-insensitive) or ```` ``` ````
/// marker and a trailing ```` ``` ```` marker, if present.
///
/// The markers are stripped independently so that a fenced response that
/// was truncated before its closing fence still loses the opening one.
pub fn strip_code_fence(s: &str) -> String {
    let mut out = s.to_string();
    if let Ok(re) = Regex::new(r"(?i)^```json\s*") {
        out = re.replace(&out, "").into_owned();
    }
    if let Ok(re) = Regex::new(r"^```\s*") {
        out = re.replace(&out, "").into_owned();
    }
    if let Ok(re) = Regex::new(r"\s*```$") {
        out = re.replace(&out, "").into_owned();
    }
    out
}

/// Discards everything before the first `[` or `{`.
///
/// Handles preamble like "Here is the JSON you asked for:".
pub fn drop_leading_prose(s: &str) -> &str {
    match s.find(['[', '{']) {
        Some(index) if index > 0 => &s[index..],
        _ => s,
    }
}

/// Removes commas whose next non-whitespace character is `]` or `}`.
///
/// The scan is string-aware: commas inside JSON string literals (including
/// behind escape sequences) are left alone.
pub fn strip_trailing_commas(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &c) in chars.iter().enumerate() {
        if escape_next {
            escape_next = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' if in_string => {
                escape_next = true;
                out.push(c);
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            ',' if !in_string => {
                let next = chars[i + 1..].iter().copied().find(|c| !c.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Narrows the input to its widest bracketed span, discarding trailing
/// prose: the first `[` through the last `]` when both exist, otherwise
/// the first `{` through the last `}`.
///
/// Truncated input (unclosed brackets or an unterminated string) is left
/// untouched; narrowing it would cut at some inner closer and defeat the
/// truncation salvage in the decoder, which appends the missing `]`.
pub fn widen_to_bracket_span(s: &str) -> &str {
    if !is_balanced(s) {
        return s;
    }
    if let Some(start) = s.find('[') {
        if let Some(end) = s.rfind(']') {
            if end > start {
                return &s[start..=end];
            }
        }
        return s;
    }
    if let (Some(start), Some(end)) = (s.find('{'), s.rfind('}')) {
        if end > start {
            return &s[start..=end];
        }
    }
    s
}

/// Whether braces, brackets and string literals all close by the end of
/// the input. Stray closers count as unbalanced too.
fn is_balanced(s: &str) -> bool {
    let mut brace_depth: isize = 0;
    let mut bracket_depth: isize = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => brace_depth += 1,
            '}' if !in_string => brace_depth -= 1,
            '[' if !in_string => bracket_depth += 1,
            ']' if !in_string => bracket_depth -= 1,
            _ => {}
        }
    }

    brace_depth == 0 && bracket_depth == 0 && !in_string
}

/// Runs the full repair pipeline in its fixed order.
///
/// Idempotent: repairing already-repaired text is a no-op.
pub fn repair(raw: &str) -> String {
    let step = strip_code_fence(raw.trim());
    let step = drop_leading_prose(step.trim());
    let step = strip_trailing_commas(step);
    widen_to_bracket_span(&step).to_string()
}
