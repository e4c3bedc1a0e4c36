//! Reply post-processing — format classification and word-cap truncation.
//!
//! Matrix and list posts need more room than one-liners, so the cap is
//! picked by a cheap structural check: any newline or '=' marks the reply
//! as structured. Truncation keeps exactly the allowed number of
//! whitespace-separated tokens and glues an ellipsis to the last one,
//! which makes a second pass a no-op (the token count is unchanged).

use serde::Serialize;

/// Word-cap pair for a catalog variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCaps {
    /// Cap for multi-line / matrix replies.
    pub structured: usize,
    /// Cap for single-line replies.
    pub short: usize,
}

impl WordCaps {
    /// The cap that applies to the given format.
    pub fn for_format(&self, format: ReplyFormat) -> usize {
        match format {
            ReplyFormat::Structured => self.structured,
            ReplyFormat::Short => self.short,
        }
    }
}

/// Detected shape of a cleaned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyFormat {
    /// Contains a newline or an '=' — list or matrix post.
    Structured,
    /// Single line, no matrix markers.
    Short,
}

/// Classify a cleaned reply by its structural markers.
pub fn classify(text: &str) -> ReplyFormat {
    if text.contains('\n') || text.contains('=') {
        ReplyFormat::Structured
    } else {
        ReplyFormat::Short
    }
}

/// Apply the format-appropriate word cap to a cleaned reply.
///
/// Replies at or under the cap pass through unchanged. Over-cap replies
/// are cut after exactly the cap-th whitespace-separated token with `...`
/// appended. The cut can drop the only structural marker (a newline past
/// the cap), so the cap is re-derived from the kept prefix until it is
/// stable; the returned text always counts at most the cap matching its
/// own classification, which makes a second pass a no-op.
pub fn enforce_word_cap(text: &str, caps: WordCaps) -> String {
    let mut cap = caps.for_format(classify(text));
    loop {
        let word_count = text.split_whitespace().count();
        if word_count <= cap {
            return text.to_string();
        }

        let prefix = prefix_of_tokens(text, cap);
        let prefix_cap = caps.for_format(classify(prefix));
        if prefix_cap == cap {
            let mut truncated = String::from(prefix);
            truncated.push_str("...");
            return truncated;
        }
        // Markers lay past the cut; the prefix's own cap applies. A
        // shorter prefix cannot regain markers, so this settles in one
        // more pass.
        cap = prefix_cap;
    }
}

/// Byte prefix of `text` ending at the last character of its `cap`-th
/// whitespace-separated token.
fn prefix_of_tokens(text: &str, cap: usize) -> &str {
    let mut seen = 0;
    let mut end = 0;
    let mut in_token = false;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_token = false;
        } else {
            if !in_token {
                in_token = true;
                seen += 1;
                if seen > cap {
                    break;
                }
            }
            end = i + ch.len_utf8();
        }
    }
    &text[..end]
}
