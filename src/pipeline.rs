//! Generate-all orchestrator — one item per catalog position, in order.
//!
//! Runs sequentially (one completion call at a time, like the endpoint
//! expects) with a fixed pause between positions. A failed call becomes
//! the position's fallback post; everything after a successful call is
//! pure string work, so a run always yields a full catalog of items.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::catalog::{CatalogVariant, CATALOG_SIZE, SYSTEM_PROMPT, USER_PROMPT_SUFFIX};
use crate::completion::CompletionClient;
use crate::postprocess::enforce_word_cap;

/// Pause between successive completion calls.
pub const INTER_CALL_PAUSE: Duration = Duration::from_secs(1);

/// Where an item's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Freshly generated by the completion endpoint.
    Generated,
    /// Canned fallback substituted after a failed call.
    Fallback,
}

/// One accepted piece of content for a run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedItem {
    /// 1-based catalog position.
    pub position: usize,
    pub text: String,
    pub source: ItemSource,
    pub created_at: DateTime<Local>,
}

impl GeneratedItem {
    pub fn is_fallback(&self) -> bool {
        self.source == ItemSource::Fallback
    }
}

/// Produce exactly one item per catalog entry, in catalog order.
///
/// `pause` is the unconditional delay between successive positions
/// (`INTER_CALL_PAUSE` in production, zero in tests).
pub fn generate_all(
    client: &dyn CompletionClient,
    variant: CatalogVariant,
    pause: Duration,
) -> Vec<GeneratedItem> {
    let prompts = variant.prompts();
    let mut items = Vec::with_capacity(CATALOG_SIZE);

    for (idx, prompt) in prompts.iter().enumerate() {
        let position = idx + 1;
        tracing::info!(position, total = CATALOG_SIZE, "Generating post");

        let user_prompt = format!("{prompt}\n\n{USER_PROMPT_SUFFIX}");
        let item = match client.complete(SYSTEM_PROMPT, &user_prompt, variant.max_tokens()) {
            Ok(reply) => {
                let text = enforce_word_cap(&reply, variant.word_caps());
                tracing::info!(position, preview = %preview(&text), "Post generated");
                GeneratedItem {
                    position,
                    text,
                    source: ItemSource::Generated,
                    created_at: Local::now(),
                }
            }
            Err(e) => {
                let text = variant.fallback(position).to_string();
                tracing::warn!(position, error = %e, "Completion failed, using fallback post");
                GeneratedItem {
                    position,
                    text,
                    source: ItemSource::Fallback,
                    created_at: Local::now(),
                }
            }
        };
        items.push(item);

        if position < CATALOG_SIZE && !pause.is_zero() {
            std::thread::sleep(pause);
        }
    }

    tracing::info!(
        generated = items.iter().filter(|i| !i.is_fallback()).count(),
        fallback = items.iter().filter(|i| i.is_fallback()).count(),
        "Run content assembled"
    );
    items
}

/// First line of an item, shortened for log output.
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut p: String = first_line.chars().take(50).collect();
    if first_line.chars().count() > 50 {
        p.push_str("...");
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionError, MockCompletionClient};

    #[test]
    fn all_successes_yield_ten_generated_items_in_order() {
        let client = MockCompletionClient::always("A short uncapped post.");
        let items = generate_all(&client, CatalogVariant::LongForm, Duration::ZERO);

        assert_eq!(items.len(), CATALOG_SIZE);
        for (idx, item) in items.iter().enumerate() {
            assert_eq!(item.position, idx + 1);
            assert_eq!(item.source, ItemSource::Generated);
            assert_eq!(item.text, "A short uncapped post.");
        }
    }

    #[test]
    fn all_failures_yield_the_ten_fallback_posts() {
        let client = MockCompletionClient::always_failing();
        let items = generate_all(&client, CatalogVariant::LongForm, Duration::ZERO);

        assert_eq!(items.len(), CATALOG_SIZE);
        for item in &items {
            assert!(item.is_fallback());
            assert_eq!(item.text, CatalogVariant::LongForm.fallback(item.position));
        }
    }

    #[test]
    fn failed_position_gets_its_own_fallback() {
        let mut outcomes: Vec<Result<String, CompletionError>> =
            (0..CATALOG_SIZE).map(|_| Ok("fine".to_string())).collect();
        outcomes[3] = Err(CompletionError::Timeout); // position 4

        let client = MockCompletionClient::new(outcomes);
        let items = generate_all(&client, CatalogVariant::LongForm, Duration::ZERO);

        assert_eq!(items.len(), CATALOG_SIZE);
        assert!(items[3].is_fallback());
        assert_eq!(items[3].text, CatalogVariant::LongForm.fallback(4));
        assert!(items.iter().filter(|i| i.is_fallback()).count() == 1);
    }

    #[test]
    fn over_cap_replies_are_truncated() {
        let long_reply = vec!["word"; 300].join(" ");
        let client = MockCompletionClient::always(&long_reply);
        let items = generate_all(&client, CatalogVariant::ShortForm, Duration::ZERO);

        for item in &items {
            assert_eq!(item.text.split_whitespace().count(), 25);
            assert!(item.text.ends_with("..."));
        }
    }

    #[test]
    fn preview_shortens_long_first_lines() {
        let text = format!("{}\nsecond line", "x".repeat(80));
        let p = preview(&text);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 53);
    }
}
