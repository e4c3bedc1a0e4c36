//! Prompt catalog — the ten fixed content prompts and their index-aligned
//! fallback posts.
//!
//! The catalog drives one run: five core financial ideas, each in two
//! formats (A/B variation to avoid audience fatigue), paired by position
//! with a canned fallback post used when the remote call fails. Prompts
//! and fallbacks are fixed-size arrays so the 1:1 correspondence is
//! enforced by the type system instead of modulo wraparound.

use serde::{Deserialize, Serialize};

use crate::postprocess::WordCaps;

/// Number of prompts per catalog. Fallbacks match by construction.
pub const CATALOG_SIZE: usize = 10;

/// Which prompt catalog is active, selecting reply-length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogVariant {
    /// Full A/B post prompts, 400-token replies, 200/150 word caps.
    LongForm,
    /// Condensed one-liner prompts, 100-token replies, 60/25 word caps.
    ShortForm,
}

impl CatalogVariant {
    /// Parse a configuration tag (`long_form` / `short_form`).
    pub fn from_tag(raw: &str) -> Option<Self> {
        match raw.trim() {
            "long_form" => Some(Self::LongForm),
            "short_form" => Some(Self::ShortForm),
            _ => None,
        }
    }

    /// Reply-length bound sent to the completion endpoint.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Self::LongForm => 400,
            Self::ShortForm => 100,
        }
    }

    /// Word-cap pair applied by the post-processor.
    pub fn word_caps(&self) -> WordCaps {
        match self {
            Self::LongForm => WordCaps {
                structured: 200,
                short: 150,
            },
            Self::ShortForm => WordCaps {
                structured: 60,
                short: 25,
            },
        }
    }

    /// The prompt list for this variant, in catalog order.
    pub fn prompts(&self) -> &'static [&'static str; CATALOG_SIZE] {
        match self {
            Self::LongForm => &LONG_FORM_PROMPTS,
            Self::ShortForm => &SHORT_FORM_PROMPTS,
        }
    }

    /// Fallback post for a 1-based catalog position.
    ///
    /// Panics on out-of-range positions; callers iterate 1..=CATALOG_SIZE.
    pub fn fallback(&self, position: usize) -> &'static str {
        FALLBACK_POSTS[position - 1]
    }
}

/// System instruction sent with every completion request. Few-shot style
/// guide with the proven viral formats.
pub const SYSTEM_PROMPT: &str = r#"You are a viral finance/investing content creator on Threads. Your posts get 50K-1M+ views. You build trust by teaching smart money habits, not hype.

Style guide:
- Focus on FINANCE, INVESTING, MONEY HABITS, and WEALTH BUILDING only
- Use specific dollar amounts ($10k, $50k, $400/week, $1M)
- Create list formats with bullet points (they perform best)
- Be educational but provocative - challenge bad money habits
- Keep posts SHORT and scannable (lists work better than paragraphs)
- Make it aspirational but achievable - real financial freedom
- Use math/numbers to prove points (returns, comparisons, calculations)

PROVEN VIRAL FORMATS:
1. LIST: "The real flex? - No car payment - No credit card debt - A fat emergency fund - Investing every month - Sleeping peacefully at night" (221K views, 10.1K likes)

2. LIST: "When you start making good money, do this: 1. Buy fewer clothes, but wear the highest quality. 2. Hire a helper for household chores. Buy back your time. 3. Upgrade your financial adviser. 4. Surround yourself with high-value people. Small shifts. Big impact." (1.1M views)

3. COMPARISON: "If you invest $50,000 in stocks and it grows 4% in a year, you've made $2,000. If you use that same $50,000 as a 10% down payment on a $500,000 home and it appreciates 4%, the house is now worth $520,000. That's a $20,000 gain - 10x more than the stock investment. That's the power of leverage!" (347K views)

4. SATIRE: "Met a guy today. Age: 22. Portfolio: $1 Million. Started investing post covid. Goal: To retire at 30. I asked him how he built a million-dollar portfolio so young. He said that after COVID, he worked hard and convinced his dad to give him $2 million." (310K views)

5. NORMALIZE: "Normalize having friends who talk about investments, side hustles, and building generational wealth instead of just gossip. Upgrade your circle." (240K views)

6. CONDITIONAL: "If you have less than $10k saved: - Skip the bars - Cook at home - Cut subscriptions - Save aggressively. No shame in this. $300 on bottles isn't a flex. But saving $400/week to invest is." (50.9K views)

7. DIVERSIFICATION: "Don't put all your money in Bitcoin. Don't put all your money in Stocks. Don't put all your money in Real Estate. Instead, invest in a little bit of everything so you have a diversified portfolio!" (36.3K views)

Write like this - specific, educational, aspirational, with real numbers."#;

/// Fixed suffix appended to every user prompt.
pub const USER_PROMPT_SUFFIX: &str =
    "Respond with ONLY the post content. No explanations, no quotes, no meta-commentary. Just the raw post text.";

/// Full A/B format prompts: five ideas, each as a proven format plus a
/// newer variation.
const LONG_FORM_PROMPTS: [&str; CATALOG_SIZE] = [
    // Idea 1: debt-free living is real wealth (list / observation)
    "Create a list post starting with 'The real flex?' followed by 4-5 bullet points about financial freedom markers. Use format: '- No car payment' '- No credit card debt' '- A fat emergency fund' '- Investing every month' '- Sleeping peacefully at night'. Focus on debt-free living and smart money habits.",
    "Create an observation post using this structure: 'One pattern I've noticed in [wealthy/financially free/millionaire] people: They're obsessive about [eliminating debt/living below their means/financial clarity].' Then add 2-3 specific examples of what this looks like in practice. Keep it under 60 words. Focus on debt-free living as a wealth marker.",
    // Idea 2: diversification beats concentration risk (bold statement / satire)
    "Share a controversial financial truth using comparison. Format: 'Don't put all your money in [Bitcoin]. Don't put all your money in [Stocks]. Don't put all your money in [Real Estate]. Instead, [invest in a little bit of everything so you have a diversified portfolio]!' Make it educational but provocative about diversification.",
    "Tell a short satirical story about someone who went all-in on one investment and lost vs. someone who diversified and won. Format: 'Met two investors. Guy A: [went all-in on crypto]. Made $[X], lost it all. Guy B: [spread across 7 assets]. Still building wealth in 2026.' Use specific numbers. End with a lesson about diversification risk.",
    // Idea 3: time is more valuable than money (list / question)
    "Create advice for people making good money. Start with 'When you start making good money, do this:' then list 5-7 smart money moves. Examples: 'Buy fewer clothes, but wear the highest quality' 'Hire a helper for household chores. Buy back your time' 'Upgrade your financial adviser' 'Surround yourself with high-value people'. End with 'Small shifts. Big impact.'",
    "Ask a provocative question about time vs. money. Examples: 'Why do we spend 2 hours hunting for deals to save $20 but refuse to pay $100 to save 5 hours?' or 'How much is your time worth per hour? Are you living like it?' Make it personal and reflective about buying back time with money.",
    // Idea 4: delayed gratification builds long-term wealth (conditional / matrix)
    "Create conditional advice based on savings level. Format: 'If you have less than $[10k/20k/50k] saved:' followed by 4-5 bullet points of practical money-saving tips. Examples: '- Skip the bars' '- Cook at home' '- Cut subscriptions' '- Save aggressively'. End with a bold statement like 'No shame in this.' or '$300 on bottles isn't a flex. But saving $400/week to invest is.'",
    "Create a 2x2 financial matrix using this format: 'High [income/earnings] + high [delayed gratification/saving rate] = [wealth builders]. High income + low saving rate = [broke earners]. Low income + high saving rate = [slow and steady]. Low income + low saving rate = [perpetually broke].' Use delayed gratification as a key variable. Keep it provocative.",
    // Idea 5: your circle determines your net worth (normalize / math comparison)
    "Use the 'Normalize' format to promote healthy money habits. Structure: 'Normalize having friends who talk about [investments/side hustles/building generational wealth] instead of just [gossip/drama/consumption].' Then add a call to action like 'Upgrade your circle.' Focus on aspirational peer groups and money conversations.",
    "Create a comparison showing the financial impact of peer groups using numbers. Format: 'If your 5 closest friends [average $50K income and spend it all], you'll likely [earn $50K and stay broke]. If your 5 closest friends [average $150K income and invest 30%], you'll likely [level up to 6 figures and build wealth].' Show the math. End with 'You become the average of your circle.'",
];

/// Condensed prompts for the short catalog: same ten ideas, one line each.
const SHORT_FORM_PROMPTS: [&str; CATALOG_SIZE] = [
    "Write a 5-bullet list post on the markers of real financial freedom, starting with 'The real flex?'. Under 25 words.",
    "Write a one-sentence observation about what wealthy people obsess over (eliminating debt). Under 25 words.",
    "Write a provocative one-liner about diversification beating going all-in on one asset. Under 25 words.",
    "Write a two-line satire contrasting an all-in crypto investor with a diversified one. Under 25 words.",
    "Write a 3-bullet list of smart moves to make when you start earning well. Under 25 words.",
    "Ask one provocative question about trading hours of your life for small savings. Under 25 words.",
    "Write a 4-bullet savings checklist for someone with under $10k saved. Under 25 words.",
    "Write a 2x2 matrix post: income level vs. saving rate and where each lands. Use '=' signs. Under 60 words.",
    "Write a one-line 'Normalize' post about friends who talk investments instead of gossip. Under 25 words.",
    "Write a one-line comparison of the net worth impact of your 5 closest friends. Under 25 words.",
];

/// Canned posts substituted when the remote call fails, index-aligned with
/// both prompt lists.
const FALLBACK_POSTS: [&str; CATALOG_SIZE] = [
    "The real flex?\n\n- No car payment\n- No credit card debt\n- A fat emergency fund\n- Investing every month\n- Sleeping peacefully at night",
    "One pattern I've noticed in wealthy people: They're obsessive about eliminating debt.\n\nThey drive paid-off cars.\nThey avoid credit card balances.\nThey sleep peacefully.",
    "Don't put all your money in Bitcoin.\nDon't put all your money in Stocks.\nDon't put all your money in Real Estate.\n\nInstead, invest in a little bit of everything so you have a diversified portfolio!",
    "Met two investors.\n\nGuy A: All-in on crypto. Made $200K in 2021. Lost it all by 2023.\n\nGuy B: Spread across 7 assets. Still building wealth in 2026.\n\nDiversification isn't boring. It's survival.",
    "When you start making good money, do this:\n\n1. Buy fewer clothes, but wear the highest quality\n2. Hire help for household chores - buy back your time\n3. Upgrade your financial adviser\n4. Surround yourself with high-value people\n\nSmall shifts. Big impact.",
    "Why do we spend 2 hours hunting for deals to save $20 but refuse to pay $100 to save 5 hours?\n\nHow much is your time actually worth?",
    "If you have less than $10k saved:\n\n- Skip the bars\n- Cook at home\n- Cut subscriptions\n- Save aggressively\n\nNo shame in this.\n\n$300 on bottles isn't a flex.\nBut saving $400/week to invest is.",
    "High income + high saving rate = wealth builders.\nHigh income + low saving rate = broke earners.\nLow income + high saving rate = slow and steady.\nLow income + low saving rate = perpetually broke.",
    "Normalize having friends who talk about investments, side hustles, and building generational wealth instead of just gossip.\n\nUpgrade your circle.",
    "If your 5 closest friends average $50K and spend it all, you'll earn $50K and stay broke.\n\nIf your 5 closest friends average $150K and invest 30%, you'll level up to 6 figures.\n\nYou become the average of your circle.",
];
