use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::models::TokenCount;
use crate::store::ReflectionLog;

pub const DEFAULT_TOP_K: usize = 10;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_가-힣]+").expect("valid token regex"));

/// What the text-mining view has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiningOutcome {
    /// Nothing has ever been submitted, so the store file does not exist.
    NoStore,
    /// The store exists but holds no countable words.
    Empty,
    Ranked(Vec<TokenCount>),
}

pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN.find_iter(text).map(|m| m.as_str())
}

/// Most frequent tokens, ties kept in order of first appearance.
pub fn top_tokens(text: &str, k: usize) -> Vec<TokenCount> {
    if k == 0 {
        return Vec::new();
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TokenCount> = Vec::new();

    for token in tokenize(text) {
        let index = *positions.entry(token).or_insert_with(|| {
            counts.push(TokenCount {
                token: token.to_string(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[index].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

/// Ranks words across every stored comment.
pub fn mine<L: ReflectionLog + ?Sized>(log: &L, k: usize) -> Result<MiningOutcome> {
    let Some(text) = log.read_text()? else {
        return Ok(MiningOutcome::NoStore);
    };

    let corpus = crate::store::parse_reflections(&text)
        .into_iter()
        .map(|reflection| reflection.comment)
        .collect::<Vec<_>>()
        .join(" ");

    let ranked = top_tokens(&corpus, k);
    debug!(chars = corpus.len(), ranked = ranked.len(), "mined reflections");

    if ranked.is_empty() {
        Ok(MiningOutcome::Empty)
    } else {
        Ok(MiningOutcome::Ranked(ranked))
    }
}
