use std::cmp::Ordering;

use anyhow::Result;
use tracing::warn;

use super::segment::Section;
use super::text::preprocess;

/// How many sections survive a ranking pass per document.
pub const TOP_K: usize = 5;

/// A section annotated with its importance rank (1 = most relevant).
#[derive(Debug, Clone)]
pub struct RankedSection {
    pub section: Section,
    pub rank: u32,
}

/// Swappable relevance-scoring capability: one score per input text,
/// higher = more relevant to the query.
pub trait RelevanceScorer {
    fn score_batch(&self, texts: &[String], query: &str) -> Result<Vec<f32>>;
}

/// Built-in scorer: term-frequency overlap of query terms against the
/// candidate, normalized by candidate length so short on-topic sections
/// are not drowned out by long rambling ones.
#[derive(Debug, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self {
        Self
    }
}

impl RelevanceScorer for LexicalScorer {
    fn score_batch(&self, texts: &[String], query: &str) -> Result<Vec<f32>> {
        let mut terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        terms.sort();
        terms.dedup();
        Ok(texts.iter().map(|t| lexical_score(t, &terms)).collect())
    }
}

fn lexical_score(text: &str, terms: &[String]) -> f32 {
    if terms.is_empty() || text.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let hits: usize = terms
        .iter()
        .map(|term| lower.matches(term.as_str()).count())
        .sum();
    if hits == 0 {
        0.0
    } else {
        hits as f32 / lower.split_whitespace().count().max(1) as f32
    }
}

/// Rank sections against the persona/task query and keep the top `k`.
///
/// The query is appended to the scoring batch so every call encodes
/// uniformly; its own score is dropped before sorting. Ties keep encounter
/// order (stable sort). With no scorer, or a failing one, the first `k`
/// sections in encounter order are returned so the pipeline still produces
/// output at reduced quality.
pub fn rank(
    sections: &[Section],
    persona: &str,
    task: &str,
    k: usize,
    scorer: Option<&dyn RelevanceScorer>,
) -> Vec<RankedSection> {
    let query = format!("{} {}", persona, task).to_lowercase();

    let scores = scorer.and_then(|s| {
        let mut batch: Vec<String> = sections.iter().map(|sec| preprocess(&sec.body)).collect();
        batch.push(query.clone());
        match s.score_batch(&batch, &query) {
            Ok(mut scores) if scores.len() == batch.len() => {
                scores.pop();
                Some(scores)
            }
            Ok(scores) => {
                warn!(
                    "scorer returned {} scores for {} inputs, ranking by encounter order",
                    scores.len(),
                    batch.len()
                );
                None
            }
            Err(e) => {
                warn!("scorer failed ({e}), ranking by encounter order");
                None
            }
        }
    });

    let order: Vec<usize> = match scores {
        Some(scores) => {
            let mut idx: Vec<usize> = (0..sections.len()).collect();
            idx.sort_by(|&a, &b| {
                scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal)
            });
            idx
        }
        None => (0..sections.len()).collect(),
    };

    order
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, idx)| RankedSection {
            section: sections[idx].clone(),
            rank: (i + 1) as u32,
        })
        .collect()
}
