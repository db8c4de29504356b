use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::rank::RankedSection;
use super::text::preprocess;
use crate::output::SubsectionInsight;

static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Cap on sentences kept per refined section.
pub const MAX_SENTENCES: usize = 3;

/// Distill each ranked section down to the sentences that mention a
/// persona/task keyword. A section with no matching sentence contributes
/// no insight at all; one never contributes more than one.
pub fn refine(
    ranked: &[RankedSection],
    document: &str,
    persona: &str,
    task: &str,
    max_sentences: usize,
) -> Vec<SubsectionInsight> {
    let keywords: HashSet<String> = format!("{} {}", persona, task)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut insights = Vec::new();
    for rs in ranked {
        let kept: Vec<&str> = split_sentences(&rs.section.body)
            .into_iter()
            .filter(|sentence| {
                let lower = sentence.to_lowercase();
                keywords.iter().any(|kw| lower.contains(kw.as_str()))
            })
            .take(max_sentences)
            .collect();

        let refined = preprocess(&kept.join(" "));
        if refined.is_empty() {
            continue;
        }
        insights.push(SubsectionInsight {
            document: document.to_string(),
            refined_text: refined,
            page_number: rs.section.page_number,
        });
    }
    insights
}

/// Split on sentence-ending punctuation followed by whitespace, keeping the
/// punctuation with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        // The punctuation is a single ASCII byte at the match start.
        let end = m.start() + 1;
        sentences.push(&text[start..end]);
        start = m.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::segment::Section;

    fn ranked(body: &str, page: u32, rank: u32) -> RankedSection {
        RankedSection {
            section: Section {
                title: "T".to_string(),
                body: body.to_string(),
                page_number: page,
            },
            rank,
        }
    }

    #[test]
    fn keeps_only_keyword_sentences() {
        let sections = vec![ranked("This dish uses vegan cheese. It is quick to make.", 1, 1)];
        let insights = refine(&sections, "recipes.pdf", "Chef", "find vegan recipes", 3);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].refined_text, "This dish uses vegan cheese.");
        assert_eq!(insights[0].document, "recipes.pdf");
        assert_eq!(insights[0].page_number, 1);
    }

    #[test]
    fn caps_at_max_sentences() {
        let body = "Vegan one. Vegan two! Vegan three? Vegan four. Vegan five.";
        let sections = vec![ranked(body, 2, 1)];
        let insights = refine(&sections, "d", "Chef", "vegan", 3);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].refined_text, "Vegan one. Vegan two! Vegan three?");
    }

    #[test]
    fn no_match_emits_nothing() {
        let sections = vec![ranked("Nothing on topic here at all.", 1, 1)];
        let insights = refine(&sections, "d", "Chef", "find vegan recipes", 3);
        assert!(insights.is_empty());
    }

    #[test]
    fn order_follows_input_order() {
        let sections = vec![
            ranked("Vegan starters on page four.", 4, 1),
            ranked("More vegan mains on page nine.", 9, 2),
        ];
        let insights = refine(&sections, "d", "Chef", "vegan", 3);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].page_number, 4);
        assert_eq!(insights[1].page_number, 9);
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let sections = vec![ranked("VEGANISM is discussed briefly.", 1, 1)];
        let insights = refine(&sections, "d", "Chef", "vegan", 3);
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn split_keeps_punctuation() {
        let s = split_sentences("One. Two!  Three? Tail without end");
        assert_eq!(s, vec!["One.", "Two!", "Three?", "Tail without end"]);
    }

    #[test]
    fn split_single_sentence() {
        assert_eq!(split_sentences("Only one sentence."), vec!["Only one sentence."]);
    }
}
