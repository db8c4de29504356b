pub mod rank;
pub mod refine;
pub mod segment;
pub mod text;

use std::collections::BTreeMap;

use rank::{RankedSection, RelevanceScorer};
use segment::Section;

use crate::output::SubsectionInsight;

/// Everything the pipeline keeps from one document.
pub struct DocumentAnalysis {
    pub ranked: Vec<RankedSection>,
    pub insights: Vec<SubsectionInsight>,
}

/// Three-pass pipeline per document: pages → sections → ranked top-K → refined insights.
///
/// Sections from all pages are pooled and ranked once per document, not per
/// page, so the top-K competition spans the whole document.
pub fn analyze_document(
    filename: &str,
    pages: &BTreeMap<u32, String>,
    persona: &str,
    task: &str,
    scorer: Option<&dyn RelevanceScorer>,
) -> DocumentAnalysis {
    let sections: Vec<Section> = pages
        .iter()
        .flat_map(|(page_number, text)| segment::segment_page(text, *page_number))
        .collect();
    let ranked = rank::rank(&sections, persona, task, rank::TOP_K, scorer);
    let insights = refine::refine(&ranked, filename, persona, task, refine::MAX_SENTENCES);
    DocumentAnalysis { ranked, insights }
}
