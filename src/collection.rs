use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::analyzer;
use crate::analyzer::rank::RelevanceScorer;
use crate::extract;
use crate::input::{self, CollectionInput};
use crate::output::{self, CollectionDigest, ExtractedSection, Metadata, SubsectionInsight};

const INPUT_FILE: &str = "challenge1b_input.json";
const OUTPUT_FILE: &str = "challenge1b_output.json";
const PDF_DIR: &str = "PDFs";
const COLLECTION_PREFIX: &str = "Collection_";

pub struct CollectionCounts {
    pub documents: usize,
    pub skipped: usize,
    pub sections: usize,
    pub insights: usize,
}

impl CollectionCounts {
    pub fn print(&self) {
        println!(
            "Processed {} documents ({} skipped): {} sections, {} insights.",
            self.documents, self.skipped, self.sections, self.insights,
        );
    }
}

/// Directories under `root` following the `Collection_*` naming convention,
/// sorted for a deterministic iteration order.
pub fn find_collections(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_name().to_string_lossy().starts_with(COLLECTION_PREFIX) {
            continue;
        }
        let path = entry.path();
        if !path.is_dir() {
            warn!("{} is not a directory, skipping", path.display());
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

/// Process one collection end to end: read the input descriptor, analyze each
/// document sequentially, aggregate, write the digest.
///
/// Every per-document failure is a logged skip; a missing or malformed
/// descriptor skips the whole collection. Nothing here aborts the batch.
pub fn process_collection(
    dir: &Path,
    scorer: Option<&dyn RelevanceScorer>,
) -> Result<CollectionCounts> {
    let Some(input) = input::load_input(&dir.join(INPUT_FILE)) else {
        warn!("no usable input descriptor in {}, skipping", dir.display());
        return Ok(CollectionCounts {
            documents: 0,
            skipped: 0,
            sections: 0,
            insights: 0,
        });
    };

    let (digest, counts) = analyze_collection(&input, &dir.join(PDF_DIR), scorer);

    let out_path = dir.join(OUTPUT_FILE);
    match output::write_digest(&out_path, &digest) {
        Ok(()) => info!("output saved to {}", out_path.display()),
        Err(e) => warn!("failed to write {}: {}", out_path.display(), e),
    }

    Ok(counts)
}

/// Build the digest for one collection. Pure over the filesystem reads: owns
/// its accumulators, no state crosses document boundaries.
fn analyze_collection(
    input: &CollectionInput,
    pdf_dir: &Path,
    scorer: Option<&dyn RelevanceScorer>,
) -> (CollectionDigest, CollectionCounts) {
    let persona = &input.persona.role;
    let task = &input.job_to_be_done.task;

    let pb = ProgressBar::new(input.documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    let mut extracted_sections: Vec<ExtractedSection> = Vec::new();
    let mut subsection_analysis: Vec<SubsectionInsight> = Vec::new();
    let mut skipped = 0usize;

    for doc in &input.documents {
        pb.set_message(doc.filename.clone());
        let pdf_path = pdf_dir.join(&doc.filename);
        if !pdf_path.exists() {
            warn!("{} not found, skipping", pdf_path.display());
            skipped += 1;
            pb.inc(1);
            continue;
        }
        let pages = extract::extract_pages(&pdf_path);
        if pages.is_empty() {
            warn!("no text extracted from {}, skipping", pdf_path.display());
            skipped += 1;
            pb.inc(1);
            continue;
        }

        let analysis = analyzer::analyze_document(&doc.filename, &pages, persona, task, scorer);
        for rs in &analysis.ranked {
            extracted_sections.push(ExtractedSection {
                document: doc.filename.clone(),
                section_title: rs.section.title.clone(),
                page_number: rs.section.page_number,
                importance_rank: rs.rank,
            });
        }
        subsection_analysis.extend(analysis.insights);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let counts = CollectionCounts {
        documents: input.documents.len() - skipped,
        skipped,
        sections: extracted_sections.len(),
        insights: subsection_analysis.len(),
    };

    let digest = CollectionDigest {
        metadata: Metadata {
            input_documents: input.documents.iter().map(|d| d.filename.clone()).collect(),
            persona: persona.clone(),
            job_to_be_done: task.clone(),
            processing_timestamp: output::timestamp(),
        },
        extracted_sections,
        subsection_analysis,
    };

    (digest, counts)
}
