use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

/// Digest written once per collection, then discarded.
#[derive(Debug, Serialize)]
pub struct CollectionDigest {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionInsight>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub page_number: u32,
    pub importance_rank: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubsectionInsight {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

pub fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

pub fn write_digest(path: &Path, digest: &CollectionDigest) -> Result<()> {
    let json = serde_json::to_string_pretty(digest)?;
    fs::write(path, json)?;
    Ok(())
}
