use std::sync::LazyLock;

use regex::Regex;

static HEADING_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z\s\-:]+$").unwrap());

const MAX_HEADING_CHARS: usize = 50;

/// One titled run of body text within a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: String,
    pub page_number: u32,
}

/// Split a page's text into (heading, body) sections by line heuristics.
///
/// A short line that is all-caps, title-cased, or heading-shaped opens a new
/// section; following non-blank lines accumulate as its body. Lines before
/// the first heading have no section to attach to and are dropped, as is any
/// heading that never collects a body line.
pub fn segment_page(page_text: &str, page_number: u32) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in page_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_heading_candidate(line) {
            flush(&mut sections, current.take(), page_number);
            current = Some((line.to_string(), Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    flush(&mut sections, current, page_number);

    sections
}

fn flush(sections: &mut Vec<Section>, open: Option<(String, Vec<&str>)>, page_number: u32) {
    if let Some((title, body)) = open {
        if !body.is_empty() {
            sections.push(Section {
                title,
                body: body.join("\n"),
                page_number,
            });
        }
    }
}

/// Heading heuristic: short, and either shouting, title-cased, or plain
/// capitalized words. Pure function over the trimmed line.
fn is_heading_candidate(line: &str) -> bool {
    line.chars().count() < MAX_HEADING_CHARS
        && (is_all_caps(line) || is_title_case(line) || HEADING_SHAPE_RE.is_match(line))
}

/// At least one cased character and no lowercase ones.
fn is_all_caps(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Every cased run starts uppercase and continues lowercase.
fn is_title_case(s: &str) -> bool {
    let mut has_cased = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            has_cased = true;
            prev_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            has_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sections_on_one_page() {
        let text = "INTRODUCTION\nThis covers background.\nMore detail here.\nMETHODS\nWe used X.";
        let sections = segment_page(text, 3);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "INTRODUCTION");
        assert_eq!(sections[0].body, "This covers background.\nMore detail here.");
        assert_eq!(sections[0].page_number, 3);
        assert_eq!(sections[1].title, "METHODS");
        assert_eq!(sections[1].body, "We used X.");
        assert_eq!(sections[1].page_number, 3);
    }

    #[test]
    fn no_heading_lines_yields_nothing() {
        let text = "this is a plain paragraph without any heading shape.\nand another one here.";
        assert!(segment_page(text, 1).is_empty());
    }

    #[test]
    fn empty_page() {
        assert!(segment_page("", 1).is_empty());
        assert!(segment_page("\n\n\n", 1).is_empty());
    }

    #[test]
    fn lines_before_first_heading_dropped() {
        let text = "orphan line with no home.\nOVERVIEW\nBody under overview.";
        let sections = segment_page(text, 2);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "OVERVIEW");
        assert_eq!(sections[0].body, "Body under overview.");
    }

    #[test]
    fn bodyless_heading_discarded() {
        // Two headings back to back: only the second gets the body.
        let text = "FIRST\nSECOND\nactual body text follows here.";
        let sections = segment_page(text, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "SECOND");
    }

    #[test]
    fn trailing_heading_without_body_discarded() {
        let text = "INTRO\nsome body content.\nDANGLING HEADING";
        let sections = segment_page(text, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "INTRO");
    }

    #[test]
    fn blank_lines_skipped() {
        let text = "TITLE\n\nfirst body line.\n\nsecond body line.";
        let sections = segment_page(text, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "first body line.\nsecond body line.");
    }

    #[test]
    fn title_cased_heading() {
        let text = "Getting Started\nyou will need a valid account first.";
        let sections = segment_page(text, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Getting Started");
    }

    #[test]
    fn capitalized_heading_with_colon() {
        let text = "Travel tips: packing\nbring layers because evenings get cold.";
        let sections = segment_page(text, 1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Travel tips: packing");
    }

    #[test]
    fn long_line_is_not_a_heading() {
        let long_heading = "A".repeat(60);
        let text = format!("{long_heading}\nbody under the too-long line.");
        assert!(segment_page(&text, 1).is_empty());
    }

    #[test]
    fn idempotent() {
        let text = std::fs::read_to_string("tests/fixtures/trip_page.txt").unwrap();
        let first = segment_page(&text, 7);
        let second = segment_page(&text, 7);
        assert_eq!(first, second);
    }

    #[test]
    fn trip_page_fixture() {
        let text = std::fs::read_to_string("tests/fixtures/trip_page.txt").unwrap();
        let sections = segment_page(&text, 7);
        assert!(sections.len() >= 3);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"COASTAL ADVENTURES"));
        assert!(titles.contains(&"Culinary Experiences"));
        assert!(sections.iter().all(|s| s.page_number == 7));
        assert!(sections.iter().all(|s| !s.body.is_empty()));
    }

    #[test]
    fn heading_shape_rejects_lowercase_start() {
        assert!(!is_heading_candidate("introduction to the area"));
    }

    #[test]
    fn all_caps_needs_a_letter() {
        assert!(!is_all_caps("1234 - 5678"));
        assert!(is_all_caps("PLAN B: 2024"));
    }

    #[test]
    fn title_case_rejects_mid_word_caps() {
        assert!(is_title_case("Coastal Adventures"));
        assert!(!is_title_case("CoAstal Adventures"));
        assert!(!is_title_case("coastal adventures"));
    }
}
