//! Anchor cross-reference resolution
//!
//! Coded clinical statements and their human-readable narrative live in
//! separate document regions, linked only by internal identifier strings: a
//! coded `entry` points at a narrative table row through
//! `text/reference[@value="#problem-1"]`, and the row's cells carry a
//! `content` fragment whose own ID is the row id plus a fixed suffix. The
//! join is modeled as an index built once per document instead of a fresh
//! tree search per row.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::xml::Element;

/// Suffix binding a narrative row to its description fragment.
const PROBLEM_FRAGMENT_SUFFIX: &str = "-problem";

static ROW_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^problem-\d+$").unwrap());

/// True when a narrative table row id follows the `problem-<n>` convention.
///
/// Rows with foreign or malformed ids never produce diagnosis records.
pub fn is_problem_row_id(id: &str) -> bool {
    ROW_ID.is_match(id)
}

/// Index from narrative anchor id to the coded `entry` referencing it.
pub struct AnchorIndex<'a> {
    coded_entries: HashMap<&'a str, &'a Element>,
}

impl<'a> AnchorIndex<'a> {
    /// Walk the document once, recording every `entry` whose `text` holds a
    /// `<reference value="#id"/>` pointer. The first entry referencing an id
    /// wins; later duplicates are ignored.
    pub fn build(root: &'a Element) -> Self {
        let mut coded_entries = HashMap::new();
        for entry in root.find_all("entry") {
            for text in entry.find_all("text") {
                for reference in text.children("reference") {
                    let Some(target) = reference
                        .attr("value")
                        .and_then(|v| v.strip_prefix('#'))
                    else {
                        continue;
                    };
                    coded_entries.entry(target).or_insert(entry);
                }
            }
        }
        Self { coded_entries }
    }

    /// The coded entry pointing at the given row id, if any.
    pub fn coded_entry(&self, row_id: &str) -> Option<&'a Element> {
        self.coded_entries.get(row_id).copied()
    }

    /// Resolve a narrative row to its (coded entry, narrative fragment)
    /// pair. Either half may be absent independently; the caller decides
    /// which halves it needs.
    pub fn resolve(
        &self,
        row: &'a Element,
        row_id: &str,
    ) -> (Option<&'a Element>, Option<&'a Element>) {
        (self.coded_entry(row_id), narrative_fragment(row, row_id))
    }
}

/// The `content` fragment inside a row whose ID derives from the row id.
pub fn narrative_fragment<'a>(row: &'a Element, row_id: &str) -> Option<&'a Element> {
    let fragment_id = format!("{row_id}{PROBLEM_FRAGMENT_SUFFIX}");
    row.find_all("content")
        .find(|c| c.attr("ID") == Some(fragment_id.as_str()))
}
