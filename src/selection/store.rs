//! Per-document page selections.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::error::{PdfPickError, Result};
use crate::selection::ranges::{format_ranges, parse_ranges};

/// Ascending, duplicate-free list of 1-indexed pages picked from one document.
///
/// An empty selection means "no explicit choice": the merge takes every page
/// of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct PageSelection {
    pages: Vec<u32>,
}

impl PageSelection {
    /// Selection with no explicit pages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse range text against a document with `page_count` pages.
    ///
    /// ```
    /// use pdfpick::selection::PageSelection;
    ///
    /// let selection = PageSelection::parse("7-9, 1-3, 5", 8);
    /// assert_eq!(selection.pages(), &[1, 2, 3, 5]);
    /// ```
    pub fn parse(text: &str, page_count: u32) -> Self {
        Self {
            pages: parse_ranges(text, page_count),
        }
    }

    /// The selected pages, ascending.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page was picked explicitly.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Compact range text for this selection, e.g. `"1-3, 5"`.
    pub fn to_range_text(&self) -> String {
        format_ranges(&self.pages)
    }
}

impl TryFrom<Vec<u32>> for PageSelection {
    type Error = PdfPickError;

    fn try_from(pages: Vec<u32>) -> Result<Self> {
        if pages.contains(&0) {
            return Err(PdfPickError::invalid_selection(
                "page numbers must be positive (1-indexed)",
            ));
        }

        if let Some(pair) = pages.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PdfPickError::invalid_selection(format!(
                "pages must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { pages })
    }
}

impl From<PageSelection> for Vec<u32> {
    fn from(selection: PageSelection) -> Self {
        selection.pages
    }
}

/// Page selections keyed by document.
///
/// A document without an entry behaves exactly like one with an empty
/// selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selections: HashMap<DocumentId, PageSelection>,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection for `id`. The previous selection is discarded,
    /// not merged.
    pub fn set_selection(&mut self, id: DocumentId, selection: PageSelection) -> &PageSelection {
        match self.selections.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.insert(selection);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(selection),
        }
    }

    /// Explicit selection for `id`.
    ///
    /// Returns `None` both when nothing was stored and when the stored
    /// selection is empty.
    pub fn get_selection(&self, id: &DocumentId) -> Option<&PageSelection> {
        self.selections.get(id).filter(|s| !s.is_empty())
    }

    /// Forget the selection for `id`.
    pub fn remove_document(&mut self, id: &DocumentId) -> Option<PageSelection> {
        self.selections.remove(id)
    }

    /// Pages to take from a document with `page_count` pages.
    ///
    /// Falls back to every page, ascending, when there is no explicit
    /// selection.
    pub fn resolve(&self, id: &DocumentId, page_count: u32) -> Vec<u32> {
        match self.get_selection(id) {
            Some(selection) => selection.pages().to_vec(),
            None => (1..=page_count).collect(),
        }
    }

    /// True when an entry exists for `id`, even an empty one.
    pub fn contains(&self, id: &DocumentId) -> bool {
        self.selections.contains_key(id)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.selections.clear();
    }
}
