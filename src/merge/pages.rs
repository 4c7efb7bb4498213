//! Copying pages between documents.
//!
//! A page is copied together with everything it references (content
//! streams, fonts, images, annotations) under fresh object ids in the target
//! document. The source page tree itself is never copied: inheritable
//! attributes are written onto the page and `Parent` links of page-tree nodes
//! are dropped, so unselected pages do not ride along.

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

use crate::engine::EngineError;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Copies pages from one source document into a target document.
///
/// Objects shared by several copied pages, such as a font, are copied once
/// per copier.
pub struct PageCopier<'a> {
    source: &'a Document,
    target: &'a mut Document,
    mapped: HashMap<ObjectId, ObjectId>,
}

impl<'a> PageCopier<'a> {
    /// Create a copier from `source` into `target`.
    pub fn new(source: &'a Document, target: &'a mut Document) -> Self {
        Self {
            source,
            target,
            mapped: HashMap::new(),
        }
    }

    /// Copy the pages at the given zero-based indices, in order.
    ///
    /// Returns the ids of the copies in the target. The copies are not yet
    /// part of the target's page tree.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is out of range or a page object is not
    /// a dictionary. Nothing is returned for the indices before the failing
    /// one.
    pub fn copy_pages(&mut self, indices: &[usize]) -> Result<Vec<ObjectId>, EngineError> {
        let page_ids: Vec<ObjectId> = self.source.get_pages().into_values().collect();

        let mut requested = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = page_ids.get(index).copied().ok_or_else(|| {
                EngineError::new(format!(
                    "page index {index} out of range (document has {} pages)",
                    page_ids.len()
                ))
            })?;
            requested.push(page_id);
        }

        requested
            .into_iter()
            .map(|page_id| self.copy_page(page_id))
            .collect()
    }

    /// Copy a single page object.
    fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId, EngineError> {
        let mut page = self
            .source
            .get_dictionary(page_id)
            .map_err(|e| EngineError::new(format!("Failed to read page {page_id:?}: {e}")))?
            .clone();

        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Some(value) = self.inherited_attribute(&page, key)
            {
                page.set(key.to_vec(), value);
            }
        }
        page.remove(b"Parent");

        // The same page requested twice still yields two distinct page
        // objects, otherwise the page tree would list one object twice.
        let new_id = self.target.new_object_id();
        self.mapped.entry(page_id).or_insert(new_id);

        let copied = self.copy_dictionary(&page);
        self.target.objects.insert(new_id, Object::Dictionary(copied));

        Ok(new_id)
    }

    /// Look up an inheritable attribute on the ancestors of `page`.
    fn inherited_attribute(&self, page: &Dictionary, key: &[u8]) -> Option<Object> {
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

        for _ in 0..MAX_TREE_DEPTH {
            let node = self.source.get_dictionary(parent?).ok()?;
            if let Ok(value) = node.get(key) {
                return Some(value.clone());
            }
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        None
    }

    /// Deep-copy an object, remapping every reference into the target.
    fn copy_object(&mut self, object: &Object) -> Object {
        match object {
            Object::Reference(id) => Object::Reference(self.copy_reference(*id)),
            Object::Array(items) => {
                Object::Array(items.iter().map(|item| self.copy_object(item)).collect())
            }
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)),
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.copy_dictionary(&stream.dict);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, dict: &Dictionary) -> Dictionary {
        let skip_parent = is_page_tree_node(dict);

        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            if skip_parent && key.as_slice() == b"Parent" {
                continue;
            }
            copied.set(key.clone(), self.copy_object(value));
        }
        copied
    }

    /// Copy a referenced object once and return its id in the target.
    fn copy_reference(&mut self, id: ObjectId) -> ObjectId {
        if let Some(&mapped) = self.mapped.get(&id) {
            return mapped;
        }

        let new_id = self.target.new_object_id();
        self.mapped.insert(id, new_id);

        // Dangling references become null, as readers treat them anyway.
        let copied = match self.source.get_object(id) {
            Ok(object) => self.copy_object(object),
            Err(_) => Object::Null,
        };
        self.target.objects.insert(new_id, copied);

        new_id
    }
}

/// True for `/Type /Page` and `/Type /Pages` dictionaries.
fn is_page_tree_node(dict: &Dictionary) -> bool {
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Page") | Ok(b"Pages")
    )
}
