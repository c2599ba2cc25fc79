/*!
 * Vocabulary content store.
 *
 * Content is a static JSON document whose top level maps a category name to
 * a list of lexical items:
 *
 * ```json
 * {
 *   "greetings": [
 *     { "ar": "مرحبا", "chat": "marhaba", "eng": "hello", "alternates": ["أهلا"] }
 *   ]
 * }
 * ```
 *
 * Fields other than `ar`, `chat`, `eng`, `alternates` and `gender` (verb
 * conjugations, possessive forms, ...) are kept verbatim in `extra`.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::ContentError;
use crate::matching::{normalize, ArabicText};

/// One vocabulary or phrase entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalItem {
    /// Arabic script form
    pub ar: String,

    /// Arabizi transliteration
    #[serde(default)]
    pub chat: String,

    /// English gloss
    #[serde(default)]
    pub eng: String,

    /// Spellings accepted as equally correct
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<String>,

    /// Grammatical gender, when the content provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Morphological fields not used for matching
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl LexicalItem {
    /// Create an item with only the three display fields
    pub fn new(ar: &str, chat: &str, eng: &str) -> Self {
        Self {
            ar: ar.to_string(),
            chat: chat.to_string(),
            eng: eng.to_string(),
            alternates: Vec::new(),
            gender: None,
            extra: BTreeMap::new(),
        }
    }

    /// Add accepted alternate spellings
    pub fn with_alternates<I, S>(mut self, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternates.extend(alternates.into_iter().map(Into::into));
        self
    }
}

impl ArabicText for LexicalItem {
    fn ar(&self) -> &str {
        &self.ar
    }

    fn alternates(&self) -> &[String] {
        &self.alternates
    }
}

/// Immutable, categorized collection of lexical items
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    categories: BTreeMap<String, Vec<LexicalItem>>,
}

impl ContentStore {
    /// Load content from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ContentError::Io(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_json(&json)?;
        info!(
            "Loaded {} items in {} categories from {:?}",
            store.len(),
            store.categories.len(),
            path
        );
        Ok(store)
    }

    /// Parse content from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let categories: BTreeMap<String, Vec<LexicalItem>> =
            serde_json::from_str(json).map_err(|e| ContentError::Parse(e.to_string()))?;

        Self::from_categories(categories)
    }

    /// Build a store from already-parsed categories
    ///
    /// Every item must have a non-empty Arabic form once normalized.
    pub fn from_categories(categories: BTreeMap<String, Vec<LexicalItem>>) -> Result<Self, ContentError> {
        for (category, items) in &categories {
            if items.is_empty() {
                warn!("Category '{}' has no items", category);
            }

            if let Some(index) = items.iter().position(|item| normalize(&item.ar).is_empty()) {
                return Err(ContentError::MissingArabic {
                    category: category.clone(),
                    index,
                });
            }

            debug!("Category '{}': {} items", category, items.len());
        }

        Ok(Self { categories })
    }

    /// Category names in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Items of one category
    pub fn items(&self, category: &str) -> Result<&[LexicalItem], ContentError> {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| ContentError::UnknownCategory(category.to_string()))
    }

    /// Every item across all categories
    pub fn all_items(&self) -> impl Iterator<Item = &LexicalItem> {
        self.categories.values().flatten()
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first item whose Arabic form normalizes like `text`
    pub fn find_by_arabic(&self, text: &str) -> Option<&LexicalItem> {
        let wanted = normalize(text);
        if wanted.is_empty() {
            return None;
        }
        self.all_items().find(|item| normalize(&item.ar) == wanted)
    }
}
