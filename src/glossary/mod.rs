//! Glossary Store
//!
//! Holds the category → term → translation mappings the substitution engine works from.
//! A `Glossary` is built once (from the built-in table, optionally merged with a JSON
//! supplement) and is immutable afterwards; share it behind an `Arc`.
//!
//! # Example
//!
//! ```ignore
//! use medgloss::glossary::{Category, Glossary};
//!
//! let glossary = Glossary::builtin();
//! assert_eq!(glossary.lookup("Diabetes"), Some("السكري"));
//! assert!(glossary.lookup("feverish").is_none());
//!
//! let hits = glossary.search("pain");
//! assert!(hits.iter().all(|e| e.category == Category::Symptom || e.category == Category::Medication));
//! ```

pub mod data;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub use loader::{load_supplement, parse_supplement};

/// Glossary category tag
///
/// The declaration order is the order categories are listed and consulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Disease,
    Symptom,
    Medication,
    Anatomy,
    Procedure,
    /// Everyday clinical vocabulary (patient, doctor, ...)
    General,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Disease,
        Category::Symptom,
        Category::Medication,
        Category::Anatomy,
        Category::Procedure,
        Category::General,
    ];

    /// Machine name, also used as the key in supplement files
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Disease => "disease",
            Category::Symptom => "symptom",
            Category::Medication => "medication",
            Category::Anatomy => "anatomy",
            Category::Procedure => "procedure",
            Category::General => "general",
        }
    }

    /// Heading shown in the dictionary view
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Disease => "الأمراض",
            Category::Symptom => "الأعراض",
            Category::Medication => "الأدوية",
            Category::Anatomy => "التشريح",
            Category::Procedure => "الإجراءات",
            Category::General => "مصطلحات عامة",
        }
    }

    /// Parse a category key; plural forms ("diseases") are accepted too
    pub fn parse(key: &str) -> Option<Category> {
        let key = key.trim().to_lowercase();
        Category::ALL.into_iter().find(|c| {
            let name = c.as_str();
            key == name || key.strip_suffix('s') == Some(name)
        })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One glossary mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// English term, lowercase ASCII
    pub source_term: String,
    /// Arabic translation
    pub target_term: String,
    pub category: Category,
}

impl GlossaryEntry {
    pub fn new(source_term: &str, target_term: &str, category: Category) -> Self {
        Self {
            source_term: source_term.to_string(),
            target_term: target_term.to_string(),
            category,
        }
    }
}

/// Error raised when glossary data violates its invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlossaryError {
    /// Source term is not lowercase ASCII or does not start and end with a letter or digit
    InvalidSourceTerm(String),
    /// Target term is empty
    EmptyTarget(String),
    /// Same source term twice in one category
    DuplicateTerm { category: Category, term: String },
    /// Supplement file names a category that does not exist
    UnknownCategory(String),
    /// Supplement file could not be read or parsed
    Load(String),
}

impl std::fmt::Display for GlossaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlossaryError::InvalidSourceTerm(term) => {
                write!(f, "Invalid source term '{}': expected lowercase ASCII", term)
            }
            GlossaryError::EmptyTarget(term) => {
                write!(f, "Empty translation for source term '{}'", term)
            }
            GlossaryError::DuplicateTerm { category, term } => {
                write!(f, "Duplicate term '{}' in category {}", term, category)
            }
            GlossaryError::UnknownCategory(name) => write!(f, "Unknown category '{}'", name),
            GlossaryError::Load(msg) => write!(f, "Glossary load error: {}", msg),
        }
    }
}

impl std::error::Error for GlossaryError {}

/// Immutable glossary, grouped by category with insertion order preserved
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    // lowercase source term -> index of the first entry in category order
    index: HashMap<String, usize>,
}

impl Glossary {
    /// The built-in medical glossary.
    pub fn builtin() -> Self {
        let entries = Category::ALL
            .into_iter()
            .flat_map(|category| {
                data::table(category)
                    .iter()
                    .map(move |(source, target)| GlossaryEntry::new(source, target, category))
            })
            .collect::<Vec<_>>();

        // The static table is covered by tests; rebuilding it cannot fail.
        Self::from_entries(entries).unwrap_or_default()
    }

    /// Build a glossary from arbitrary entries, validating every invariant
    ///
    /// Entries are regrouped by category (stable, so table order inside a category
    /// is kept).
    ///
    /// # Errors
    ///
    /// Returns `GlossaryError` on the first entry that is malformed or duplicated
    /// within its category.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Result<Self, GlossaryError> {
        let mut entries = entries;
        entries.sort_by_key(|e| e.category);

        let mut seen: HashSet<(Category, String)> = HashSet::new();
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            validate_entry(entry)?;
            let key = entry.source_term.to_lowercase();
            if !seen.insert((entry.category, key.clone())) {
                return Err(GlossaryError::DuplicateTerm {
                    category: entry.category,
                    term: entry.source_term.clone(),
                });
            }
            index.entry(key).or_insert(i);
        }

        Ok(Self { entries, index })
    }

    /// Return a new glossary with `extra` appended to the current entries.
    pub fn merged_with(&self, extra: Vec<GlossaryEntry>) -> Result<Self, GlossaryError> {
        let mut entries = self.entries.clone();
        entries.extend(extra);
        Self::from_entries(entries)
    }

    /// Case-insensitive exact lookup of a source term
    pub fn lookup(&self, term: &str) -> Option<&str> {
        self.index
            .get(&term.trim().to_lowercase())
            .map(|&i| self.entries[i].target_term.as_str())
    }

    /// Entries whose source term contains `query` (case-insensitive) or whose
    /// target term contains it verbatim
    pub fn search(&self, query: &str) -> Vec<&GlossaryEntry> {
        let lowered = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.source_term.contains(&lowered) || e.target_term.contains(query))
            .collect()
    }

    /// Every entry, grouped by category in category order
    pub fn all_entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Entries grouped per category; categories without entries are skipped
    pub fn by_category(&self) -> Vec<(Category, Vec<&GlossaryEntry>)> {
        group(self.entries.iter())
    }

    /// Like `search`, grouped for display
    pub fn search_grouped(&self, query: &str) -> Vec<(Category, Vec<&GlossaryEntry>)> {
        group(self.search(query).into_iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn group<'a>(
    entries: impl Iterator<Item = &'a GlossaryEntry>,
) -> Vec<(Category, Vec<&'a GlossaryEntry>)> {
    let mut groups: Vec<(Category, Vec<&GlossaryEntry>)> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some((category, list)) if *category == entry.category => list.push(entry),
            _ => groups.push((entry.category, vec![entry])),
        }
    }
    groups
}

fn validate_entry(entry: &GlossaryEntry) -> Result<(), GlossaryError> {
    let term = entry.source_term.as_str();
    let well_formed = term.is_ascii()
        && !term.chars().any(|c| c.is_ascii_uppercase())
        && term.chars().next().is_some_and(|c| c.is_ascii_alphanumeric())
        && term.chars().last().is_some_and(|c| c.is_ascii_alphanumeric());
    if !well_formed {
        return Err(GlossaryError::InvalidSourceTerm(term.to_string()));
    }
    if entry.target_term.trim().is_empty() {
        return Err(GlossaryError::EmptyTarget(term.to_string()));
    }
    Ok(())
}
