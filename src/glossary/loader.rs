use super::{Category, GlossaryEntry, GlossaryError};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load supplementary glossary entries from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "symptom": { "wheezing": "أزيز" },
///     "medications": { "metformin": "ميتفورمين" }
/// }
/// ```
///
/// Category keys accept singular or plural forms.
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Returns
/// The entries in file order, ready to be merged into a `Glossary`
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON, or a root that is not an object
/// - Unknown category, or a translation that is not a string
pub fn load_supplement(path: &Path) -> Result<Vec<GlossaryEntry>, GlossaryError> {
    let content = fs::read_to_string(path).map_err(|e| {
        GlossaryError::Load(format!("Failed to read file '{}': {}", path.display(), e))
    })?;

    parse_supplement(&content).map_err(|e| match e {
        GlossaryError::Load(msg) => GlossaryError::Load(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse supplement JSON already held in memory. See [`load_supplement`].
pub fn parse_supplement(content: &str) -> Result<Vec<GlossaryEntry>, GlossaryError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| GlossaryError::Load(format!("Failed to parse JSON: {}", e)))?;

    let obj = json
        .as_object()
        .ok_or_else(|| GlossaryError::Load("root must be an object".to_string()))?;

    let mut entries = Vec::new();
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }

        let category =
            Category::parse(key).ok_or_else(|| GlossaryError::UnknownCategory(key.clone()))?;

        let terms = value.as_object().ok_or_else(|| {
            GlossaryError::Load(format!("category '{}' must map terms to strings", key))
        })?;

        for (source, target) in terms {
            let target = target.as_str().ok_or_else(|| {
                GlossaryError::Load(format!("translation of '{}' is not a string", source))
            })?;
            entries.push(GlossaryEntry::new(source, target, category));
        }
    }

    tracing::debug!(count = entries.len(), "parsed glossary supplement");
    Ok(entries)
}
