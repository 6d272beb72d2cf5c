//! Format records and the immutable registry that holds them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Metadata for one registered content format.
///
/// The format code itself is the registry key and is not repeated here,
/// which keeps the serialized form identical to the PRONOM JSON export:
/// `{ "fmt/17": { "file_format": ..., "version": ..., "file_extensions": [...] } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRecord {
    /// Human-readable format name.
    #[serde(rename = "file_format", alias = "format_name")]
    pub format_name: String,

    /// Format version, possibly empty.
    #[serde(default)]
    pub version: String,

    /// Registered extensions, lowercase, in preference order.
    ///
    /// The first entry is the default used in automatic mode.
    #[serde(
        rename = "file_extensions",
        alias = "extensions",
        default,
        deserialize_with = "deserialize_extensions"
    )]
    pub extensions: Vec<String>,
}

fn deserialize_extensions<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|e| normalize_extension(e)).collect())
}

impl FormatRecord {
    /// Create a record, normalizing extensions to lowercase.
    pub fn new(
        format_name: impl Into<String>,
        version: impl Into<String>,
        extensions: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            format_name: format_name.into(),
            version: version.into(),
            extensions: extensions
                .into_iter()
                .filter_map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    /// The default (automatic mode) extension, if any.
    pub fn default_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// Case-insensitive membership test.
    pub fn has_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }

    /// Name with version appended when one is present.
    pub fn display_name(&self) -> String {
        if self.version.is_empty() {
            self.format_name.clone()
        } else {
            format!("{} {}", self.format_name, self.version)
        }
    }
}

/// Trim, strip a leading dot and lowercase an extension.
///
/// Returns `None` for extensions that are empty after trimming.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Immutable mapping from format code to [`FormatRecord`].
///
/// Built once per run and passed by reference into the resolution engine.
/// Empty format codes are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    records: BTreeMap<String, FormatRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record for the same code.
    ///
    /// Returns the replaced record. Records with an empty code are rejected
    /// and handed back as `Err`.
    pub fn insert(
        &mut self,
        format_code: &str,
        record: FormatRecord,
    ) -> std::result::Result<Option<FormatRecord>, FormatRecord> {
        let code = format_code.trim();
        if code.is_empty() {
            return Err(record);
        }
        Ok(self.records.insert(code.to_string(), record))
    }

    /// Look up a format code.
    pub fn get(&self, format_code: &str) -> Option<&FormatRecord> {
        self.records.get(format_code)
    }

    /// Check whether a code is registered.
    pub fn contains(&self, format_code: &str) -> bool {
        self.records.contains_key(format_code)
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry has no formats.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over `(code, record)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormatRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop entries whose key is blank.
    ///
    /// Deserialized registries may contain an empty key (the JSON exporter
    /// writes formats without a PUID under `""`); those can never match an
    /// identification result.
    pub(crate) fn discard_blank_codes(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|code, _| !code.trim().is_empty());
        before - self.records.len()
    }
}

impl FromIterator<(String, FormatRecord)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, FormatRecord)>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for (code, record) in iter {
            let _ = registry.insert(&code, record);
        }
        registry
    }
}
