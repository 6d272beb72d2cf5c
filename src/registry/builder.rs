//! Registry construction from a PRONOM XML export.
//!
//! Each document in the corpus describes one format (`FileFormat`) with its
//! identifiers and external signatures. Element tags are matched by local
//! name, so `<pronom:FormatName>` and `<FormatName>` read the same.
//!
//! A malformed document only fails itself: it is recorded in the
//! [`BuildReport`] and the scan continues.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{AddextError, Result};

use super::record::{FormatRecord, Registry};

/// Identifier type that carries the format code.
pub const PUID_IDENTIFIER_TYPE: &str = "PUID";

/// Signature type for file extension signatures.
pub const EXTENSION_SIGNATURE_TYPE: &str = "File extension";

/// A format parsed out of one document, before it enters the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormat {
    /// PUID, or empty when the document declares none.
    pub format_code: String,
    /// Record to store under the code.
    pub record: FormatRecord,
}

/// A document that could not be turned into a format record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a corpus build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// The registry assembled from every readable document.
    pub registry: Registry,
    /// XML documents parsed successfully.
    pub documents_read: usize,
    /// Formats discarded because they have no PUID.
    pub records_without_code: usize,
    /// Formats that replaced an earlier record with the same PUID.
    pub duplicates: usize,
    /// Documents that failed to parse.
    pub skipped: Vec<SkippedDocument>,
}

impl BuildReport {
    fn add(&mut self, parsed: ParsedFormat, path: &Path) {
        match self.registry.insert(&parsed.format_code, parsed.record) {
            Ok(Some(_)) => {
                tracing::warn!(
                    "Duplicate format code {} in {}; keeping the later record",
                    parsed.format_code,
                    path.display()
                );
                self.duplicates += 1;
            }
            Ok(None) => {}
            Err(record) => {
                tracing::debug!(
                    "No PUID for '{}' in {}; not matchable",
                    record.format_name,
                    path.display()
                );
                self.records_without_code += 1;
            }
        }
    }

    fn skip(&mut self, path: PathBuf, reason: String) {
        tracing::warn!("Skipping {}: {}", path.display(), reason);
        self.skipped.push(SkippedDocument { path, reason });
    }
}

/// Builds a [`Registry`] from a directory of format-definition documents.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    corpus: PathBuf,
}

impl RegistryBuilder {
    /// Create a builder for the given corpus directory.
    pub fn new(corpus: impl Into<PathBuf>) -> Self {
        Self {
            corpus: corpus.into(),
        }
    }

    /// Get the corpus directory.
    pub fn corpus(&self) -> &Path {
        &self.corpus
    }

    /// Walk the corpus and build the registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryNotFound` if the corpus is not a directory and
    /// `EmptyCorpus` if no document yields a matchable record. Individual
    /// bad documents are reported in [`BuildReport::skipped`] instead.
    pub fn build(&self) -> Result<BuildReport> {
        if !self.corpus.is_dir() {
            return Err(AddextError::RegistryNotFound {
                path: self.corpus.clone(),
            });
        }

        let mut report = BuildReport::default();

        for entry in WalkDir::new(&self.corpus).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(&self.corpus).to_path_buf();
                    report.skip(path, e.to_string());
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_xml(path) {
                continue;
            }

            match read_document(path) {
                Ok(formats) => {
                    report.documents_read += 1;
                    for parsed in formats {
                        report.add(parsed, path);
                    }
                }
                Err(AddextError::DocumentError { path, message }) => report.skip(path, message),
                Err(e) => report.skip(path.to_path_buf(), e.to_string()),
            }
        }

        if report.registry.is_empty() {
            let message = if report.documents_read == 0 && report.skipped.is_empty() {
                "no XML documents found".to_string()
            } else {
                format!(
                    "{} read, {} skipped, none with a PUID",
                    report.documents_read,
                    report.skipped.len()
                )
            };
            return Err(AddextError::EmptyCorpus {
                path: self.corpus.clone(),
                message,
            });
        }

        tracing::info!(
            "Built registry from {}: {} formats, {} documents skipped",
            self.corpus.display(),
            report.registry.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("xml"))
        .unwrap_or(false)
}

/// Read and parse a single document from disk.
pub fn read_document(path: &Path) -> Result<Vec<ParsedFormat>> {
    let content = fs::read_to_string(path)?;
    parse_document(&content).map_err(|message| AddextError::DocumentError {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse the formats described by one XML document.
///
/// Every `FileFormat` element becomes one [`ParsedFormat`].
pub fn parse_document(xml: &str) -> std::result::Result<Vec<ParsedFormat>, String> {
    let root = parse_tree(xml)?;

    let mut format_nodes = Vec::new();
    root.collect("FileFormat", &mut format_nodes);
    if format_nodes.is_empty() {
        return Err("no FileFormat element".to_string());
    }

    format_nodes.into_iter().map(parse_format).collect()
}

/// Only identifiers typed `PUID` and signatures typed `File extension` need
/// a value element. When a format lists several PUIDs the last one is kept.
fn parse_format(node: &Node) -> std::result::Result<ParsedFormat, String> {
    let format_name = node.required_text("FormatName")?.to_string();
    let version = node.required_text("FormatVersion")?.trim().to_string();

    let mut identifiers = Vec::new();
    node.collect("FileFormatIdentifier", &mut identifiers);
    let mut format_code = String::new();
    for identifier in identifiers {
        let id_type = identifier.required_text("IdentifierType")?;
        if id_type.trim() == PUID_IDENTIFIER_TYPE {
            format_code = identifier.required_text("Identifier")?.trim().to_string();
        }
    }

    let mut signatures = Vec::new();
    node.collect("ExternalSignature", &mut signatures);
    let mut extensions = Vec::new();
    for signature in signatures {
        let sig_type = signature.required_text("SignatureType")?;
        if sig_type.trim() == EXTENSION_SIGNATURE_TYPE {
            extensions.push(signature.required_text("Signature")?);
        }
    }

    Ok(ParsedFormat {
        format_code,
        record: FormatRecord::new(format_name, version, extensions),
    })
}

/// Minimal element tree with namespace prefixes removed.
#[derive(Debug, Default)]
struct Node {
    name: String,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn required_text(&self, name: &str) -> std::result::Result<&str, String> {
        self.child(name)
            .map(|c| c.text.as_str())
            .ok_or_else(|| format!("{} is missing {}", self.name, name))
    }

    /// Collect this node and all descendants with the given name, in
    /// document order.
    fn collect<'a>(&'a self, name: &str, out: &mut Vec<&'a Node>) {
        if self.name == name {
            out.push(self);
        }
        for child in &self.children {
            child.collect(name, out);
        }
    }
}

fn local_name(raw: &[u8]) -> std::result::Result<String, String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| format!("invalid tag name: {e}"))
}

fn parse_tree(xml: &str) -> std::result::Result<Node, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = vec![Node {
        name: String::new(),
        ..Node::default()
    }];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(Node {
                    name: local_name(e.local_name().as_ref())?,
                    ..Node::default()
                });
            }
            Ok(Event::Empty(e)) => {
                let node = Node {
                    name: local_name(e.local_name().as_ref())?,
                    ..Node::default()
                };
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| format!("invalid text content: {e}"))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err("unbalanced closing tag".to_string());
                }
                if let Some(node) = stack.pop() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                ));
            }
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err("unexpected end of document".to_string());
    }
    stack.pop().ok_or_else(|| "empty document".to_string())
}
