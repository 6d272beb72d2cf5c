//! Registry source selection.
//!
//! A registry comes either from a pre-built JSON file or from a PRONOM XML
//! export directory that is built on the fly. Both produce the same
//! [`Registry`].

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::builder::{BuildReport, RegistryBuilder};
use super::record::Registry;
use super::store::load_registry;

/// Default registry file name, looked up beside the executable.
pub const DEFAULT_REGISTRY_FILE: &str = "pronom.json";

/// Where a registry is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// A serialized registry file.
    File(PathBuf),
    /// A directory of format-definition documents.
    Corpus(PathBuf),
}

/// A loaded registry together with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    pub registry: Registry,
    /// Build statistics when the registry came from a corpus.
    pub build: Option<BuildReport>,
}

impl RegistrySource {
    /// Classify a path: directories are corpora, anything else a file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Corpus(path)
        } else {
            Self::File(path)
        }
    }

    /// The default source: `pronom.json` next to the running binary.
    pub fn default_location() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::File(dir.join(DEFAULT_REGISTRY_FILE))
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        match self {
            Self::File(p) | Self::Corpus(p) => p,
        }
    }

    /// Load the registry.
    pub fn load(&self) -> Result<LoadedRegistry> {
        match self {
            Self::File(path) => Ok(LoadedRegistry {
                registry: load_registry(path)?,
                build: None,
            }),
            Self::Corpus(path) => {
                let mut report = RegistryBuilder::new(path).build()?;
                let registry = std::mem::take(&mut report.registry);
                Ok(LoadedRegistry {
                    registry,
                    build: Some(report),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{save_registry, FormatRecord};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn from_path_detects_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            RegistrySource::from_path(temp.path()),
            RegistrySource::Corpus(temp.path().to_path_buf())
        );
        let file = temp.path().join("pronom.json");
        assert_eq!(
            RegistrySource::from_path(&file),
            RegistrySource::File(file.clone())
        );
    }

    #[test]
    fn default_location_uses_registry_file_name() {
        let source = RegistrySource::default_location();
        assert!(source.path().ends_with(DEFAULT_REGISTRY_FILE));
    }

    #[test]
    fn file_and_corpus_yield_same_registry() {
        let temp = TempDir::new().unwrap();
        let corpus = temp.path().join("export");
        fs::create_dir_all(&corpus).unwrap();
        fs::write(
            corpus.join("fmt-17.xml"),
            r#"<PRONOM-Report><FileFormat>
                <FormatName>Acrobat PDF 1.3 - Portable Document Format</FormatName>
                <FormatVersion>1.3</FormatVersion>
                <FileFormatIdentifier><Identifier>fmt/17</Identifier><IdentifierType>PUID</IdentifierType></FileFormatIdentifier>
                <ExternalSignature><Signature>pdf</Signature><SignatureType>File extension</SignatureType></ExternalSignature>
            </FileFormat></PRONOM-Report>"#,
        )
        .unwrap();

        let from_corpus = RegistrySource::from_path(&corpus).load().unwrap();
        assert!(from_corpus.build.is_some());

        let json = temp.path().join("pronom.json");
        save_registry(&from_corpus.registry, &json).unwrap();
        let from_file = RegistrySource::from_path(&json).load().unwrap();
        assert!(from_file.build.is_none());

        assert_eq!(from_corpus.registry, from_file.registry);
        assert_eq!(
            from_file.registry.get("fmt/17"),
            Some(&FormatRecord::new(
                "Acrobat PDF 1.3 - Portable Document Format",
                "1.3",
                ["pdf"]
            ))
        );
    }
}
