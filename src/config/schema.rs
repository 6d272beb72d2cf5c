//! Settings file schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Contents of an addext settings file.
///
/// Every key is optional; command-line flags win over these values.
///
/// ```yaml
/// registry: /opt/pronom/pronom.json
/// sf: /usr/local/bin/sf
/// log_file: /var/log/addext.log
/// namespace: pronom
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddextConfig {
    /// Registry JSON file or PRONOM XML export directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,

    /// Siegfried binary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sf: Option<String>,

    /// Run log location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Identification namespace whose matches carry format codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl AddextConfig {
    /// Layer `other` on top of `self`; keys set in `other` win.
    pub fn overlay(self, other: AddextConfig) -> AddextConfig {
        AddextConfig {
            registry: other.registry.or(self.registry),
            sf: other.sf.or(self.sf),
            log_file: other.log_file.or(self.log_file),
            namespace: other.namespace.or(self.namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let config: AddextConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AddextConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let yaml = r#"
registry: /opt/pronom/pronom.json
sf: /usr/local/bin/sf
log_file: run.log
namespace: pronom
"#;
        let config: AddextConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.registry, Some(PathBuf::from("/opt/pronom/pronom.json")));
        assert_eq!(config.sf.as_deref(), Some("/usr/local/bin/sf"));
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(config.namespace.as_deref(), Some("pronom"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<AddextConfig>("regsitry: x").is_err());
    }

    #[test]
    fn overlay_prefers_upper_layer() {
        let user = AddextConfig {
            registry: Some(PathBuf::from("user.json")),
            sf: Some("sf".to_string()),
            ..Default::default()
        };
        let project = AddextConfig {
            registry: Some(PathBuf::from("project.json")),
            ..Default::default()
        };
        let merged = user.overlay(project);
        assert_eq!(merged.registry, Some(PathBuf::from("project.json")));
        assert_eq!(merged.sf.as_deref(), Some("sf"));
    }
}
