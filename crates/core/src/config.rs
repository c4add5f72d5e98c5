//! Run configuration, loaded from an optional `ferry.toml`.
//!
//! Every key is defaulted, so an empty file (or no file at all) describes the
//! conventional Maven web-application layout.
//!
//! ```toml
//! [layout]
//! descriptor = "src/main/webapp/WEB-INF/struts-config.xml"
//! views = "src/main/webapp/jsp"
//!
//! [extraction]
//! parallel = true
//! collision_policy = "reject"
//!
//! [backend]
//! port = 8080
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FerryError;
use crate::naming::CollisionPolicy;

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FerryConfig {
    pub layout: LayoutConfig,
    pub extraction: ExtractionConfig,
    pub frontend: FrontendConfig,
    pub backend: BackendConfig,
}

/// `[layout]`: where each input lives, relative to the application root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Route/action and form-bean descriptor.
    pub descriptor: PathBuf,
    /// Servlet deployment descriptor, consulted for the handler extension.
    pub deployment_descriptor: PathBuf,
    /// View template directory.
    pub views: PathBuf,
    /// Business-logic source directory.
    pub logic: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            descriptor: PathBuf::from("src/main/webapp/WEB-INF/struts-config.xml"),
            deployment_descriptor: PathBuf::from("src/main/webapp/WEB-INF/web.xml"),
            views: PathBuf::from("src/main/webapp/jsp"),
            logic: PathBuf::from("src/main/java"),
        }
    }
}

/// `[extraction]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Used when the deployment descriptor declares no `*.ext` mapping.
    pub handler_suffix: String,
    /// Scan view and logic files on the rayon pool.
    pub parallel: bool,
    pub collision_policy: CollisionPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            handler_suffix: ".do".to_string(),
            parallel: false,
            collision_policy: CollisionPolicy::Suffix,
        }
    }
}

/// `[frontend]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    pub package_name: String,
    pub api_base_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            package_name: "migrated-frontend".to_string(),
            api_base_url: "http://localhost:3001/api".to_string(),
        }
    }
}

/// `[backend]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub package_name: String,
    pub port: u16,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            package_name: "migrated-backend".to_string(),
            port: 3001,
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

impl FerryConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, FerryError> {
        let content = std::fs::read_to_string(path).map_err(|e| FerryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|message| FerryError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FerryError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = FerryConfig::parse("").unwrap();
        assert_eq!(config, FerryConfig::default());
        assert_eq!(config.extraction.handler_suffix, ".do");
        assert_eq!(config.backend.port, 3001);
        assert_eq!(config.extraction.collision_policy, CollisionPolicy::Suffix);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = FerryConfig::parse(
            r#"
[layout]
views = "web/pages"

[extraction]
parallel = true
collision_policy = "reject"
"#,
        )
        .unwrap();
        assert_eq!(config.layout.views, PathBuf::from("web/pages"));
        assert_eq!(config.layout.logic, PathBuf::from("src/main/java"));
        assert!(config.extraction.parallel);
        assert_eq!(config.extraction.collision_policy, CollisionPolicy::Reject);
        assert_eq!(config.frontend.package_name, "migrated-frontend");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = FerryConfig::parse("[layout]\nviewz = \"x\"\n").unwrap_err();
        assert!(err.contains("viewz"), "got: {}", err);
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferry.toml");
        std::fs::write(&path, "[backend]\nport = \"nope\"\n").unwrap();
        let err = FerryConfig::load(&path).unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("ferry.toml"));
    }
}
