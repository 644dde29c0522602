//! Archive naming for (os, arch) targets.

use super::ProjectConfig;
use crate::error::{ConfigError, NamingError, Result};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Operating systems the namer accepts
pub const SUPPORTED_OSES: &[&str] = &[
    "darwin",
    "linux",
    "windows",
    "freebsd",
    "netbsd",
    "openbsd",
    "dragonfly",
];

/// Architectures the namer accepts
pub const SUPPORTED_ARCHES: &[&str] = &["amd64", "386", "arm", "arm64"];

const TEMPLATE: &str = "archive";

/// Renders archive base names from the configured template
#[derive(Debug)]
pub struct ArchiveNamer {
    registry: Handlebars<'static>,
    binary: String,
    version: String,
    replacements: BTreeMap<String, String>,
}

impl ArchiveNamer {
    /// Compile the archive template of `config`
    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE, &config.archive.name_template)
            .map_err(|e| ConfigError::InvalidTemplate {
                template: config.archive.name_template.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            registry,
            binary: config.binary_name()?,
            version: config.git.current_tag.clone(),
            replacements: config.archive.replacements.clone(),
        })
    }

    /// Base name (no extension) of the archive for one target
    pub fn name(&self, os: &str, arch: &str) -> Result<String> {
        if !SUPPORTED_OSES.contains(&os) {
            return Err(NamingError::UnsupportedOs {
                os: os.to_string(),
                arch: arch.to_string(),
            }
            .into());
        }
        if !SUPPORTED_ARCHES.contains(&arch) {
            return Err(NamingError::UnsupportedArch {
                os: os.to_string(),
                arch: arch.to_string(),
            }
            .into());
        }

        let data = serde_json::json!({
            "binary": self.binary,
            "version": self.version,
            "os": self.replace(os),
            "arch": self.replace(arch),
        });

        self.registry
            .render(TEMPLATE, &data)
            .map_err(|e| {
                NamingError::Render {
                    os: os.to_string(),
                    arch: arch.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn replace<'a>(&'a self, value: &'a str) -> &'a str {
        self.replacements
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    fn config() -> ProjectConfig {
        let mut config = ProjectConfig::new("acme/widget");
        config.git.current_tag = "v0.3.1".to_string();
        config
    }

    #[test]
    fn test_default_template() {
        let namer = ArchiveNamer::from_config(&config()).unwrap();
        assert_eq!(namer.name("linux", "amd64").unwrap(), "widget_linux_amd64");
    }

    #[test]
    fn test_replacements_apply_to_os_and_arch() {
        let mut config = config();
        config
            .archive
            .replacements
            .insert("darwin".to_string(), "Darwin".to_string());
        config
            .archive
            .replacements
            .insert("386".to_string(), "i386".to_string());
        let namer = ArchiveNamer::from_config(&config).unwrap();
        assert_eq!(namer.name("darwin", "386").unwrap(), "widget_Darwin_i386");
    }

    #[test]
    fn test_version_and_no_html_escaping() {
        let mut config = config();
        config.binary_name = Some("w&d".to_string());
        config.archive.name_template = "{{binary}}-{{version}}_{{os}}".to_string();
        let namer = ArchiveNamer::from_config(&config).unwrap();
        assert_eq!(namer.name("windows", "arm").unwrap(), "w&d-v0.3.1_windows");
    }

    #[test]
    fn test_unsupported_pair_is_naming_error() {
        let namer = ArchiveNamer::from_config(&config()).unwrap();
        assert!(matches!(
            namer.name("plan9", "amd64"),
            Err(ReleaseError::Naming(NamingError::UnsupportedOs { .. }))
        ));
        assert!(matches!(
            namer.name("linux", "sparc"),
            Err(ReleaseError::Naming(NamingError::UnsupportedArch { .. }))
        ));
    }

    #[test]
    fn test_unknown_variable_fails_in_strict_mode() {
        let mut config = config();
        config.archive.name_template = "{{binary}}_{{flavor}}".to_string();
        let namer = ArchiveNamer::from_config(&config).unwrap();
        assert!(matches!(
            namer.name("linux", "amd64"),
            Err(ReleaseError::Naming(NamingError::Render { .. }))
        ));
    }

    #[test]
    fn test_unclosed_template_is_config_error() {
        let mut config = config();
        config.archive.name_template = "{{binary".to_string();
        assert!(matches!(
            ArchiveNamer::from_config(&config),
            Err(ReleaseError::Config(ConfigError::InvalidTemplate { .. }))
        ));
    }
}
