//! Configuration for moduledoc.
//!
//! Config lives in `moduledoc.toml`, looked up from an explicit `--config`
//! path, then the working directory, then the user config directory.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ModuleDocError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "moduledoc.toml";

/// Directory name under the user's config dir.
const CONFIG_DIR_NAME: &str = "moduledoc";

// ---------------------------------------------------------------------------
// Config structs (matching moduledoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocConfig {
    /// Project and source repository settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[site]` section: what the pages describe and where sources are browsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project name used in the index introduction.
    #[serde(default = "default_project")]
    pub project: String,

    /// Repository display name that corrections are filed against.
    #[serde(default = "default_repository_name")]
    pub repository_name: String,

    /// Browse URL of the repository root.
    #[serde(default = "default_repository_url")]
    pub repository_url: String,

    /// Branch used in source links.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Source-tree root that module scopes are relative to.
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Name of the console/OS shell that provides additional commands.
    #[serde(default = "default_console_name")]
    pub console_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            repository_name: default_repository_name(),
            repository_url: default_repository_url(),
            branch: default_branch(),
            source_root: default_source_root(),
            console_name: default_console_name(),
        }
    }
}

fn default_project() -> String {
    "PX4".into()
}
fn default_repository_name() -> String {
    "PX4-Autopilot".into()
}
fn default_repository_url() -> String {
    "https://github.com/PX4/PX4-Autopilot".into()
}
fn default_branch() -> String {
    "main".into()
}
fn default_source_root() -> String {
    "src".into()
}
fn default_console_name() -> String {
    "NuttX".into()
}

impl SiteConfig {
    /// Browse URL for a module scope:
    /// `<repository_url>/tree/<branch>/<source_root>/<scope>`.
    pub fn source_url(&self, scope: &str) -> String {
        format!(
            "{}/tree/{}/{}/{}",
            self.repository_url.trim_end_matches('/'),
            self.branch,
            self.source_root.trim_matches('/'),
            scope
        )
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the pages are written to.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// HTML-escape documentation and usage text. Off by default.
    #[serde(default)]
    pub escape_html: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            escape_html: false,
        }
    }
}

fn default_output_dir() -> String {
    "modules".into()
}

impl DocConfig {
    /// Check values that would otherwise produce broken links.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.site.repository_url).map_err(|e| {
            ModuleDocError::config(format!(
                "invalid repository_url '{}': {e}",
                self.site.repository_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ModuleDocError::config(format!(
                "repository_url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.site.branch.trim().is_empty() {
            return Err(ModuleDocError::config("site.branch must not be empty"));
        }
        if self.site.source_root.trim_matches('/').is_empty() {
            return Err(ModuleDocError::config("site.source_root must not be empty"));
        }
        if self.output.dir.trim().is_empty() {
            return Err(ModuleDocError::config("output.dir must not be empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the per-user config file (`<config dir>/moduledoc/moduledoc.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Find the config file to load.
///
/// An explicit path must exist. Otherwise `<cwd>/moduledoc.toml` wins over
/// the user config file; `None` means defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ModuleDocError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(user_config_path().filter(|p| p.exists()))
}

/// Load and validate the config. Returns defaults if no file is found.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<DocConfig> {
    let config = match resolve_config_path(explicit, cwd)? {
        Some(path) => load_config_from(&path)?,
        None => {
            tracing::debug!("no config file found, using defaults");
            DocConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<DocConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ModuleDocError::io(path, e))?;

    let config = toml::from_str(&content).map_err(|e| {
        ModuleDocError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Write a default config file into `dir`. Refuses to overwrite.
/// Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(ModuleDocError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&DocConfig::default())
        .map_err(|e| ModuleDocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ModuleDocError::io(&path, e))?;
    tracing::info!(path = %path.display(), "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_serializes() {
        let toml_str = toml::to_string_pretty(&DocConfig::default()).expect("serialize");
        assert!(toml_str.contains("repository_url"));
        assert!(toml_str.contains("PX4-Autopilot"));
    }

    #[test]
    fn config_roundtrip() {
        let toml_str = toml::to_string_pretty(&DocConfig::default()).expect("serialize");
        let parsed: DocConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed, DocConfig::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[site]
project = "Acme"
repository_url = "https://github.com/acme/firmware"

[output]
escape_html = true
"#;
        let config: DocConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.site.project, "Acme");
        assert_eq!(config.site.branch, "main");
        assert_eq!(config.output.dir, "modules");
        assert!(config.output.escape_html);
    }

    #[test]
    fn default_source_url() {
        let site = SiteConfig::default();
        assert_eq!(
            site.source_url("drivers/gps"),
            "https://github.com/PX4/PX4-Autopilot/tree/main/src/drivers/gps"
        );
    }

    #[test]
    fn source_url_trims_stray_slashes() {
        let site = SiteConfig {
            repository_url: "https://github.com/acme/fw/".into(),
            source_root: "/firmware/src/".into(),
            ..SiteConfig::default()
        };
        assert_eq!(
            site.source_url("lib/x"),
            "https://github.com/acme/fw/tree/main/firmware/src/lib/x"
        );
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = DocConfig::default();
        config.site.repository_url = "not a url".into();
        assert!(config.validate().unwrap_err().to_string().contains("repository_url"));

        config.site.repository_url = "ftp://example.com/repo".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_branch() {
        let mut config = DocConfig::default();
        config.site.branch = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_config_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = resolve_config_path(Some(&missing), tmp.path()).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn local_config_is_found() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "[site]\nproject = \"Local\"\n").unwrap();

        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.site.project, "Local");
    }

    #[test]
    fn init_config_writes_once() {
        let tmp = tempfile::tempdir().unwrap();
        let path = init_config(tmp.path()).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), DocConfig::default());
        assert!(init_config(tmp.path()).is_err());
    }
}
