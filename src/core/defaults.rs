use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::MatchMode;
use crate::paths;

/// Root configuration structure for hsm-scaffold.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Folder holding one subfolder per template identifier.
    #[serde(default = "default_template_root")]
    pub template_root: PathBuf,

    /// Folder new active objects are created in.
    #[serde(default = "default_target_root")]
    pub target_root: PathBuf,

    #[serde(default)]
    pub templates: TemplateNames,

    #[serde(default)]
    pub match_mode: MatchMode,

    #[serde(default)]
    pub license: LicenseConfig,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_root: default_template_root(),
            target_root: default_target_root(),
            templates: TemplateNames::default(),
            match_mode: MatchMode::default(),
            license: LicenseConfig::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Folder of the template named `identifier`.
    pub fn template_dir(&self, identifier: &str) -> PathBuf {
        self.template_root.join(identifier)
    }
}

/// Identifiers the template sources are written against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateNames {
    #[serde(default = "default_simple_act")]
    pub simple_act: String,

    #[serde(default = "default_composite_act")]
    pub composite_act: String,

    /// Region folder nested inside the composite active object template.
    #[serde(default = "default_composite_region")]
    pub composite_region: String,

    #[serde(default = "default_simple_region")]
    pub simple_region: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            simple_act: default_simple_act(),
            composite_act: default_composite_act(),
            composite_region: default_composite_region(),
            simple_region: default_simple_region(),
        }
    }
}

/// Configuration for license header replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    #[serde(default = "default_license_file")]
    pub license_file: PathBuf,

    #[serde(default = "default_license_directories")]
    pub directories: Vec<PathBuf>,

    /// File name globs, e.g. `*.cpp`.
    #[serde(default = "default_license_patterns")]
    pub patterns: Vec<String>,

    /// Path suffixes left untouched.
    #[serde(default = "default_license_exclude")]
    pub exclude: Vec<String>,

    /// Text identifying an existing header comment to replace.
    #[serde(default = "default_copyright_marker")]
    pub copyright_marker: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            license_file: default_license_file(),
            directories: default_license_directories(),
            patterns: default_license_patterns(),
            exclude: default_license_exclude(),
            copyright_marker: default_copyright_marker(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_template_root() -> PathBuf {
    PathBuf::from("src").join("Template")
}

fn default_target_root() -> PathBuf {
    PathBuf::from("src")
}

fn default_simple_act() -> String {
    "SimpleAct".to_string()
}

fn default_composite_act() -> String {
    "CompositeAct".to_string()
}

fn default_composite_region() -> String {
    "CompositeReg".to_string()
}

fn default_simple_region() -> String {
    "SimpleReg".to_string()
}

fn default_license_file() -> PathBuf {
    PathBuf::from("LICENSE.txt")
}

fn default_license_directories() -> Vec<PathBuf> {
    vec![
        PathBuf::from("src"),
        PathBuf::from("include"),
        PathBuf::from("framework"),
    ]
}

fn default_license_patterns() -> Vec<String> {
    vec!["*.cpp".to_string(), "*.c".to_string(), "*.h".to_string()]
}

fn default_license_exclude() -> Vec<String> {
    vec!["_write.c".to_string(), "stm32l4xx_hal_conf.h".to_string()]
}

fn default_copyright_marker() -> String {
    "Copyright (C) Gallium Studio LLC".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load config from `explicit` or `./hsm-scaffold.json`.
///
/// A missing file yields built-in defaults; a malformed file is an error.
pub fn load_config(explicit: Option<&Path>) -> crate::Result<ScaffoldConfig> {
    let path = paths::config_file(explicit);

    if !path.exists() {
        if explicit.is_some() {
            return Err(crate::Error::scaffold_path_not_found(
                path.display().to_string(),
                Some("config".to_string()),
            ));
        }
        return Ok(ScaffoldConfig::default());
    }

    load_config_from_file(&path)
}

fn load_config_from_file(path: &Path) -> crate::Result<ScaffoldConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: ScaffoldConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ScaffoldConfig) -> crate::Result<()> {
    let templates = &config.templates;
    for (key, value) in [
        ("templates.simple_act", &templates.simple_act),
        ("templates.composite_act", &templates.composite_act),
        ("templates.composite_region", &templates.composite_region),
        ("templates.simple_region", &templates.simple_region),
    ] {
        if crate::naming::validate_identifier(value, key).is_err() {
            return Err(crate::Error::config_invalid_value(
                key,
                Some(value.clone()),
                "Template names must be PascalCase identifiers",
            ));
        }
    }
    Ok(())
}

/// Write config to `path`, refusing to overwrite an existing file.
pub fn save_config(config: &ScaffoldConfig, path: &Path) -> crate::Result<()> {
    if path.exists() {
        return Err(crate::Error::scaffold_path_exists(
            path.display().to_string(),
            Some("config".to_string()),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize hsm-scaffold.json".to_string()))
    })?;

    crate::utils::io::write_file(path, &content, &format!("write {}", path.display()))
}
