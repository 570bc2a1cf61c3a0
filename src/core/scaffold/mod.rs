//! Scaffold active objects and regions from template folders.
//!
//! Every operation follows the same sequence:
//! 1. Check the source exists and the target does not
//! 2. Copy the template tree to the target
//! 3. Rename files whose names embed the template identifier
//! 4. Rewrite class, variable and event names inside those files
//!
//! Only regular files directly inside a processed folder are renamed and
//! rewritten.

mod tree;

pub use tree::{copy_tree, list_files, rename_file, rename_files_in, FileRename};

use crate::defaults::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::naming::{NamePair, SubstitutionPlan};
use crate::utils::{io, validation};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of a scaffold operation.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    /// Folder or file created by the operation.
    pub created: String,
    /// Files (and folders) renamed from template names.
    pub renamed: Vec<FileRename>,
    /// Files whose contents were rewritten.
    pub processed: Vec<String>,
    /// Name substitutions, in the order they were applied.
    pub names: Vec<NamePair>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl ScaffoldReport {
    fn new(created: &Path) -> Self {
        Self {
            created: created.display().to_string(),
            renamed: Vec::new(),
            processed: Vec::new(),
            names: Vec::new(),
            hints: Vec::new(),
        }
    }
}

// ============================================================================
// Preconditions
// ============================================================================

fn require_template(config: &ScaffoldConfig, identifier: &str) -> Result<PathBuf> {
    let dir = config.template_dir(identifier);
    if !dir.is_dir() {
        return Err(Error::scaffold_template_not_found(dir.display().to_string()));
    }
    Ok(dir)
}

fn require_absent(path: &Path, role: &str) -> Result<()> {
    if path.exists() {
        return Err(Error::scaffold_path_exists(
            path.display().to_string(),
            Some(role.to_string()),
        ));
    }
    Ok(())
}

fn require_dir(path: &Path, role: &str) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::scaffold_path_not_found(
            path.display().to_string(),
            Some(role.to_string()),
        ));
    }
    Ok(())
}

// ============================================================================
// Substitution pass
// ============================================================================

/// Rewrite each file in place with `plan`. Returns the files processed.
pub fn process_files(files: &[PathBuf], plan: &SubstitutionPlan) -> Result<Vec<String>> {
    for pair in &plan.pairs {
        log_status!("names", "{} → {}", pair.from.class, pair.to.class);
    }

    let mut processed = Vec::new();
    for file in files.iter().filter(|f| f.is_file()) {
        log_status!("scaffold", "Processing {}", file.display());
        let buf = io::read_file(file, &format!("read {}", file.display()))?;
        let rewritten = plan.apply(&buf)?;
        io::write_file(file, &rewritten, &format!("write {}", file.display()))?;
        processed.push(file.display().to_string());
    }
    Ok(processed)
}

// ============================================================================
// Operations
// ============================================================================

/// Create `target_root/<name>` from the simple active object template.
pub fn add_simple_act(config: &ScaffoldConfig, name: &str) -> Result<ScaffoldReport> {
    let template = &config.templates.simple_act;
    let act = NamePair::with_mode(template, name, config.match_mode)?;

    let src = require_template(config, template)?;
    let act_path = config.target_root.join(name);
    require_absent(&act_path, "active object")?;

    log_status!("scaffold", "Creating {}...", act_path.display());
    copy_tree(&src, &act_path)?;

    let (act_files, renamed) = rename_files_in(&act_path, template, name, config.match_mode)?;

    let plan = SubstitutionPlan::new(config.match_mode).with_pair(act);
    let mut report = ScaffoldReport::new(&act_path);
    report.renamed = renamed;
    report.processed = process_files(&act_files, &plan)?;
    report.names = plan.pairs;
    Ok(report)
}

/// Create `target_root/<name>` from the composite active object template,
/// with its nested region folder renamed to `<region>`.
pub fn add_composite_act(
    config: &ScaffoldConfig,
    name: &str,
    region: &str,
) -> Result<ScaffoldReport> {
    let template_act = &config.templates.composite_act;
    let template_region = &config.templates.composite_region;
    let region_pair = NamePair::with_mode(template_region, region, config.match_mode)?;
    let act_pair = NamePair::with_mode(template_act, name, config.match_mode)?;

    let src = require_template(config, template_act)?;
    require_dir(&src.join(template_region), "template region")?;
    let act_path = config.target_root.join(name);
    require_absent(&act_path, "active object")?;

    log_status!("scaffold", "Creating {}...", act_path.display());
    copy_tree(&src, &act_path)?;

    let (act_files, mut renamed) =
        rename_files_in(&act_path, template_act, name, config.match_mode)?;

    let region_path = act_path.join(region);
    if region != template_region.as_str() {
        std::fs::rename(act_path.join(template_region), &region_path).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("rename region folder to {}", region_path.display())),
            )
        })?;
        renamed.push(FileRename {
            from: template_region.clone(),
            to: region.to_string(),
        });
    }

    let (region_files, region_renamed) =
        rename_files_in(&region_path, template_region, region, config.match_mode)?;
    renamed.extend(region_renamed);

    let plan = SubstitutionPlan::new(config.match_mode)
        .with_pair(region_pair)
        .with_pair(act_pair);

    let mut report = ScaffoldReport::new(&act_path);
    report.renamed = renamed;
    report.processed = process_files(&act_files, &plan)?;
    report.processed.extend(process_files(&region_files, &plan)?);
    report.names = plan.pairs;
    Ok(report)
}

/// Create `target_root/<act>/<region>` from the simple region template.
pub fn add_simple_region(
    config: &ScaffoldConfig,
    act: &str,
    region: &str,
) -> Result<ScaffoldReport> {
    let template = &config.templates.simple_region;
    crate::naming::validate_identifier(act, "act")?;
    let region_pair = NamePair::with_mode(template, region, config.match_mode)?;

    let src = require_template(config, template)?;
    let act_path = config.target_root.join(act);
    require_dir(&act_path, "active object")?;
    let region_path = act_path.join(region);
    require_absent(&region_path, "region")?;

    log_status!("scaffold", "Creating {}...", region_path.display());
    copy_tree(&src, &region_path)?;

    let (region_files, renamed) =
        rename_files_in(&region_path, template, region, config.match_mode)?;

    let plan = SubstitutionPlan::new(config.match_mode).with_pair(region_pair);
    let mut report = ScaffoldReport::new(&region_path);
    report.renamed = renamed;
    report.processed = process_files(&region_files, &plan)?;
    report.names = plan.pairs;
    Ok(report)
}

/// Copy the HSM folder `old_dir` to a sibling folder named `new_name` and
/// rename the HSM inside it. The old folder is left in place.
pub fn rename_hsm_dir(
    config: &ScaffoldConfig,
    old_dir: &Path,
    new_name: &str,
) -> Result<ScaffoldReport> {
    let old_name = validation::require(
        old_dir.file_name().map(|n| n.to_string_lossy().to_string()),
        "old_dir",
        "Old HSM path does not name a folder",
    )?;
    let pair = NamePair::with_mode(&old_name, new_name, config.match_mode)?;

    require_dir(old_dir, "old HSM")?;
    let new_dir = old_dir.with_file_name(new_name);
    require_absent(&new_dir, "new HSM")?;

    log_status!("scaffold", "Creating {}...", new_dir.display());
    copy_tree(old_dir, &new_dir)?;

    let (files, renamed) = rename_files_in(&new_dir, &old_name, new_name, config.match_mode)?;

    let plan = SubstitutionPlan::new(config.match_mode).with_pair(pair);
    let mut report = ScaffoldReport::new(&new_dir);
    report.renamed = renamed;
    report.processed = process_files(&files, &plan)?;
    report.names = plan.pairs;
    report
        .hints
        .push(format!("Please manually delete old HSM path {}", old_dir.display()));
    Ok(report)
}

/// Rename a single HSM source file and the HSM names inside it.
pub fn rename_hsm_file(
    config: &ScaffoldConfig,
    file: &Path,
    old_name: &str,
    new_name: &str,
) -> Result<ScaffoldReport> {
    let pair = NamePair::with_mode(old_name, new_name, config.match_mode)?;

    if !file.is_file() {
        return Err(Error::scaffold_path_not_found(
            file.display().to_string(),
            Some("HSM file".to_string()),
        ));
    }

    let (new_file, rename) = rename_file(file, old_name, new_name, config.match_mode)?;

    let plan = SubstitutionPlan::new(config.match_mode).with_pair(pair);
    let mut report = ScaffoldReport::new(&new_file);
    report.renamed.extend(rename);
    report.processed = process_files(std::slice::from_ref(&new_file), &plan)?;
    report.names = plan.pairs;
    Ok(report)
}
