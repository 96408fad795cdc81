use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RuleError;
use crate::rule::Rule;
use crate::rule_set::{Allowlist, RuleSet};

/// One parsed rule file.
///
/// Bare rule lists and single rules carry no domain of their own; they take
/// the file stem (`wallet.yaml` -> `wallet`).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFile {
    pub path: PathBuf,
    pub domain: String,
    pub allowlist: Vec<String>,
    pub rules: Vec<Rule>,
}

impl RuleFile {
    pub fn into_rule_set(self) -> Result<RuleSet, RuleError> {
        RuleSet::new(self.domain, Allowlist::new(self.allowlist), self.rules)
    }
}

/// Load every rule file under `path` (a single file or a directory).
pub fn load_rule_files(path: impl AsRef<Path>) -> Result<Vec<RuleFile>, RuleError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RuleError::MissingPath(path.display().to_string()));
    }

    if path.is_dir() {
        load_from_directory(path)
    } else {
        Ok(vec![load_from_file(path)?])
    }
}

/// Load a single file describing a complete rule set.
pub fn load_rule_set(path: impl AsRef<Path>) -> Result<RuleSet, RuleError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RuleError::MissingPath(path.display().to_string()));
    }
    load_from_file(path)?.into_rule_set()
}

fn load_from_directory(path: &Path) -> Result<Vec<RuleFile>, RuleError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(path).map_err(|err| RuleError::from_io(path, err))? {
        let entry = entry.map_err(|err| RuleError::from_io(path, err))?;
        let file_type = entry
            .file_type()
            .map_err(|err| RuleError::from_io(entry.path(), err))?;
        if file_type.is_dir() {
            continue;
        }

        if let Some(ext) = entry.path().extension().and_then(|value| value.to_str()) {
            if matches!(ext, "json" | "yaml" | "yml") {
                paths.push(entry.path());
            }
        }
    }

    // read_dir order is platform dependent; layering must not be.
    paths.sort();
    paths.iter().map(|path| load_from_file(path)).collect()
}

fn load_from_file(path: &Path) -> Result<RuleFile, RuleError> {
    let raw = fs::read_to_string(path).map_err(|err| RuleError::from_io(path, err))?;
    parse_rule_file(&raw, path)
}

fn parse_rule_file(raw: &str, path: &Path) -> Result<RuleFile, RuleError> {
    let mut attempts = Vec::new();

    match serde_yaml::from_str::<RuleDocument>(raw) {
        Ok(doc) => {
            return Ok(RuleFile {
                path: path.to_path_buf(),
                domain: doc.domain,
                allowlist: doc.allowlist,
                rules: doc.rules,
            })
        }
        Err(err) => attempts.push(format!("rule set document ({err})")),
    }

    let stem_domain = || {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_owned)
            .ok_or_else(|| RuleError::parse_error(path, "cannot derive domain from file name"))
    };

    if let Ok(list) = serde_yaml::from_str::<Vec<Rule>>(raw) {
        return Ok(RuleFile {
            path: path.to_path_buf(),
            domain: stem_domain()?,
            allowlist: Vec::new(),
            rules: list,
        });
    }

    attempts.push("list".to_string());

    if let Ok(rule) = serde_yaml::from_str::<Rule>(raw) {
        return Ok(RuleFile {
            path: path.to_path_buf(),
            domain: stem_domain()?,
            allowlist: Vec::new(),
            rules: vec![rule],
        });
    }

    attempts.push("single".to_string());

    let message = format!("unable to parse rules file using {:?} formats", attempts);
    Err(RuleError::parse_error(path.to_path_buf(), message))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    domain: String,
    #[serde(default)]
    allowlist: Vec<String>,
    #[serde(default)]
    rules: Vec<Rule>,
}
