use crate::app::cli::{Cli, ErrorMode};
use crate::app::globs::GlobList;
use crate::app::models::{FindOptions, UNIVERSAL_CHECK_REGEXP};
use anyhow::{bail, Context, Result};
use regex::bytes::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEPTH: i64 = 5;

/// Applied unless `--no-default-excludes` is given.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    "**/.git",
    "node_modules",
    "**/node_modules",
    "testdata",
    "**/testdata",
];

/// Everything a run needs, resolved from presets and command line.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub options: FindOptions,
    pub root_dir: PathBuf,
    pub separator: char,
    pub error_mode: ErrorMode,
}

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PresetConfig {
    pub flag_file: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub check_file: Option<String>,
    pub check_regexp: Option<String>,
    pub depth: Option<i64>,
}

pub fn presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ls-having").join("presets.toml"))
}

pub fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    load_presets_from(&presets_path()?)
}

pub fn load_presets_from(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        log::debug!("No presets file at {:?}", path);
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse presets file {:?}", path))?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Vec<String>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    combined.extend(cli_vec);
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// The flag files and check file are both unset, so there is nothing to look for.
#[derive(Debug, thiserror::Error)]
#[error("flag file or check file must be specified")]
pub struct MissingFlagFile;

pub fn resolve_config(cli: Cli, presets: &HashMap<String, PresetConfig>) -> Result<RuntimeConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => match presets.get(name) {
            Some(preset) => preset.clone(),
            None => bail!("Unknown preset: {}", name),
        },
        None => PresetConfig::default(),
    };

    let check_file = cli.check_file.or(preset.check_file).unwrap_or_default();
    let mut flag_files = merge_vecs(preset.flag_file, cli.flag_files);
    if flag_files.is_empty() {
        if check_file.is_empty() {
            return Err(MissingFlagFile.into());
        }
        // The check file doubles as the flag file.
        flag_files.push(check_file.clone());
    }

    let mut excludes = merge_vecs(preset.exclude, cli.excludes);
    if !cli.no_default_excludes {
        excludes = merge_vecs(
            Some(excludes),
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        );
    }

    let depth = cli.depth.or(preset.depth).unwrap_or(DEFAULT_DEPTH);
    let check_regexp = cli
        .check_regexp
        .or(preset.check_regexp)
        .unwrap_or_else(|| UNIVERSAL_CHECK_REGEXP.to_string());
    let check_regexp = Regex::new(&check_regexp)
        .with_context(|| format!("Invalid regular expression: {}", check_regexp))?;

    let options = FindOptions::new(GlobList::new(&flag_files)?)
        .with_max_depth(usize::try_from(depth).ok())
        .with_excludes(GlobList::new(&excludes)?)
        .with_exclude_root(cli.subdirectories_only)
        .with_check_file(check_file)
        .with_check_regexp(check_regexp)
        .with_check_inverse(cli.check_inverse)
        .with_fail_fast(cli.error == ErrorMode::Panic);

    Ok(RuntimeConfig {
        options,
        root_dir: cli.root_dir,
        separator: if cli.print0 { '\0' } else { '\n' },
        error_mode: cli.error,
    })
}
