//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{ListSyncError, ListSyncResult};

use super::types::Config;

/// Project-local config file name
pub const PROJECT_CONFIG_FILE: &str = "listsync.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ListSyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used for diagnostics.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> ListSyncResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ListSyncError::ConfigParse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Locate the config file to use.
///
/// Order: explicit path, `./listsync.toml`, `<config dir>/listsync/config.toml`.
/// An explicit path is returned even when it does not exist so that loading
/// it reports the IO error.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    dirs::config_dir()
        .map(|dir| dir.join("listsync").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Load the resolved config (or defaults) and apply env overrides.
pub fn load_resolved(
    explicit: Option<&Path>,
    cwd: &Path,
) -> ListSyncResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match resolve_config_path(explicit, cwd) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            (Config::default(), Vec::new())
        }
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (LISTSYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_overrides_from(config, |key| std::env::var(key).ok())
}

pub(super) fn with_overrides_from(
    mut config: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(path) = var("LISTSYNC_ROSTER").filter(|v| !v.trim().is_empty()) {
        config.roster.path = PathBuf::from(path);
    }

    if let Some(path) = var("LISTSYNC_TOKEN_PATH").filter(|v| !v.trim().is_empty()) {
        config.remote.token_path = PathBuf::from(path);
    }

    if let Some(domain) = var("LISTSYNC_DOMAIN").filter(|v| !v.trim().is_empty()) {
        config.catalog.domain = domain.trim().to_lowercase();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "roster",
        "path",
        "columns",
        "grade",
        "ensemble",
        "member_type",
        "email",
        "remote",
        "base_url",
        "token_path",
        "member_role",
        "timeout_secs",
        "page_size",
        "catalog",
        "domain",
        "segments",
        "filters",
        "lists",
        "band",
        "student",
        "list",
        "baseline",
        "members",
        "validator",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
