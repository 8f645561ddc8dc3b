//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{MembershipSet, Segment, SegmentCatalog, SegmentFilter};
use crate::domain::value_objects::{ConfigWarning, EmailAddress, Grade};
use crate::error::{ListSyncError, ListSyncResult};

use super::loader;

pub const DEFAULT_LIST_DOMAIN: &str = "vhsband.com";
pub const DEFAULT_DIRECTORY_API: &str = "https://admin.googleapis.com/admin/directory/v1";

/// Roster (CSV directory) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub columns: RosterColumns,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: default_roster_path(),
            columns: RosterColumns::default(),
        }
    }
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("directory.csv")
}

/// Header names of the roster columns the reconciler reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterColumns {
    #[serde(default = "default_grade_column")]
    pub grade: String,

    #[serde(default = "default_ensemble_column")]
    pub ensemble: String,

    #[serde(default = "default_member_type_column")]
    pub member_type: String,

    #[serde(default = "default_email_column")]
    pub email: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            grade: default_grade_column(),
            ensemble: default_ensemble_column(),
            member_type: default_member_type_column(),
            email: default_email_column(),
        }
    }
}

fn default_grade_column() -> String {
    "Grade".to_string()
}

fn default_ensemble_column() -> String {
    "Ensemble".to_string()
}

fn default_member_type_column() -> String {
    "Type".to_string()
}

fn default_email_column() -> String {
    "Email".to_string()
}

/// Remote group service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth token cache
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Role given to added members
    #[serde(default = "default_member_role")]
    pub member_role: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_path: default_token_path(),
            member_role: default_member_role(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_DIRECTORY_API.to_string()
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_member_role() -> String {
    "MEMBER".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    200
}

/// One paired segment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub grade: Grade,
    pub band: bool,
    pub student: bool,
    pub list: String,
}

/// Segment catalog configuration
///
/// Either `[[catalog.segments]]` records, or the two parallel tables
/// `filters` / `lists`, or neither (the sixteen defaults for `domain`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_domain")]
    pub domain: String,

    #[serde(default)]
    pub segments: Vec<SegmentEntry>,

    #[serde(default)]
    pub filters: Vec<SegmentFilter>,

    #[serde(default)]
    pub lists: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            segments: Vec::new(),
            filters: Vec::new(),
            lists: Vec::new(),
        }
    }
}

fn default_domain() -> String {
    DEFAULT_LIST_DOMAIN.to_string()
}

/// Addresses that belong on every list regardless of the roster
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaselineConfig {
    #[serde(default)]
    pub members: Vec<String>,
}

/// MX validator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default = "default_dns_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_dns_timeout_secs(),
        }
    }
}

fn default_dns_timeout_secs() -> u64 {
    5
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub baseline: BaselineConfig,

    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ListSyncResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ListSyncResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (LISTSYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Build the segment catalog described by `[catalog]`
    pub fn segment_catalog(&self) -> ListSyncResult<SegmentCatalog> {
        let catalog = &self.catalog;
        let has_parallel = !catalog.filters.is_empty() || !catalog.lists.is_empty();

        if !catalog.segments.is_empty() && has_parallel {
            return Err(ListSyncError::ConfigInconsistency(
                "use either [[catalog.segments]] or catalog.filters/catalog.lists, not both"
                    .to_string(),
            ));
        }

        if !catalog.segments.is_empty() {
            let segments = catalog
                .segments
                .iter()
                .map(|entry| {
                    let list = EmailAddress::parse(&entry.list).map_err(|e| {
                        ListSyncError::ConfigInconsistency(format!(
                            "invalid mailing list address: {}",
                            e
                        ))
                    })?;
                    Ok(Segment::new(
                        SegmentFilter::new(entry.grade, entry.band, entry.student),
                        list,
                    ))
                })
                .collect::<ListSyncResult<Vec<_>>>()?;
            return SegmentCatalog::new(segments);
        }

        if has_parallel {
            return SegmentCatalog::from_parallel(catalog.filters.clone(), catalog.lists.clone());
        }

        SegmentCatalog::default_for_domain(&catalog.domain)
    }

    /// Baseline members as a normalized set
    pub fn baseline_members(&self) -> ListSyncResult<MembershipSet> {
        self.baseline
            .members
            .iter()
            .map(|raw| {
                EmailAddress::parse(raw).map_err(|e| {
                    ListSyncError::ConfigInconsistency(format!("invalid baseline member: {}", e))
                })
            })
            .collect()
    }
}
