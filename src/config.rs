//! Configuration for the maintenance passes.
//!
//! Every field has a built-in default matching the lore wiki layout, so an
//! absent or partial `lorekeep.yaml` is fine:
//!
//! ```yaml
//! related:
//!   root: docs/lore
//!   malformed: keep
//!   canonical:
//!     - text: Reality Mechanics
//!       target: reality_mechanics/README.md
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::{LoreError, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lorekeep.yaml";

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "LOREKEEP_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoreConfig {
    /// Settings for `check-links`.
    pub links: LinksConfig,
    /// Settings for `normalize-related`.
    pub related: RelatedConfig,
    /// Settings for `ground-sweep`.
    pub sweep: SweepConfig,
}

/// Settings for the relative-link validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Root walked when no root argument is given.
    pub root: PathBuf,
    /// File extensions treated as markdown, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Href prefixes that are never checked.
    pub skip_prefixes: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs"),
            extensions: vec!["md".into(), "markdown".into()],
            skip_prefixes: vec![
                "http://".into(),
                "https://".into(),
                "#".into(),
                "mailto:".into(),
            ],
        }
    }
}

/// One link every related-line must start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonicalLink {
    /// Display text.
    pub text: String,
    /// Target path relative to the normalizer root.
    pub target: PathBuf,
}

impl CanonicalLink {
    /// Creates a canonical link.
    pub fn new(text: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self { text: text.into(), target: target.into() }
    }
}

/// What happens to related-line segments that are not `[text](href)` links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Discard without a diagnostic.
    Drop,
    /// Discard and log a warning naming the file and line.
    #[default]
    Warn,
    /// Keep the segment verbatim in its original position.
    Keep,
}

/// Settings for the related-line normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelatedConfig {
    /// Root walked by the normalizer.
    pub root: PathBuf,
    /// Literal prefix identifying the related-line.
    pub marker: String,
    /// Links placed first on every related-line, in order.
    pub canonical: Vec<CanonicalLink>,
    /// Treatment of unparsable segments.
    pub malformed: MalformedPolicy,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs/lore"),
            marker: "*Related: ".into(),
            canonical: vec![
                CanonicalLink::new("Reality Mechanics", "reality_mechanics/README.md"),
                CanonicalLink::new("The Bureau", "factions/the_bureau.md"),
                CanonicalLink::new("Continuum Program", "entities/continuum.md"),
            ],
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Settings for the note-injection sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Root the sweep directories are relative to.
    pub root: PathBuf,
    /// Subdirectories of `root` that are swept; missing ones are skipped.
    pub directories: Vec<PathBuf>,
    /// Text whose presence means a page already carries the note.
    pub marker: String,
    /// Line inserted after the first top-level header.
    pub note: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("docs/lore"),
            directories: vec![
                PathBuf::from("npcs"),
                PathBuf::from("characters"),
                PathBuf::from("locations/districts"),
                PathBuf::from("locations/establishments"),
            ],
            marker: "Grounded Canon v2".into(),
            note: "Note: This page adheres to Grounded Canon v2 (single-premise).".into(),
        }
    }
}

impl LoreConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`LoreError::Config`] if the YAML is malformed or has unknown keys.
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|source| LoreError::Config { path: path.to_path_buf(), source })
    }

    /// Loads the configuration, falling back to defaults.
    ///
    /// Lookup order: `explicit`, then the `LOREKEEP_CONFIG` environment
    /// variable, then `lorekeep.yaml` in the working directory. An explicitly
    /// named file must exist; the implicit default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file cannot be read or any file fails to parse.
    pub fn load(ctx: &ServiceContext, explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let path = match named {
            Some(path) => path,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !ctx.fs.exists(&fallback) {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let yaml = ctx.fs.read_to_string(&path).map_err(|e| LoreError::io(&path, e))?;
        Self::from_yaml(&path, &yaml)
    }
}
