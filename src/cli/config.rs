use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::audit::audit_model::AuditKind;
use crate::fill::image::MIN_IMAGE_SIZE;
use crate::reconcile::outline::DEFAULT_LABEL;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "canvas-assist",
    version,
    about = "Free-text commands, content checks and design audits for canvas documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: canvas-assist.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// JSON document file to operate on
    #[arg(long, global = true, default_value = "canvas.json")]
    pub doc: String,

    /// Node ids to select instead of the document's stored selection
    #[arg(long, global = true, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Save mutations back to the document file
    #[arg(long, global = true)]
    pub write: bool,

    /// Append a JSONL entry per handled request to this file
    #[arg(long, global = true)]
    pub journal: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a free-text command, e.g. `색상 변경 #FF5733`
    Exec {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Describe the selected layers
    Info,

    /// List the selected layers and their direct children
    Layers,

    /// Rename layers after the naming guide
    AutoRename,

    /// Apply an explicit rename plan
    RenameLayers {
        /// YAML or JSON list of {id, name}
        #[arg(long)]
        plan: String,
    },

    /// Rename the selection and its descendants
    Rename { naming_type: String },

    /// Write one value into every selected text layer
    Fill { value: String },

    /// Fill text layers from field value pools, in order
    RandomFill {
        /// YAML or JSON file holding a list of fields
        #[arg(long)]
        fields: String,
    },

    /// Fill image slots with placeholder pictures
    ImageFill {
        /// profile, cover, post, product, nature, food or other
        #[arg(default_value = "other")]
        kind: String,
    },

    /// Count layers under the selection named like a field
    Count { field: String },

    /// Audit the selection against the design system
    Audit {
        /// components, styles or text-styles
        kind: AuditKind,

        /// Bind unstyled layers to matching styles
        #[arg(long)]
        fix: bool,
    },

    /// Compare the selection's text against an outline file
    Compare {
        #[arg(long)]
        outline: String,
    },

    /// Collect the selection's text for spell checking
    SpellCheck,

    /// Answer JSON-lines requests from stdin until EOF
    Serve,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `canvas-assist.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub outline: OutlineConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_min_size")]
    pub min_size: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            min_size: default_min_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    #[serde(default = "default_label")]
    pub default_label: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_label: default_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    pub state_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JournalConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_timeout() -> u64 { 10 }
fn default_min_size() -> u32 { MIN_IMAGE_SIZE }
fn default_label() -> String { DEFAULT_LABEL.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("canvas-assist.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Journal path: `--journal` wins over the config file.
pub fn resolve_journal_path<'a>(cli: &'a Cli, config: &'a AppConfig) -> Option<&'a str> {
    cli.journal.as_deref().or(config.journal.path.as_deref())
}
