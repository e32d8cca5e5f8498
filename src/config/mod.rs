mod model;
mod persistence;

pub use model::{CloseButtonPolicy, HideAnimationConfig, StripConfig, TabLocation};
pub use persistence::{config_base_dir, load_config, load_config_from, save_config, save_config_to};

/// Typed failures of configuration parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse strip config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
