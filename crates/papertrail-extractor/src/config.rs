//! Configuration for the extraction pipeline

use papertrail_domain::{Budget, FieldSpec};
use serde::{Deserialize, Serialize};

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Token budget governing every completion call
    #[serde(default)]
    pub budget: Budget,

    /// Fields to extract from every document
    #[serde(default)]
    pub fields: FieldSpec,

    /// Maximum summarization passes before declaring the budget unreachable
    #[serde(default = "default_max_reduction_passes")]
    pub max_reduction_passes: usize,
}

fn default_max_reduction_passes() -> usize {
    8
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.budget.validate()?;
        if self.fields.is_empty() {
            return Err("at least one extraction field is required".to_string());
        }
        if self.max_reduction_passes == 0 {
            return Err("max_reduction_passes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    /// Defaults sized for a 4k-context completion model
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            fields: FieldSpec::default(),
            max_reduction_passes: default_max_reduction_passes(),
        }
    }
}
