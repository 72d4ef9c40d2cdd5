//! Configuration for commerce service module

use serde::{Deserialize, Serialize};

/// Commerce service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Upper bound on the number of lines in a single order
    #[serde(default = "default_max_items_per_order")]
    pub max_items_per_order: usize,

    /// Insert demo users, categories and products after migrating an empty database
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items_per_order: default_max_items_per_order(),
            seed_demo_data: false,
        }
    }
}

fn default_max_items_per_order() -> usize {
    100
}
