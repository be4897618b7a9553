use serde::{Deserialize, Serialize};

/// Value the engine reports for the `prefers-color-scheme` media query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredColorScheme {
    Light,
    Dark,
    /// Follow the operating system setting.
    #[default]
    System,
}
