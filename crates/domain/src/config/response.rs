use serde::{Deserialize, Serialize};

pub const DEFAULT_HELP_TEXT: &str = "Query the PyCon schedule with DNS!";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseConfig {
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Largest IP payload carried by one frame before the reply is fragmented.
    #[serde(default = "default_fragment_size")]
    pub fragment_size: usize,

    /// Sent as the only TXT line when a query matches nothing.
    #[serde(default = "default_help_text")]
    pub help_text: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            fragment_size: default_fragment_size(),
            help_text: default_help_text(),
        }
    }
}

fn default_ttl() -> u32 {
    60
}

fn default_fragment_size() -> usize {
    512
}

fn default_help_text() -> String {
    DEFAULT_HELP_TEXT.to_string()
}
