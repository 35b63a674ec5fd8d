//! Line, name and queue limits configuration.

use relay_proto::line::DEFAULT_MAX_LINE_LEN;
use relay_proto::name::DEFAULT_NAME_MAX_LEN;
use serde::Deserialize;

/// Limits applied per connection.
///
/// These keep a single misbehaving or slow client from exhausting server
/// memory.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum inbound line length in bytes, excluding the newline (default: 4096).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Maximum display-name length in characters (default: 32).
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Outbound queue capacity in lines per connection (default: 1024).
    /// A client whose queue overflows is disconnected (SendQ exceeded).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            max_name_len: default_max_name_len(),
            outbound_queue: default_outbound_queue(),
        }
    }
}

fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_max_name_len() -> usize {
    DEFAULT_NAME_MAX_LEN
}

fn default_outbound_queue() -> usize {
    1024
}
