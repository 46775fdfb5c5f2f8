//! Run configuration.

use serde::{Deserialize, Serialize};

/// Byte stored in A when a read hits end of input, unless configured otherwise.
/// This is C's `EOF` (-1) truncated to a byte.
pub const DEFAULT_EOF_BYTE: u8 = 0xff;

/// What the read instruction does at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "byte")]
pub enum EofPolicy {
    /// Store this byte in A.
    Sentinel(u8),
    /// Leave A as it was.
    Unchanged,
}

impl Default for EofPolicy {
    fn default() -> Self {
        EofPolicy::Sentinel(DEFAULT_EOF_BYTE)
    }
}

/// Knobs for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmConfig {
    /// End-of-input behaviour for the read instruction.
    pub eof: EofPolicy,
    /// Stop after this many fetched source bytes, inert ones included. `None`
    /// runs until the source pointer leaves the source pool.
    pub step_limit: Option<u64>,
}

impl VmConfig {
    /// Set the end-of-input policy.
    pub fn with_eof(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    /// Cap the number of fetched source bytes.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded_with_ff_sentinel() {
        let config = VmConfig::default();
        assert_eq!(config.eof, EofPolicy::Sentinel(0xff));
        assert_eq!(config.step_limit, None);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: VmConfig = serde_json::from_str(r#"{"step_limit": 10}"#).unwrap();
        assert_eq!(config, VmConfig::default().with_step_limit(10));

        let config: VmConfig =
            serde_json::from_str(r#"{"eof": {"policy": "unchanged"}}"#).unwrap();
        assert_eq!(config.eof, EofPolicy::Unchanged);
    }
}
