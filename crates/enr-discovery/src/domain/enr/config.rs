//! ENR configuration.

/// ENR decoding limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrConfig {
    /// Maximum size of an encoded record (bytes)
    pub max_record_size: usize,
}

impl Default for EnrConfig {
    fn default() -> Self {
        Self {
            max_record_size: 300,
        }
    }
}
