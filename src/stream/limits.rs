// Bounds applied while decoding untrusted bytes.
// Serializable
// Explicit defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StreamLimits {
    pub max_string_bytes: usize,
    pub max_collection_len: usize,
    pub max_depth: usize,
}

impl StreamLimits {
    pub fn v0() -> Self {
        Self {
            max_string_bytes: 1 << 20,
            max_collection_len: 1 << 16,
            max_depth: 32,
        }
    }
}

impl Default for StreamLimits {
    fn default() -> Self {
        Self::v0()
    }
}
