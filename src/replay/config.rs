//! Replay Options

/// Options for [`Replayer`](super::Replayer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Also report each element's namespace declarations as `xmlns` /
    /// `xmlns:prefix` attributes
    pub namespace_attributes: bool,
    /// Deliver `start_prefix_mapping` / `end_prefix_mapping` callbacks
    pub namespace_mappings: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            namespace_attributes: false,
            namespace_mappings: true,
        }
    }
}

impl ReplayConfig {
    pub fn with_namespace_attributes(mut self, enabled: bool) -> Self {
        self.namespace_attributes = enabled;
        self
    }

    pub fn with_namespace_mappings(mut self, enabled: bool) -> Self {
        self.namespace_mappings = enabled;
        self
    }
}
