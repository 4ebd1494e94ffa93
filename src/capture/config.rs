//! Capture Options

/// Options for [`Capture`](super::Capture)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Drop `xmlns` / `xmlns:*` attributes reported alongside prefix mappings
    pub skip_namespace_attributes: bool,
    /// Release spare buffer capacity when the capture is finished
    pub shrink_on_finish: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            skip_namespace_attributes: true,
            shrink_on_finish: true,
        }
    }
}

impl CaptureConfig {
    pub fn with_skip_namespace_attributes(mut self, skip: bool) -> Self {
        self.skip_namespace_attributes = skip;
        self
    }

    pub fn with_shrink_on_finish(mut self, shrink: bool) -> Self {
        self.shrink_on_finish = shrink;
        self
    }
}
