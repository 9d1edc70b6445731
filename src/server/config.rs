//! Endpoint configuration

/// Configuration for a GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Accept batch arrays in request bodies
    pub batching_enabled: bool,

    /// Maximum number of requests per batch, `None` for unbounded
    pub max_batch_size: Option<usize>,
}

impl EndpointConfig {
    /// Create a configuration accepting unbounded batches
    pub fn new() -> Self {
        Self {
            batching_enabled: true,
            max_batch_size: None,
        }
    }

    /// Enable or disable batch arrays
    pub fn with_batching(mut self, enabled: bool) -> Self {
        self.batching_enabled = enabled;
        self
    }

    /// Set the maximum batch size
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EndpointConfig::default();
        assert!(config.batching_enabled);
        assert_eq!(config.max_batch_size, None);
    }

    #[test]
    fn test_with_options() {
        let config = EndpointConfig::new()
            .with_batching(false)
            .with_max_batch_size(10);
        assert!(!config.batching_enabled);
        assert_eq!(config.max_batch_size, Some(10));
    }
}
