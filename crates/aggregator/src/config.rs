//! Configuration for the status aggregator.

/// Name of the composite target the aggregate is written to.
pub const DEFAULT_TARGET_NAME: &str = "platform-operators-aggregated";

/// Default capacity of the trigger channel.
const DEFAULT_TRIGGER_BUFFER: usize = 64;

/// Configuration for the aggregator and its service loop.
#[derive(Clone, Debug)]
pub struct AggregatorConfig {
    /// Name of the composite target.
    pub target_name: String,

    /// Capacity of the channel feeding change notifications to the service.
    pub trigger_buffer: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            target_name: DEFAULT_TARGET_NAME.to_string(),
            trigger_buffer: DEFAULT_TRIGGER_BUFFER,
        }
    }
}
