//! Ingestion pipeline main entry

use std::collections::HashMap;
use std::sync::Arc;

use async_channel::{bounded, Receiver, Sender};
use contracts::{PoseFrame, PoseSource};
use tracing::{debug, info, instrument};

use crate::adapter::SourceAdapter;
use crate::config::{BackpressureConfig, IngestionMetrics};
use crate::generic_adapter::GenericSourceAdapter;

/// Ingestion pipeline
///
/// Manages registered source adapters and multiplexes their frames into
/// one bounded channel.
pub struct IngestionPipeline {
    /// Registered adapters
    adapters: HashMap<String, Box<dyn SourceAdapter>>,

    /// Shared metrics
    metrics: Arc<IngestionMetrics>,

    /// Frame sender (shared by all adapters)
    tx: Sender<PoseFrame>,

    /// Frame receiver
    rx: Option<Receiver<PoseFrame>>,

    /// Default backpressure configuration
    default_config: BackpressureConfig,
}

impl IngestionPipeline {
    /// Create a new pipeline
    ///
    /// # Arguments
    /// * `channel_capacity` - Channel capacity
    pub fn new(channel_capacity: usize) -> Self {
        let (tx, rx) = bounded(channel_capacity);

        Self {
            adapters: HashMap::new(),
            metrics: Arc::new(IngestionMetrics::new()),
            tx,
            rx: Some(rx),
            default_config: BackpressureConfig {
                channel_capacity,
                ..Default::default()
            },
        }
    }

    /// Create with a custom backpressure configuration
    pub fn with_config(config: BackpressureConfig) -> Self {
        let (tx, rx) = bounded(config.channel_capacity);

        Self {
            adapters: HashMap::new(),
            metrics: Arc::new(IngestionMetrics::new()),
            tx,
            rx: Some(rx),
            default_config: config,
        }
    }

    /// Register a pose data source
    ///
    /// # Arguments
    /// * `source_id` - Source configuration ID
    /// * `source` - Data source implementing the `PoseSource` trait
    /// * `config` - Optional backpressure configuration
    #[instrument(
        name = "ingestion_register_pose_source",
        skip(self, source, config),
        fields(source_id = %source_id)
    )]
    pub fn register_pose_source(
        &mut self,
        source_id: String,
        source: Box<dyn PoseSource>,
        config: Option<BackpressureConfig>,
    ) {
        let adapter = GenericSourceAdapter::new(
            source_id.clone(),
            source,
            config.unwrap_or_else(|| self.default_config.clone()),
        );
        debug!(source_id = %source_id, "registered pose source");
        self.adapters.insert(source_id, Box::new(adapter));
    }

    /// Start all registered sources
    #[instrument(name = "ingestion_start_all", skip(self))]
    pub fn start_all(&self) {
        info!(count = self.adapters.len(), "starting all source adapters");
        for (source_id, adapter) in &self.adapters {
            if !adapter.is_listening() {
                debug!(source_id = %source_id, "starting adapter");
                adapter.start(self.tx.clone(), self.metrics.clone());
            }
        }
    }

    /// Stop all sources
    #[instrument(name = "ingestion_stop_all", skip(self))]
    pub fn stop_all(&self) {
        info!(count = self.adapters.len(), "stopping all source adapters");
        for (source_id, adapter) in &self.adapters {
            if adapter.is_listening() {
                debug!(source_id = %source_id, "stopping adapter");
                adapter.stop();
            }
        }
    }

    /// Take the frame receiver
    ///
    /// Can only be called once; subsequent calls return None.
    pub fn take_receiver(&mut self) -> Option<Receiver<PoseFrame>> {
        self.rx.take()
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> Arc<IngestionMetrics> {
        self.metrics.clone()
    }

    /// Number of registered sources
    pub fn source_count(&self) -> usize {
        self.adapters.len()
    }

    /// Check whether a source is listening
    pub fn is_source_listening(&self, source_id: &str) -> bool {
        self.adapters
            .get(source_id)
            .map(|a| a.is_listening())
            .unwrap_or(false)
    }
}

impl Drop for IngestionPipeline {
    fn drop(&mut self) {
        self.stop_all();
    }
}
