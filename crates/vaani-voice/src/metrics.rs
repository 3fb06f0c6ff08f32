//! Metrics observers for provider handles.
//!
//! Every event a provider emits is handed to a [`MetricsSink`] on its own
//! spawned task. Nothing waits on those tasks, their order is unspecified,
//! and a sink that panics only takes down the task for that one event.

use crate::provider::{EventCallback, SharedHandle};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, Instrument, Span};
use vaani_types::MetricsKind;

/// One metrics payload tagged with the provider family that emitted it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsEvent {
    pub kind: MetricsKind,
    pub data: serde_json::Value,
}

#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn record(&self, event: MetricsEvent);
}

/// Writes metrics as log lines tagged with the metric type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetricsSink;

#[async_trait]
impl MetricsSink for TracingMetricsSink {
    async fn record(&self, event: MetricsEvent) {
        match event.kind {
            // VAD fires on every speech boundary.
            MetricsKind::Vad => debug!(metric = event.kind.label(), data = %event.data, "VAD event"),
            kind => info!(
                metric = kind.label(),
                data = %event.data,
                "{} Metrics: {}",
                kind.label(),
                event.data
            ),
        }
    }
}

/// Subscribes call-scoped metrics callbacks to provider handles.
#[derive(Clone)]
pub struct MetricsObserver {
    sink: Arc<dyn MetricsSink>,
    runtime: Handle,
    span: Span,
}

impl MetricsObserver {
    /// Creates an observer that spawns onto `runtime`, inside `span`.
    pub fn new(sink: Arc<dyn MetricsSink>, runtime: Handle, span: Span) -> Self {
        Self {
            sink,
            runtime,
            span,
        }
    }

    /// Builds the fire-and-forget callback for one metric type.
    pub fn callback(&self, kind: MetricsKind) -> EventCallback {
        let sink = self.sink.clone();
        let runtime = self.runtime.clone();
        let span = self.span.clone();
        Arc::new(move |data: serde_json::Value| {
            let sink = sink.clone();
            runtime.spawn(
                async move { sink.record(MetricsEvent { kind, data }).await }
                    .instrument(span.clone()),
            );
        })
    }

    /// Attaches `kinds` to `handle` if it is observable.
    ///
    /// Returns the kinds actually attached.
    pub fn attach(&self, handle: &SharedHandle, kinds: &[MetricsKind]) -> Vec<MetricsKind> {
        let Some(observable) = handle.as_observable() else {
            debug!(provider = %handle.kind(), "provider is not observable, skipping metrics");
            return Vec::new();
        };
        for &kind in kinds {
            observable.on(kind.event_name(), self.callback(kind));
        }
        kinds.to_vec()
    }
}

impl std::fmt::Debug for MetricsObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsObserver").finish_non_exhaustive()
    }
}
