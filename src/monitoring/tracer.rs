/*!
 * Tracing Setup
 * Structured logging for registries and cells using the tracing crate
 *
 * Features:
 * - EnvFilter driven by RUST_LOG
 * - Compact human-readable or JSON output
 * - Wait spans that time how long a caller blocked on a cell
 */

use crate::cell::BroadcastCell;
use crate::core::limits::{ENV_TRACE_JSON, SLOW_WAIT_THRESHOLD};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Install the global subscriber
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - RENDEZVOUS_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        debug!(json = use_json, "tracing initialized");
    }
    installed
}

/// Span timing one blocking wait on a cell
///
/// Logs on drop; waits longer than `SLOW_WAIT_THRESHOLD` are reported at
/// warn level.
pub struct WaitSpan {
    span: tracing::Span,
    start: Instant,
    label: String,
}

impl WaitSpan {
    pub fn new(label: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "cell_wait",
            label = label,
            waited_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            label: label.to_string(),
        }
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for WaitSpan {
    fn drop(&mut self) {
        let waited = self.start.elapsed();
        self.span.record("waited_us", waited.as_micros() as u64);
        let _entered = self.span.enter();

        if waited > SLOW_WAIT_THRESHOLD {
            warn!(
                label = %self.label,
                waited_ms = waited.as_millis() as u64,
                slow = true,
                "slow cell wait"
            );
        } else {
            debug!(
                label = %self.label,
                waited_us = waited.as_micros() as u64,
                "cell wait completed"
            );
        }
    }
}

/// Block on `cell` inside a [`WaitSpan`]
pub fn wait_traced<V, C>(cell: &C, label: &str) -> Arc<V>
where
    V: Send + Sync + 'static,
    C: BroadcastCell<V> + ?Sized,
{
    let span = WaitSpan::new(label);
    let _entered = span.enter();
    cell.wait()
}
