//! Tracing subscriber initialization for programs that drive the builders.
//!
//! The builders log record creation, replacement and appends under the
//! `cxbuild_core` target. Without `RUST_LOG`, only `info` and above from
//! that target are shown; replacements of a held record log at `warn`.
//!
//! # Usage
//!
//! ```no_run
//! use cxbuild_observe::tracing_setup::{TracingOptions, init_tracing};
//!
//! init_tracing(&TracingOptions::default()).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::OnceLock;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "cxbuild_core=info";

/// Kept so `shutdown_tracing` can flush it on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// How the global subscriber is assembled.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Also export spans through a stdout OpenTelemetry exporter.
    pub enable_otel: bool,
    /// One JSON object per event instead of the human-readable format.
    pub json: bool,
    /// Fallback filter when `RUST_LOG` gives none.
    pub default_directive: String,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            enable_otel: false,
            json: false,
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

/// Build the event filter from a `RUST_LOG` value, falling back to
/// `default_directive` when the value is absent or does not parse.
pub fn build_filter(rust_log: Option<&str>, default_directive: &str) -> EnvFilter {
    rust_log
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}

/// Install the global tracing subscriber.
///
/// The subscriber is installed before any OpenTelemetry provider is
/// registered, so a failed call leaves the global provider untouched.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = build_filter(rust_log.as_deref(), &options.default_directive);

    let (text_layer, json_layer) = if options.json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(true)))
    } else {
        (Some(tracing_subscriber::fmt::layer().with_target(true)), None)
    };

    let provider = options.enable_otel.then(|| {
        SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build()
    });
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer("cxbuild")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    if let Some(provider) = provider {
        TRACER_PROVIDER
            .set(provider.clone())
            .map_err(|_| "tracer provider already registered")?;
        opentelemetry::global::set_tracer_provider(provider);
    }

    Ok(())
}

/// Flush and shut down the OpenTelemetry provider, if one was installed.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
