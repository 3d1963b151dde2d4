//! Telemetry helpers for applications embedding `chart-axis`.
//!
//! The axis core only emits `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is an opt-in shortcut for tools and
//! tests that want the events printed.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from `RUST_LOG` and falls back to `warn`, which surfaces
/// guard trips (tick-count caps, timeline stabilisation caps) without the
/// per-pass `debug!` noise.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
