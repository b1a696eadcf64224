// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tracing setup for applications embedding `chronoframe`.
//!
//! Events emitted by the crate:
//!
//! | Level | Event |
//! |-------|-------|
//! | `debug` | playback started, paused, or stopped at the range's upper bound |
//! | `debug` | displayed date, committed range or timespan replaced |
//! | `debug` | date text rejected by `parse_at_precision` |
//! | `trace` | live range moved during a drag |
//! | `warn` | date arithmetic saturated at chrono's representable range |
//!
//! Hosts either call [`init_default_tracing`] or install their own
//! subscriber.

/// Default filter when `RUST_LOG` is unset. Navigation and playback events
/// are `debug`, so only saturation warnings show up by default.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "info";

/// Installs a compact subscriber honouring `RUST_LOG` when the `telemetry`
/// feature is enabled. `RUST_LOG=chronoframe=debug` shows every playback
/// transition and committed navigation change.
///
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
