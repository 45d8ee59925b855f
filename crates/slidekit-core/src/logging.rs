#![forbid(unsafe_code)]

//! Diagnostics gate.
//!
//! Every diagnostic the transition engine emits goes through the
//! `slide_*!` macros, which check one process-wide flag before forwarding to
//! `tracing`. The flag defaults to off; a host turns it on with
//! [`set_diagnostics_enabled`] while debugging transitions.
//!
//! ```ignore
//! slidekit_core::set_diagnostics_enabled(true);
//! slide_debug!(target: "slidekit.driver", op = ?op, "configured");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

#[doc(hidden)]
pub use tracing;

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn transition diagnostics on or off for the whole process.
pub fn set_diagnostics_enabled(enabled: bool) {
    DIAGNOSTICS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether transition diagnostics are currently emitted.
#[inline]
#[must_use]
pub fn diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::Relaxed)
}

/// `tracing::debug!` behind the diagnostics gate.
#[macro_export]
macro_rules! slide_debug {
    ($($arg:tt)+) => {
        if $crate::logging::diagnostics_enabled() {
            $crate::logging::tracing::debug!($($arg)+);
        }
    };
}

/// `tracing::info!` behind the diagnostics gate.
#[macro_export]
macro_rules! slide_info {
    ($($arg:tt)+) => {
        if $crate::logging::diagnostics_enabled() {
            $crate::logging::tracing::info!($($arg)+);
        }
    };
}

/// `tracing::warn!` behind the diagnostics gate.
#[macro_export]
macro_rules! slide_warn {
    ($($arg:tt)+) => {
        if $crate::logging::diagnostics_enabled() {
            $crate::logging::tracing::warn!($($arg)+);
        }
    };
}

/// `tracing::error!` behind the diagnostics gate. Used for protocol
/// violations by the host.
#[macro_export]
macro_rules! slide_error {
    ($($arg:tt)+) => {
        if $crate::logging::diagnostics_enabled() {
            $crate::logging::tracing::error!($($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    struct LevelCapture(Arc<Mutex<Vec<tracing::Level>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelCapture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn enabled_gate_forwards_to_tracing() {
        set_diagnostics_enabled(true);
        assert!(diagnostics_enabled());

        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelCapture(levels.clone()));
        tracing::subscriber::with_default(subscriber, || {
            crate::slide_debug!(target: "slidekit.test", value = 1, "debug");
            crate::slide_info!("info");
            crate::slide_warn!("warn");
            crate::slide_error!(reason = "test", "error");
        });

        let levels = levels.lock().unwrap();
        assert_eq!(
            *levels,
            vec![
                tracing::Level::DEBUG,
                tracing::Level::INFO,
                tracing::Level::WARN,
                tracing::Level::ERROR,
            ]
        );
    }
}
