//! Injectable diagnostics sink for development-mode advisories.
//!
//! Widgets report usage advisories (misconfigurations that work but deserve a
//! heads-up) to a [`Diagnostics`] sink supplied at construction. The widget
//! calls the sink unconditionally; whether anything is surfaced — logged,
//! printed, ignored — is the host's decision. This keeps widgets free of
//! environment probing.

use std::sync::{Arc, Mutex};

/// A usage advisory: non-fatal, behavior continues unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    /// Stable machine-readable code, e.g. `"combo.owned-candidates-creation"`.
    pub code: &'static str,
    /// Human-readable detail for whoever surfaces the advisory.
    pub detail: String,
}

impl Advisory {
    /// Create an advisory with the given code and detail text.
    pub fn new(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }
}

/// Receiver for widget advisories.
pub trait Diagnostics: Send {
    /// Deliver one advisory. Implementations must not panic.
    fn advise(&self, advisory: Advisory);
}

/// Discards every advisory. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn advise(&self, _advisory: Advisory) {}
}

/// Accumulates advisories for inspection; intended for tests and hosts that
/// surface advisories out-of-band.
#[derive(Debug, Default, Clone)]
pub struct CollectDiagnostics {
    advisories: Arc<Mutex<Vec<Advisory>>>,
}

impl CollectDiagnostics {
    /// Create an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything collected so far.
    pub fn advisories(&self) -> Vec<Advisory> {
        self.advisories.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Whether an advisory with the given code was collected.
    pub fn has(&self, code: &str) -> bool {
        self.advisories().iter().any(|a| a.code == code)
    }
}

impl Diagnostics for CollectDiagnostics {
    fn advise(&self, advisory: Advisory) {
        if let Ok(mut advisories) = self.advisories.lock() {
            advisories.push(advisory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_discards() {
        NullDiagnostics.advise(Advisory::new("x", "ignored"));
    }

    #[test]
    fn collect_sink_accumulates() {
        let sink = CollectDiagnostics::new();
        sink.advise(Advisory::new("a", "first"));
        sink.advise(Advisory::new("b", "second"));
        let advisories = sink.advisories();
        assert_eq!(advisories.len(), 2);
        assert_eq!(advisories[0].code, "a");
        assert!(sink.has("b"));
        assert!(!sink.has("c"));
    }

    #[test]
    fn collect_sink_clones_share_storage() {
        let sink = CollectDiagnostics::new();
        let clone = sink.clone();
        clone.advise(Advisory::new("shared", "via clone"));
        assert!(sink.has("shared"));
    }
}
