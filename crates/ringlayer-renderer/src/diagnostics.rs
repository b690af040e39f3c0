/// Log target for viewport-sync traces.
pub const SYNC_TARGET: &str = "ringlayer::sync";

/// Trace switch injected into the engine and layer at construction.
///
/// High-frequency recomputation traces go through [`Diagnostics::trace`] and
/// are dropped unless enabled. Lifecycle logging does not depend on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    enabled: bool,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn trace(&self, args: std::fmt::Arguments<'_>) {
        if self.enabled {
            log::debug!(target: SYNC_TARGET, "{}", args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        assert!(!Diagnostics::default().is_enabled());
        assert!(Diagnostics::new(true).is_enabled());
        // Disabled traces are dropped without touching the logger.
        Diagnostics::disabled().trace(format_args!("pan {}", 1));
    }
}
