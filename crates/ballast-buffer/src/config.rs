//! Buffer configuration parameters.

use std::fmt;
use std::sync::Arc;

use ballast_core::{BufferError, SharedSink};

use crate::sink::NullSink;

/// What the drop backstop prints when it reclaims a leaked buffer.
///
/// The reclaim event is always sent to the configured sink; this only
/// controls the extra stderr line, which debug builds emit and release
/// builds compile out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeakDiagnostics {
    /// No stderr output.
    Silent,
    /// Print one line per reclaimed buffer (debug builds only).
    Warn,
}

impl LeakDiagnostics {
    /// `Warn` in debug builds, `Silent` otherwise.
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Warn
        } else {
            Self::Silent
        }
    }
}

impl Default for LeakDiagnostics {
    fn default() -> Self {
        Self::for_build()
    }
}

/// Configuration shared by every buffer created from it.
///
/// Cheap to clone: the sink is reference-counted. Validated on every
/// buffer construction.
#[derive(Clone)]
pub struct BufferConfig {
    /// Largest buffer, in bytes, that construction will accept.
    ///
    /// Default: 1 GiB. Must be non-zero and no larger than `isize::MAX`.
    pub max_len: usize,

    /// Stderr diagnostic for buffers reclaimed by the drop backstop.
    pub leak_diagnostics: LeakDiagnostics,

    /// Receiver for allocation, release, and reclaim events.
    ///
    /// Default: [`NullSink`].
    pub sink: SharedSink,
}

impl BufferConfig {
    /// Default maximum buffer length: 1 GiB.
    pub const DEFAULT_MAX_LEN: usize = 1 << 30;

    /// Create a config with default limits and a [`NullSink`].
    pub fn new() -> Self {
        Self {
            max_len: Self::DEFAULT_MAX_LEN,
            leak_diagnostics: LeakDiagnostics::for_build(),
            sink: Arc::new(NullSink),
        }
    }

    /// Replace the event sink.
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the maximum buffer length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Replace the leak diagnostic mode.
    pub fn with_leak_diagnostics(mut self, mode: LeakDiagnostics) -> Self {
        self.leak_diagnostics = mode;
        self
    }

    /// Check the configuration itself.
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.max_len == 0 {
            return Err(BufferError::invalid("max_len must be non-zero"));
        }
        if self.max_len > isize::MAX as usize {
            return Err(BufferError::invalid(format!(
                "max_len {} exceeds isize::MAX",
                self.max_len
            )));
        }
        Ok(())
    }

    /// Check a requested buffer length against this configuration.
    pub fn check_len(&self, len: usize) -> Result<(), BufferError> {
        if len == 0 {
            return Err(BufferError::invalid("length must be positive"));
        }
        if len > self.max_len {
            return Err(BufferError::invalid(format!(
                "length {len} exceeds max_len {}",
                self.max_len
            )));
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferConfig")
            .field("max_len", &self.max_len)
            .field("leak_diagnostics", &self.leak_diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_len_is_one_gib() {
        let config = BufferConfig::new();
        assert_eq!(config.max_len, 1024 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn leak_diagnostics_follow_build_profile() {
        let expected = if cfg!(debug_assertions) {
            LeakDiagnostics::Warn
        } else {
            LeakDiagnostics::Silent
        };
        assert_eq!(BufferConfig::default().leak_diagnostics, expected);
    }

    #[test]
    fn zero_max_len_rejected() {
        let config = BufferConfig::new().with_max_len(0);
        assert!(matches!(
            config.validate(),
            Err(BufferError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn max_len_above_isize_rejected() {
        let config = BufferConfig::new().with_max_len(usize::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn check_len_bounds() {
        let config = BufferConfig::new().with_max_len(16);
        assert!(config.check_len(0).is_err());
        assert!(config.check_len(1).is_ok());
        assert!(config.check_len(16).is_ok());
        assert!(config.check_len(17).is_err());
    }

    #[test]
    fn debug_omits_sink() {
        let rendered = format!("{:?}", BufferConfig::new());
        assert!(rendered.contains("max_len"));
        assert!(!rendered.contains("sink"));
    }
}
