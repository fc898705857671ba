//! Decode-time limits.

/// Largest section length accepted by default.
pub const DEFAULT_MAX_SECTION_LENGTH: u64 = i32::MAX as u64;

/// Options applied while reading a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum length of the authentication and metadata sections, each
    /// (default: `i32::MAX`).
    ///
    /// Both sections are buffered in memory, so this bounds the allocation
    /// a hostile header can cause.
    pub max_section_length: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_section_length: DEFAULT_MAX_SECTION_LENGTH,
        }
    }
}

impl ReadOptions {
    /// Create read options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-section length bound (builder pattern).
    pub fn with_max_section_length(mut self, length: u64) -> Self {
        self.max_section_length = length;
        self
    }

    /// Validate options.
    pub fn validate(&self) -> Result<(), ReadOptionsError> {
        if self.max_section_length == 0 {
            return Err(ReadOptionsError::ZeroSectionLength);
        }
        if self.max_section_length > DEFAULT_MAX_SECTION_LENGTH {
            return Err(ReadOptionsError::SectionLengthTooLarge(
                self.max_section_length,
            ));
        }
        Ok(())
    }

    /// Create options with a small bound for tests.
    pub fn for_testing() -> Self {
        ReadOptions {
            max_section_length: 64 * 1024, // 64KB
        }
    }
}

/// Read option errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadOptionsError {
    /// Section bound of zero would reject every container.
    #[error("Maximum section length must be positive")]
    ZeroSectionLength,

    /// Section bound exceeds what the format permits.
    #[error("Maximum section length {0} exceeds {max}", max = DEFAULT_MAX_SECTION_LENGTH)]
    SectionLengthTooLarge(u64),
}
