//! Prerequisite status types.

/// The result of probing a prerequisite binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteStatus {
    /// The binary could be launched. Its exit status is not considered.
    Present {
        /// Version parsed from the version query output, when recognizable.
        version: Option<String>,
    },

    /// The binary could not be located at all.
    Absent,
}

impl PrerequisiteStatus {
    /// Whether the binary was found.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    /// The detected version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Present { version } => version.as_deref(),
            Self::Absent => None,
        }
    }
}
