//! Install stages and outcomes.

use std::fmt;

/// The states of an install run, in the order they are entered.
///
/// There is no branching back: each stage runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstallStage {
    CheckPrerequisite,
    Scaffold,
    EnterProjectDirectory,
    InstallBaseDependencies,
    InstallExtraDependencies,
    EmitInstructions,
}

impl InstallStage {
    /// Every stage, in execution order.
    pub const ALL: [InstallStage; 6] = [
        InstallStage::CheckPrerequisite,
        InstallStage::Scaffold,
        InstallStage::EnterProjectDirectory,
        InstallStage::InstallBaseDependencies,
        InstallStage::InstallExtraDependencies,
        InstallStage::EmitInstructions,
    ];

    /// Short identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckPrerequisite => "check_prerequisite",
            Self::Scaffold => "scaffold",
            Self::EnterProjectDirectory => "enter_project_directory",
            Self::InstallBaseDependencies => "install_base_dependencies",
            Self::InstallExtraDependencies => "install_extra_dependencies",
            Self::EmitInstructions => "emit_instructions",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an install run ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Every stage ran; instructions were printed.
    Completed,
    /// The prerequisite binary was not found. Nothing was touched.
    PrerequisiteMissing,
    /// The scaffolding command exited non-zero.
    ScaffoldFailed { code: i32 },
}

impl InstallOutcome {
    /// Whether the run reached the final stage.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
