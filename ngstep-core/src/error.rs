use ngstep_types::VersionTransition;

/// Errors that stop a migration. Exit code 2 = bad user input, 1 = failure.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("target version must be higher than current version ({from}), got {to}")]
    InvalidRange { from: u32, to: u32 },

    #[error("'{0}' is not a valid version number")]
    InvalidTarget(String),

    #[error("cannot detect Angular version: {0}")]
    VersionDetection(String),

    #[error("ng update failed for {step} ({})", exit_label(.code))]
    UpgradeFailed {
        step: VersionTransition,
        code: Option<i32>,
    },

    #[error("step {step} failed: {source:#}")]
    StepFailed {
        step: VersionTransition,
        source: anyhow::Error,
    },

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl MigrationError {
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrationError::InvalidRange { .. }
            | MigrationError::InvalidTarget(_)
            | MigrationError::VersionDetection(_) => 2,
            MigrationError::UpgradeFailed { .. }
            | MigrationError::StepFailed { .. }
            | MigrationError::Internal(_) => 1,
        }
    }

    /// The step the run stopped at, when the error happened inside one.
    pub fn step(&self) -> Option<VersionTransition> {
        match self {
            MigrationError::UpgradeFailed { step, .. } | MigrationError::StepFailed { step, .. } => {
                Some(*step)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn step_errors_name_the_step() {
        let err = MigrationError::StepFailed {
            step: VersionTransition::new(12),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(err.to_string(), "step 12 → 13 failed: boom");
        assert_eq!(err.exit_code(), 1);

        let err = MigrationError::UpgradeFailed {
            step: VersionTransition::new(15),
            code: Some(3),
        };
        assert_eq!(err.to_string(), "ng update failed for 15 → 16 (exit code 3)");
        assert_eq!(err.step(), Some(VersionTransition::new(15)));
    }

    #[test]
    fn input_errors_exit_with_two() {
        assert_eq!(MigrationError::InvalidRange { from: 14, to: 12 }.exit_code(), 2);
        assert_eq!(MigrationError::InvalidTarget("v15".into()).exit_code(), 2);
    }
}
