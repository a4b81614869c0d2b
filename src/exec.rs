//! Ordered, blocking execution of sync plans.
//!
//! Plans execute on a best-effort basis: a failing command is reported and
//! the remaining actions still run, so a failed push never blocks the pull
//! that follows it. The one hard error is a program that is not installed
//! at all, caught before the first action so a plan cannot half-run for a
//! missing tool.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::plan::SyncPlan;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("'{0}' is not installed or not on PATH; install it before syncing")]
    MissingProgram(String),
}

/// Runs a plan's actions in order, inheriting stdio so the underlying tools
/// can talk to the operator (interactive conflict prompts, progress output).
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor {
    show_plan: bool,
    verbose: bool,
}

impl Executor {
    pub fn new(show_plan: bool, verbose: bool) -> Self {
        Self { show_plan, verbose }
    }

    /// Execute one plan.
    ///
    /// Header lines always print. Command lines print in show-plan and
    /// verbose modes; in show-plan mode nothing is spawned.
    pub fn run(&self, plan: &SyncPlan) -> Result<(), ExecError> {
        for line in &plan.headers {
            println!("{line}");
        }

        if !self.show_plan {
            self.ensure_programs(plan)?;
        }

        for action in &plan.actions {
            if self.show_plan || self.verbose {
                println!("{}", action.command);
            }
            if self.show_plan {
                continue;
            }

            match action.command.to_command().status() {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    tracing::warn!(
                        command = %action.command,
                        code = ?status.code(),
                        "command exited with failure"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        command = %action.command,
                        error = %err,
                        "failed to run command"
                    );
                }
            }
        }

        Ok(())
    }

    /// Check every program the plan needs before running any of it.
    fn ensure_programs(&self, plan: &SyncPlan) -> Result<(), ExecError> {
        let mut checked = BTreeSet::new();
        for action in &plan.actions {
            let program = action.command.program();
            if checked.insert(program) && which::which(program).is_err() {
                return Err(ExecError::MissingProgram(program.to_string()));
            }
        }
        Ok(())
    }
}
