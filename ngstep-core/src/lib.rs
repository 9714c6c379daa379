//! Embeddable core library for ngstep.
//!
//! Provides a clap-free, I/O-abstracted migration loop that walks a project
//! one Angular major version at a time.
//!
//! # Port traits
//!
//! Everything outside the project tree goes through the traits in [`ports`]:
//! - [`UpgradeTool`](ports::UpgradeTool) runs the package upgrade for a step
//! - [`StepGate`](ports::StepGate) asks whether to upgrade or continue
//! - [`WritePort`](ports::WritePort) writes report files
//! - [`StepObserver`](ports::StepObserver) hears about progress
//!
//! The [`adapters`] module provides default implementations.
//!
//! # Entry points
//!
//! - [`run_migration`](pipeline::run_migration) runs every step from the
//!   current version up to the target
//! - [`detect_current_major`](version::detect_current_major) reads the
//!   installed Angular version

pub mod adapters;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod settings;
pub mod version;

pub use error::MigrationError;

// Re-exported so embedders can register their own rules.
pub use ngstep_rules::{FallbackRule, RepoView, Rule, RuleRegistry};
