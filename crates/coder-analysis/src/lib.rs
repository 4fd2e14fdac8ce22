//! # coder-analysis — Project Analysis Result Validation
//!
//! Validates and normalizes the result object produced when a coding agent
//! analyzes a software project: tech stack identification, build system
//! discovery, debugging tool discovery, and a free-form structural summary.
//! The generator behind that analysis is non-deterministic, so its output
//! is never trusted to be structurally correct or complete.
//!
//! ## Key Design Principles
//!
//! 1. **One validating constructor.** [`validate`] (also
//!    [`ProjectAnalysis::from_value`]) is the only way a [`ProjectAnalysis`]
//!    comes into existence from untrusted input. Downstream consumers
//!    destructure the result without further existence checks beyond the
//!    `Option` markers the schema declares.
//!
//! 2. **Every section independently optional.** The generator may have no
//!    finding for a facet; an absent section is never an error, and a valid
//!    section is never blocked by another facet's gaps.
//!
//! 3. **All violations reported at once.** A rejection carries a
//!    [`Violation`] per defective field with its dotted path, so a caller
//!    re-prompting the generator can name every defect in one pass.
//!
//! 4. **Closed enumerations and explicit three-state fields.**
//!    [`Confidence`] is a closed enum; the dev server field distinguishes
//!    key-absent from explicit-null from record ([`DevServerField`]).
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.
//! - Validation is pure and synchronous: no I/O, no shared state, safe to
//!   call concurrently.

pub mod error;
pub mod model;
pub mod response;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::{AnalysisError, ValidationViolations, Violation};
pub use model::{
    BuildSystem, Confidence, DebuggerConfig, DebuggingTools, DevServer, DevServerField,
    ErrorTracking, LoggingSetup, Profiling, ProjectAnalysis, TechStack,
};
pub use response::extract_json;
pub use validate::validate;
