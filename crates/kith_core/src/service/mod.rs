//! Journal use-case services.
//!
//! # Responsibility
//! - Orchestrate the parsed collections, the name resolver and the
//!   document codec into user-facing operations.
//! - Keep callers decoupled from storage and grammar details.

pub mod journal;
