//! Common types and utilities for the jsard deobfuscator.
//!
//! This crate provides foundational types used across all jsard crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, diagnostic codes)
//! - Line/column conversion for byte offsets (`LineMap`, `Position`)
//! - Centralized limits for parsing and rewriting

// Diagnostics reported by the parser and the rewrite engine
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
};

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Centralized limits and thresholds
pub mod limits;
