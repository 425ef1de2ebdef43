//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depths and operation counts used by the
//! parser, the printer and the rewrite engine.

// =============================================================================
// Recursion Depth Limits (Parser / Emitter)
// =============================================================================

/// Maximum nesting depth the parser accepts before failing.
///
/// Each nested expression or statement adds several frames to the call
/// stack. Obfuscated input is machine generated and can be deeply nested
/// (`a[a[a[a[...]]]]`), so the limit is generous but finite.
pub const MAX_PARSE_DEPTH: u32 = 256;

// =============================================================================
// Operation Count Limits (Rewrite engine)
// =============================================================================

/// Default number of locate/replace passes before the rewrite is declared
/// non-terminating.
///
/// Every pass resolves one level of nested references, so well-formed input
/// converges in as many passes as its deepest `arr[arr[...]]` chain.
///
/// ```javascript
/// var _a = [_a[0]];   // self-referential, never converges
/// _a[0];
/// ```
pub const DEFAULT_MAX_REWRITE_PASSES: u32 = 256;

/// Upper bound on arena size during rewriting.
///
/// Substitution copies elements; an element that references itself more
/// than once doubles the tree on every pass. Checked before every copy, so
/// a single pass cannot overshoot it either.
pub const MAX_REWRITE_ARENA_NODES: usize = 4_000_000;
