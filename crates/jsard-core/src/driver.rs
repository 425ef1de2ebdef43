//! Deobfuscation driver.
//!
//! Parses the source, finds the obfuscation array once, then alternates
//! locating and replacing references until a pass finds none. Every pass
//! starts from a full re-scan of the tree, so references exposed by a
//! previous substitution (`_a[_a[0]]`) are picked up on the next one.

use crate::error::JsardError;
use crate::locator::locate_references;
use crate::obfuscation_array::{
    AcceptAll, ArrayCandidate, ArrayPredicate, ArraySelector, scan_obfuscation_array,
};
use crate::replacer::{RewriteDiagnostic, replace_references};
use jsard_common::limits::{DEFAULT_MAX_REWRITE_PASSES, MAX_REWRITE_ARENA_NODES};
use jsard_emitter::print_node;
use jsard_parser::{NodeIndex, SyntaxTree, parse_program};
use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

/// File name used in diagnostics when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "<input>";

#[derive(Clone, Debug)]
pub struct DeobfuscateOptions {
    /// Locate/replace passes allowed before the rewrite is declared
    /// non-terminating
    pub max_passes: u32,
    /// Arena size a substitution may not push the tree past
    pub max_arena_nodes: usize,
    pub selector: ArraySelector,
}

impl Default for DeobfuscateOptions {
    fn default() -> Self {
        DeobfuscateOptions {
            max_passes: DEFAULT_MAX_REWRITE_PASSES,
            max_arena_nodes: MAX_REWRITE_ARENA_NODES,
            selector: ArraySelector::default(),
        }
    }
}

/// Output of a successful run.
#[derive(Clone, Debug)]
pub struct Deobfuscation {
    pub code: String,
    pub array_name: String,
    /// Passes that replaced or skipped at least one reference
    pub passes: u32,
    /// References substituted across all passes
    pub replaced: usize,
    /// References that were left in place
    pub diagnostics: Vec<RewriteDiagnostic>,
}

/// Reusable deobfuscation configuration. Holds no per-run state, so one
/// instance can serve any number of documents.
#[derive(Clone, Debug, Default)]
pub struct Deobfuscator<P = AcceptAll> {
    options: DeobfuscateOptions,
    predicate: P,
}

impl Deobfuscator {
    pub fn new(options: DeobfuscateOptions) -> Deobfuscator {
        Deobfuscator {
            options,
            predicate: AcceptAll,
        }
    }
}

impl<P: ArrayPredicate> Deobfuscator<P> {
    /// Add a predicate every array candidate must also pass, on top of the
    /// configured selector.
    pub fn with_predicate<Q: ArrayPredicate>(self, predicate: Q) -> Deobfuscator<Q> {
        Deobfuscator {
            options: self.options,
            predicate,
        }
    }

    pub fn options(&self) -> &DeobfuscateOptions {
        &self.options
    }

    pub fn run(&self, source: &str) -> Result<Deobfuscation, JsardError> {
        self.run_named(DEFAULT_FILE_NAME, source)
    }

    /// Deobfuscate `source`, naming it `file_name` in parse errors.
    #[tracing::instrument(level = "debug", skip_all, fields(file = file_name, bytes = source.len()))]
    pub fn run_named(&self, file_name: &str, source: &str) -> Result<Deobfuscation, JsardError> {
        let SyntaxTree { mut arena, root } = parse_program(file_name, source)?;

        let accepts = SelectorAndPredicate {
            selector: &self.options.selector,
            predicate: &self.predicate,
        };
        let array = scan_obfuscation_array(&arena, root, &accepts)?;

        let mut skip: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut diagnostics = Vec::new();
        let mut passes = 0;
        let mut replaced = 0;

        loop {
            let references = locate_references(&arena, root, &array, &skip);
            if references.is_empty() {
                break;
            }
            if passes >= self.options.max_passes || arena.len() > self.options.max_arena_nodes {
                debug!(
                    passes,
                    nodes = arena.len(),
                    pending = references.len(),
                    "rewrite not converging"
                );
                return Err(JsardError::NonTerminatingRewrite {
                    passes,
                    nodes: arena.len(),
                });
            }
            passes += 1;

            let outcome = replace_references(
                &mut arena,
                &array,
                &references,
                self.options.max_arena_nodes,
            )
            .map_err(|exceeded| {
                debug!(
                    passes,
                    nodes = exceeded.nodes,
                    needed = exceeded.needed,
                    "arena budget exhausted"
                );
                JsardError::NonTerminatingRewrite {
                    passes,
                    nodes: exceeded.nodes,
                }
            })?;
            trace!(
                pass = passes,
                located = references.len(),
                replaced = outcome.replaced,
                skipped = outcome.diagnostics.len(),
                "rewrite pass"
            );
            replaced += outcome.replaced;
            for diagnostic in outcome.diagnostics {
                skip.insert(diagnostic.reference);
                diagnostics.push(diagnostic);
            }
        }

        info!(
            array = %array.name,
            passes,
            replaced,
            skipped = diagnostics.len(),
            "deobfuscation finished"
        );
        Ok(Deobfuscation {
            code: print_node(&arena, root),
            array_name: array.name,
            passes,
            replaced,
            diagnostics,
        })
    }
}

struct SelectorAndPredicate<'a, P> {
    selector: &'a ArraySelector,
    predicate: &'a P,
}

impl<P: ArrayPredicate> ArrayPredicate for SelectorAndPredicate<'_, P> {
    fn matches(&self, candidate: &ArrayCandidate<'_>) -> bool {
        self.selector.matches(candidate) && self.predicate.matches(candidate)
    }
}

/// Deobfuscate `source` with default options.
pub fn deobfuscate(source: &str) -> Result<String, JsardError> {
    Deobfuscator::new(DeobfuscateOptions::default())
        .run(source)
        .map(|result| result.code)
}
