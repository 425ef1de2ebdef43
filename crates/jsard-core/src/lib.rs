//! Array-ref deobfuscation engine.
//!
//! Array-ref obfuscation hoists literals into one array and rewrites every
//! use site as `array[<index>]`. This crate undoes it:
//! - `obfuscation_array` - find the array declaration (`scan_obfuscation_array`)
//! - `locator` - find `array[<integer literal>]` lookups (`locate_references`)
//! - `replacer` - substitute a copy of the element into the lookup's slot
//! - `driver` - parse, scan, locate/replace to a fixed point, print
//!
//! ```
//! let code = jsard_core::deobfuscate(r#"var _a=["foo"];f(_a[0]);"#).unwrap();
//! assert_eq!(code, "var _a = [\"foo\"];\nf(\"foo\");");
//! ```

pub mod driver;
pub mod error;
pub mod locator;
pub mod obfuscation_array;
pub mod replacer;

pub use driver::{DeobfuscateOptions, Deobfuscation, Deobfuscator, deobfuscate};
pub use error::{JsardError, ObfuscationArrayNotFound};
pub use locator::{IndexedReference, locate_references};
pub use obfuscation_array::{
    AcceptAll, ArrayCandidate, ArrayPredicate, ArraySelector, ObfuscationArray,
    scan_obfuscation_array,
};
pub use replacer::{
    ArenaBudgetExceeded, RewriteDiagnostic, RewriteIssue, replace_reference, replace_references,
};
