//! Collection aliases for field-name sets.

pub use rustc_hash::FxHashSet;

/// A deduplicated, unordered set of field names.
pub type FieldSet = FxHashSet<String>;

/// Sort a field set into a `Vec` for stable rendering.
pub fn sorted(set: &FieldSet) -> Vec<String> {
    let mut names: Vec<String> = set.iter().cloned().collect();
    names.sort();
    names
}
