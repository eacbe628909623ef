//! Name uniqueness resolver.
//!
//! Duplicate candidate names get a Windows-style counter suffix: the first
//! taken `Widget` becomes `Widget (2)`, the next `Widget (3)`, and so on,
//! taking the lowest free number.

use std::collections::HashSet;

/// Derive a name distinct from every name in `existing`.
///
/// The candidate is trimmed first. Resolution is an explicit bounded loop:
/// with N existing names at most N suffixed candidates can collide, so N + 2
/// attempts always find a free name (pigeonhole).
pub fn resolve_unique_name(candidate: &str, existing: &HashSet<String>) -> String {
    let base = candidate.trim();
    let mut resolved = base.to_string();

    for suffix in 2..=(existing.len() as u64 + 2) {
        if !existing.contains(&resolved) {
            return resolved;
        }
        resolved = format!("{base} ({suffix})");
    }

    resolved
}
