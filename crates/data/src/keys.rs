//! Variable-name derivation.
//!
//! SuperMAG names per-station auxiliary fields by concatenating the base
//! name and a field suffix with no separator ("SML" + "mlat" ->
//! "SMLmlat"). The rule lives here as an explicit function so the key
//! namespace stays auditable.

/// Per-station auxiliary fields attached to an auroral electrojet index.
pub const INDEX_SUFFIXES: [&str; 4] = ["mlat", "mlt", "glat", "glon"];

/// Magnetic-perturbation components recorded per magnetometer station.
pub const VECTOR_SUFFIXES: [&str; 6] = ["bx", "by", "bz", "bxgeo", "bygeo", "bzgeo"];

/// Derive one compound key per suffix by concatenating `base` and the
/// suffix with no separator.
pub fn derive_keys(base: &str, suffixes: &[&str]) -> Vec<String> {
    suffixes
        .iter()
        .map(|suffix| format!("{base}{suffix}"))
        .collect()
}

/// The full key set for an electrojet index: the base name itself plus one
/// compound key per station field in [`INDEX_SUFFIXES`].
pub fn index_keys(base: &str) -> Vec<String> {
    let mut keys = Vec::with_capacity(INDEX_SUFFIXES.len() + 1);
    keys.push(base.to_string());
    keys.extend(derive_keys(base, &INDEX_SUFFIXES));
    keys
}
