//! Gene identifier handling.
//!
//! NESSRA expansion outputs mix lowercase Ensembl/RefSeq-style identifiers
//! with cluster and tRNA labels that must be kept verbatim.

/// Prefixes that mark an identifier as an Ensembl gene or noncoding RNA
/// accession. Anything else (clusters, tRNA genes) is left untouched.
const UPPERCASE_PREFIXES: &[&str] = &["ensg", "nr"];

/// Normalizes a gene identifier for merging.
///
/// Identifiers starting with a recognized Ensembl or noncoding prefix are
/// uppercased so the same gene keys identically across files; any other
/// label is returned unchanged.
pub fn normalize_gene_name(name: &str) -> String {
    let lowered = name.to_ascii_lowercase();
    if UPPERCASE_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        name.to_ascii_uppercase()
    } else {
        name.to_string()
    }
}

/// Extracts the network name from an interaction file's banner line.
///
/// The banner's last whitespace-separated word names the network the file
/// was expanded from.
pub fn network_name(banner: &str) -> Option<&str> {
    banner.split_whitespace().last()
}
