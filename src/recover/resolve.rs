//! Target-name fixups and first-match synonym resolution.

use serde::Serialize;

use crate::tables::gene_names::GeneNameTable;
use crate::tables::snodb::SnoDbTable;
use crate::tables::spliceosome::SpliceosomeTable;

/// Rewrites a raw target name into the form the lookup tables use.
///
/// rRNA positions like `18S-564` keep only the subunit name; `U`-series
/// snRNA/snoRNA names drop the transcript suffix after the dash, with an
/// inner `.` variant marker turned into a dash (`U8.2-201` becomes `U8-2`).
pub fn fix_target_name(raw: &str) -> String {
    if raw.starts_with("18S-") || raw.starts_with("28S-") {
        return raw.split('-').next().unwrap_or(raw).to_string();
    }

    if raw.starts_with('U') {
        let head = raw.split('-').next().unwrap_or(raw);
        if let Some((stem, variant)) = head.split_once('.') {
            return format!("{stem}-{variant}");
        }
        return head.to_string();
    }

    raw.to_string()
}

/// Removes repeats from a name list, keeping first-occurrence order.
pub fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(names.len());
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Which lookup table satisfied a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    GeneName,
    GeneSynonym,
    Spliceosome,
    SnoDb,
}

/// Resolves target names against the lookup tables in fixed priority
/// order, returning the first table's match and consulting nothing after
/// a hit.
pub struct Resolver<'a> {
    pub gene_names: &'a GeneNameTable,
    pub spliceosome: &'a SpliceosomeTable,
    pub snodb: &'a SnoDbTable,
}

impl Resolver<'_> {
    /// Priority: gene-name main column, gene-name synonym column, the
    /// spliceosome synonym map, then the snoDB synonym map. An unmatched
    /// name yields `None`, never an error.
    pub fn resolve(&self, target: &str) -> Option<(Source, &[String])> {
        let lookups: [(Source, &[String]); 4] = [
            (Source::GeneName, self.gene_names.resolve_name(target)),
            (Source::GeneSynonym, self.gene_names.resolve_synonym(target)),
            (Source::Spliceosome, self.spliceosome.resolve_synonym(target)),
            (Source::SnoDb, self.snodb.resolve_synonym(target)),
        ];
        lookups
            .into_iter()
            .find(|(_, ids)| !ids.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrna_positions_keep_subunit() {
        assert_eq!(fix_target_name("18S-564"), "18S");
        assert_eq!(fix_target_name("28S-2402"), "28S");
    }

    #[test]
    fn test_u_series_drops_transcript_suffix() {
        assert_eq!(fix_target_name("U3-2P"), "U3");
        assert_eq!(fix_target_name("U8.2-201"), "U8-2");
        assert_eq!(fix_target_name("U6"), "U6");
    }

    #[test]
    fn test_other_names_pass_through() {
        assert_eq!(fix_target_name("FBL"), "FBL");
        assert_eq!(fix_target_name("SNORD118"), "SNORD118");
        // Lowercase u is not a U-series name.
        assert_eq!(fix_target_name("ube2i-201"), "ube2i-201");
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let names = vec![
            "U3".to_string(),
            "FBL".to_string(),
            "U3".to_string(),
            "U6".to_string(),
        ];
        assert_eq!(dedup_preserving_order(names), vec!["U3", "FBL", "U6"]);
    }
}
