use snomerge::merge::{merge_expansions, merge_hybrid, merge_networks};
use snomerge::parser::read_merged_file;
use snomerge::recover::{RecoverInputs, recover_canonical};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fresh_temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_merge_networks_filters_and_normalizes() {
    let out_dir = fresh_temp_dir("snomerge_itest_networks");

    let stats = merge_networks(&fixture("networks"), &out_dir, &[0.0, 0.1]).unwrap();
    assert_eq!(stats.files, 2); // one input file, two thresholds

    let loose = read_merged_file(&out_dir.join("hsa_sno_U3_0.csv")).unwrap();
    assert_eq!(loose.len(), 3);
    assert_eq!(loose[0].x, "ENSG00000000001");
    assert_eq!(loose[1].y, "cluster_2");
    assert_eq!(loose[2].x, "NR_003023");

    let strict = read_merged_file(&out_dir.join("hsa_sno_U3_0.1.csv")).unwrap();
    let frels: Vec<f64> = strict.iter().map(|r| r.frel).collect();
    assert_eq!(frels, vec![0.9, 0.4]);

    fs::remove_dir_all(&out_dir).unwrap();
}

#[test]
fn test_merge_expansions_averages_shared_pairs() {
    let out_dir = fresh_temp_dir("snomerge_itest_expansions");
    let output = out_dir.join("merged_sno.csv");

    let stats = merge_expansions(&[fixture("expansions")], &output).unwrap();
    assert_eq!(stats.files, 2);
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.pairs, 3);
    assert_eq!(stats.averaged, 1);

    let rows = read_merged_file(&output).unwrap();
    assert_eq!(rows.len(), 3);

    // The pair reported from both endpoints' expansions is averaged once,
    // regardless of direction.
    assert_eq!(rows[0].x, "ENSG00000000001");
    assert_eq!(rows[0].y, "ENSG00000000002");
    assert_close(rows[0].frel, 0.6);

    assert_eq!(rows[1].y, "cluster_2");
    assert_close(rows[1].frel, 0.3);
    assert_eq!(rows[2].y, "trna_gene_1");
    assert_close(rows[2].frel, 0.2);

    fs::remove_dir_all(&out_dir).unwrap();
}

#[test]
fn test_hybrid_merge_consumes_expansion_output() {
    let out_dir = fresh_temp_dir("snomerge_itest_hybrid");
    let sno = out_dir.join("merged_sno.csv");
    let hybrid = out_dir.join("merged_sno_ribo.csv");

    merge_expansions(&[fixture("expansions")], &sno).unwrap();
    let stats = merge_hybrid(&[sno, fixture("merged_ribo.csv")], &hybrid).unwrap();
    assert_eq!(stats.files, 2);
    assert_eq!(stats.pairs, 4);
    assert_eq!(stats.averaged, 1);

    let rows = read_merged_file(&hybrid).unwrap();
    let shared = rows
        .iter()
        .find(|r| r.x == "ENSG00000000001" && r.y == "ENSG00000000002")
        .unwrap();
    assert_close(shared.frel, 0.4); // (0.6 + 0.2) / 2

    let ribo_only = rows.iter().find(|r| r.x == "ENSG00000000003").unwrap();
    assert_close(ribo_only.frel, 0.7);

    fs::remove_dir_all(&out_dir).unwrap();
}

#[test]
fn test_recover_canonical_end_to_end() {
    let out_dir = fresh_temp_dir("snomerge_itest_recover");
    let report = out_dir.join("canonical.csv");
    let summary_path = out_dir.join("canonical_summary.json");

    let inputs = RecoverInputs {
        snodb: fixture("snodb.tsv"),
        spliceosome: fixture("spliceosome.tsv"),
        gene_names: fixture("gene_names.tsv"),
        genes: fixture("sno_list.txt"),
    };

    let summary = recover_canonical(&inputs, &report, Some(&summary_path)).unwrap();
    assert_eq!(summary.genes, 2);
    assert_eq!(summary.genes_missing_from_snodb, 1);
    assert_eq!(summary.targets, 5);
    assert_eq!(summary.resolved_targets, 4);
    assert_eq!(summary.unresolved_targets, 1);

    let mut rdr = csv::Reader::from_path(&report).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);

    // SNORD118: targets fixed up (transcript suffixes dropped, the two 18S
    // positions collapse to one name) and kept in column order.
    let snord = &rows[0];
    assert_eq!(&snord[0], "SNORD118");
    assert_eq!(&snord[1], "5");
    assert_eq!(&snord[2], "U4ATAC;FBL;RPL13;SNORA73A;18S");
    assert_eq!(&snord[3], "4");
    assert_eq!(
        &snord[4],
        "ENSG00000264229;ENSG00000105202;ENSG00000167526;ENSG00000201823"
    );

    let map: serde_json::Value = serde_json::from_str(&snord[5]).unwrap();
    // FBL is also a spliceosome alias in the fixtures; the gene-name table
    // matches first and later tables are not consulted.
    assert_eq!(map["FBL"], serde_json::json!(["ENSG00000105202"]));
    // RPL13 only appears in the spliceosome table.
    assert_eq!(map["RPL13"], serde_json::json!(["ENSG00000167526"]));
    // SNORA73A falls through to the snoDB synonym map.
    assert_eq!(map["SNORA73A"], serde_json::json!(["ENSG00000201823"]));
    // 18S matches nothing and resolves to the empty list.
    assert_eq!(map["18S"], serde_json::json!([]));

    // A gene of interest missing from snoDB is reported, not dropped.
    let missing = &rows[1];
    assert_eq!(&missing[0], "SNORA99");
    assert_eq!(&missing[1], "0");
    assert_eq!(&missing[2], "");

    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(summary_json["genes"], 2);
    assert_eq!(summary_json["unresolved_targets"], 1);

    fs::remove_dir_all(&out_dir).unwrap();
}
