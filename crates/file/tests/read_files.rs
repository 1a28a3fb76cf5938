use std::path::PathBuf;

use supermag_data::{read_ascii, write_ascii};
use supermag_file::{ReadOptions, read_index_file, read_supermag_file};

const INDEX_FILE: &str = "\
SuperMAG indices
=============================================================
<year> <month> <day> <hour> <min> <sec> <SML (nT)> <SMU (nT)> <smr (nT)>
2001 01 01 00 00 00 -107 113 4
2001 01 01 00 01 00 -112 116 999999
2001 01 01 00 02 00 -118 118 3
";

const STATION_FILE: &str = "\
SuperMAG ASCII file
Revision: 5
Selected Stations: ALE,BOR
=============================================================
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
BOR 28.30 -2.30 0.60 2.60 -2.00 0.50 2.40
2001 01 01 00 01 00
BOR 28.30 5.90 1.70 -2.80 5.50 1.50 -2.50
";

fn fixture(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn index_file_reads_and_round_trips_through_tagged_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "index.txt", INDEX_FILE);

    let data = read_index_file(&path, &ReadOptions::new()).unwrap();
    assert_eq!(data.len(), 3);
    assert!(data.var("smr").unwrap().values()[1].is_nan());

    // A file-sourced container serializes exactly like a fetched one.
    let out = dir.path().join("index_out.txt");
    write_ascii(&out, &data).unwrap();
    let back = read_ascii(&out).unwrap();

    assert_eq!(
        back.keys().collect::<Vec<_>>(),
        data.keys().collect::<Vec<_>>()
    );
    assert_eq!(back.time(), data.time());
    assert_eq!(back.var("SML").unwrap().values(), data.var("SML").unwrap().values());
    assert_eq!(back.var("SML").unwrap().attr("units"), Some("nT"));
}

#[test]
fn station_file_shares_the_container_conventions() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "stations.txt", STATION_FILE);

    let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();

    // Every series shares the axis length, absent rows hold NaN.
    assert_eq!(data.len(), 2);
    for (name, series) in data.iter() {
        assert_eq!(series.len(), data.len(), "series '{name}' length");
    }
    assert!(data.var("ALEbx").unwrap().values()[1].is_nan());
    assert_eq!(data.var("BORbx").unwrap().values(), &[-2.3, 5.9]);

    // And it serializes through the same tagged-ASCII path.
    let out = dir.path().join("stations_out.txt");
    write_ascii(&out, &data).unwrap();
    let back = read_ascii(&out).unwrap();
    assert_eq!(back.attr("stations"), Some("ALE,BOR"));
    assert_eq!(back.var("BORbzgeo").unwrap().values(), &[2.4, -2.5]);
}
