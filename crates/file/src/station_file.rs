//! Reader for SuperMAG per-station magnetometer files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::warn;

use supermag_data::{Series, SmData, VECTOR_SUFFIXES, derive_keys, from_vendor};

use crate::error::FileError;
use crate::options::ReadOptions;
use crate::statinfo::read_statinfo;

/// Number of perturbation components per station row.
const N_COMPONENTS: usize = VECTOR_SUFFIXES.len();

/// Parsed file header.
#[derive(Debug)]
struct Header {
    /// Declared format revision, if recognised.
    revision: Option<u32>,
    /// Station codes in declaration order.
    stations: Vec<String>,
    /// 0-based index of the first line after the header.
    data_start: usize,
}

/// Read a SuperMAG per-station magnetometer file into a container.
///
/// The header declares a format revision and the selected stations; data
/// records follow, each a `YYYY MM DD HH MM SS` stamp line and then one
/// row per station that has data for that epoch. Stations without a row
/// at an epoch hold NaN there. Output keys are the station code
/// concatenated with the component suffixes (`ALEbx`, `ALEbxgeo`, ...).
///
/// When [`ReadOptions::with_station_info`] is set, each station's series
/// gain `geolat`/`geolon`/`station_name` attributes and a derived
/// `<station>lt` local-time series computed from the station longitude.
///
/// # Errors
///
/// Returns [`FileError::FileNotFound`] if `path` does not exist,
/// [`FileError::Parse`] naming the 1-based line of any malformed header or
/// row, or [`FileError::Truncated`] for a station row with too few
/// columns (dropped with a warning in tolerant mode when trailing).
pub fn read_supermag_file(path: &Path, options: &ReadOptions) -> Result<SmData, FileError> {
    if !path.exists() {
        return Err(FileError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;

    let header = parse_header(&text)?;
    if header.revision.is_none() {
        warn!("unrecognized file format revision; assuming the latest column layout");
    }

    let mut time: Vec<NaiveDateTime> = Vec::new();
    let mut fields: BTreeMap<String, Vec<Vec<f64>>> = header
        .stations
        .iter()
        .map(|s| (s.clone(), vec![Vec::new(); N_COMPONENTS]))
        .collect();

    let mut lines = text
        .lines()
        .enumerate()
        .skip(header.data_start)
        .filter(|(_, l)| !l.trim().is_empty())
        .peekable();

    while let Some((idx, line)) = lines.next() {
        let lineno = idx + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if !is_record_stamp(&parts) {
            return Err(FileError::Parse {
                line: lineno,
                reason: format!("expected a record timestamp, got {:?}", line.trim()),
            });
        }
        time.push(parse_stamp(&parts, lineno)?);
        let n = time.len();

        // Station rows follow until the next timestamp or end of file.
        while let Some(&(idx2, line2)) = lines.peek() {
            let parts2: Vec<&str> = line2.split_whitespace().collect();
            if is_record_stamp(&parts2) {
                break;
            }
            lines.next();
            let lineno2 = idx2 + 1;

            let station = parts2[0];
            let Some(cols) = fields.get_mut(station) else {
                return Err(FileError::Parse {
                    line: lineno2,
                    reason: format!("unknown station '{station}'"),
                });
            };

            if parts2.len() < N_COMPONENTS + 1 {
                if options.tolerant() && lines.peek().is_none() {
                    warn!(line = lineno2, "dropping incomplete trailing station row");
                    continue;
                }
                return Err(FileError::Truncated {
                    line: lineno2,
                    reason: format!(
                        "station row has {} columns, expected at least {}",
                        parts2.len(),
                        N_COMPONENTS + 1
                    ),
                });
            }

            let first = first_value_index(header.revision, parts2.len());
            for (c, raw) in parts2[first..first + N_COMPONENTS].iter().enumerate() {
                let value: f64 = raw.parse().map_err(|e| FileError::Parse {
                    line: lineno2,
                    reason: format!("bad value '{raw}': {e}"),
                })?;

                let col = &mut cols[c];
                if col.len() == n {
                    return Err(FileError::Parse {
                        line: lineno2,
                        reason: format!("duplicate row for station '{station}' in one record"),
                    });
                }
                // A station absent from earlier records stays NaN there.
                while col.len() < n - 1 {
                    col.push(f64::NAN);
                }
                col.push(from_vendor(value));
            }
        }
    }

    // Stations absent from the trailing records are padded out to the
    // full axis length.
    for cols in fields.values_mut() {
        for col in cols.iter_mut() {
            while col.len() < time.len() {
                col.push(f64::NAN);
            }
        }
    }

    let info = match options.station_info() {
        Some(p) => Some(read_statinfo(p)?),
        None => None,
    };

    // Hour-of-day per sample, used for local-time derivation.
    let hours: Vec<f64> = time
        .iter()
        .map(|t| f64::from(t.hour()) + f64::from(t.minute()) / 60.0 + f64::from(t.second()) / 3600.0)
        .collect();

    let mut data = SmData::new(time)?;
    if let Some(revision) = header.revision {
        data.set_attr("revision", revision.to_string());
    }
    data.set_attr("stations", header.stations.join(","));

    for (station, cols) in fields {
        let station_meta = info.as_ref().and_then(|map| map.get(&station));

        for (key, col) in derive_keys(&station, &VECTOR_SUFFIXES).into_iter().zip(cols) {
            let mut series = Series::new(col)
                .with_attr("units", "nT")
                .with_attr("station", station.clone());
            if let Some(meta) = station_meta {
                series.set_attr("station_name", meta.name.clone());
                series.set_attr("geolat", meta.geolat.to_string());
                series.set_attr("geolon", meta.geolon.to_string());
            }
            data.insert(key, series)?;
        }

        if let Some(meta) = station_meta {
            let lt: Vec<f64> = hours
                .iter()
                .map(|h| {
                    let value = h + meta.geolon * 24.0 / 360.0;
                    if value >= 24.0 { value - 24.0 } else { value }
                })
                .collect();
            let lt_key = derive_keys(&station, &["lt"]).remove(0);
            data.insert(
                lt_key,
                Series::new(lt)
                    .with_attr("units", "hours")
                    .with_attr("station", station.clone())
                    .with_attr("description", "local time derived from station longitude"),
            )?;
        }
    }
    Ok(data)
}

/// Parse the file header: revision, station list, and where data begins.
fn parse_header(text: &str) -> Result<Header, FileError> {
    let mut revision = None;
    let mut stations: Option<Vec<String>> = None;
    let mut expect_station_list = false;

    for (idx, line) in text.lines().enumerate() {
        if expect_station_list || (line.contains("Selected") && line.contains("Stations")) {
            expect_station_list = false;
            let list = line.split_whitespace().next_back().unwrap_or("");
            let codes: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if codes.is_empty() {
                return Err(FileError::Parse {
                    line: idx + 1,
                    reason: "empty station list".to_string(),
                });
            }
            stations = Some(codes);
            continue;
        }
        if line.contains("Selected") {
            // The station list is on the following line.
            expect_station_list = true;
            continue;
        }
        if line.contains("Revision") {
            let value = line.rsplit(':').next().unwrap_or("").trim();
            revision = match value.parse::<u32>() {
                Ok(v) if known_revision(v) => Some(v),
                _ => None,
            };
            continue;
        }
        if stations.is_some() && (line.contains("==") || line.contains("Parameters")) {
            return Ok(Header {
                revision,
                stations: stations.unwrap(),
                data_start: idx + 1,
            });
        }
    }

    Err(FileError::Parse {
        line: text.lines().count(),
        reason: "header missing the station list or its terminator".to_string(),
    })
}

/// Whether a declared revision has a known column layout.
fn known_revision(revision: u32) -> bool {
    matches!(revision, 2 | 5 | 6)
}

/// Index of the first perturbation component in a station row.
///
/// Revision 2 puts the components right after the station code; later
/// revisions append them, so the final six columns are read. Unrecognised
/// revisions fall back to the latest layout.
fn first_value_index(revision: Option<u32>, n_parts: usize) -> usize {
    match revision {
        Some(2) => 1,
        _ => n_parts - N_COMPONENTS,
    }
}

/// Whether a whitespace-split line is a `YYYY MM DD HH MM SS` record stamp.
fn is_record_stamp(parts: &[&str]) -> bool {
    parts.len() >= 6
        && parts[0].len() == 4
        && parts[..6]
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Parse a record stamp line into a timestamp.
fn parse_stamp(parts: &[&str], lineno: usize) -> Result<NaiveDateTime, FileError> {
    let mut nums = [0u32; 6];
    for (slot, raw) in nums.iter_mut().zip(parts) {
        *slot = raw.parse().map_err(|e| FileError::Parse {
            line: lineno,
            reason: format!("bad date-time field '{raw}': {e}"),
        })?;
    }
    NaiveDate::from_ymd_opt(nums[0] as i32, nums[1], nums[2])
        .and_then(|d| d.and_hms_opt(nums[3], nums[4], nums[5]))
        .ok_or_else(|| FileError::Parse {
            line: lineno,
            reason: format!("invalid date-time {:?}", &parts[..6]),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Version 5 layout: the perturbation components are the final six
    /// columns of each station row.
    const SAMPLE_V5: &str = "\
SuperMAG ASCII file
Revision: 5
Source: SuperMAG consortium
Selected Stations: ALE,BOR
=============================================================
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
BOR 28.30 -2.30 0.60 2.60 -2.00 0.50 2.40
2001 01 01 00 01 00
ALE 82.50 10.70 -4.90 -5.60 10.20 -4.40 -5.10
BOR 28.30 5.90 1.70 -2.80 5.50 1.50 -2.50
";

    /// Version 2 layout: the components directly follow the station code,
    /// with trailing extras.
    const SAMPLE_V2: &str = "\
SuperMAG ASCII file
Revision: 2
Selected Stations: ALE,BOR
=============================================================
2001 01 01 00 00 00
ALE -8.60 5.80 -2.60 -8.10 5.30 -2.10 77.70
BOR -2.30 0.60 2.60 -2.00 0.50 2.40 64.10
2001 01 01 00 01 00
ALE 10.70 -4.90 -5.60 10.20 -4.40 -5.10 77.70
BOR 5.90 1.70 -2.80 5.50 1.50 -2.50 64.10
";

    fn write_fixture(text: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stations.txt");
        std::fs::write(&path, text).unwrap();
        (dir, path)
    }

    #[test]
    fn parses_v5_known_values() {
        let (_dir, path) = write_fixture(SAMPLE_V5);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();

        assert_eq!(data.attr("revision"), Some("5"));
        assert_eq!(data.attr("stations"), Some("ALE,BOR"));
        assert_eq!(data.len(), 2);

        // Known first and last values per station and component.
        let ale_bx = data.var("ALEbx").unwrap();
        assert_eq!(ale_bx.values(), &[-8.6, 10.7]);
        assert_eq!(data.var("ALEby").unwrap().values(), &[5.8, -4.9]);
        assert_eq!(data.var("ALEbz").unwrap().values(), &[-2.6, -5.6]);
        assert_eq!(data.var("BORbx").unwrap().values(), &[-2.3, 5.9]);
        assert_eq!(data.var("BORby").unwrap().values(), &[0.6, 1.7]);
        assert_eq!(data.var("BORbz").unwrap().values(), &[2.6, -2.8]);

        // Geographic-frame components come from the trailing columns.
        assert_eq!(data.var("ALEbxgeo").unwrap().values(), &[-8.1, 10.2]);
        assert_eq!(data.var("BORbzgeo").unwrap().values(), &[2.4, -2.5]);

        assert_eq!(ale_bx.attr("units"), Some("nT"));
        assert_eq!(ale_bx.attr("station"), Some("ALE"));

        assert_eq!(
            data.time()[0],
            NaiveDate::from_ymd_opt(2001, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parses_v2_column_offset() {
        let (_dir, path) = write_fixture(SAMPLE_V2);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();

        assert_eq!(data.attr("revision"), Some("2"));
        assert_eq!(data.var("ALEbx").unwrap().values(), &[-8.6, 10.7]);
        assert_eq!(data.var("BORbz").unwrap().values(), &[2.6, -2.8]);
        // The trailing 77.70 extras are not mistaken for components.
        assert_eq!(data.var("ALEbzgeo").unwrap().values(), &[-2.1, -5.1]);
    }

    #[test]
    fn absent_station_row_holds_nan() {
        let text = "\
Revision: 5
Selected Stations: ALE,BOR
====
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
2001 01 01 00 01 00
ALE 82.50 10.70 -4.90 -5.60 10.20 -4.40 -5.10
BOR 28.30 5.90 1.70 -2.80 5.50 1.50 -2.50
";
        let (_dir, path) = write_fixture(text);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();

        let bor_bx = data.var("BORbx").unwrap();
        assert!(bor_bx.values()[0].is_nan());
        assert_eq!(bor_bx.values()[1], 5.9);
        // All series still share the axis length.
        assert_eq!(bor_bx.len(), data.len());
    }

    #[test]
    fn vendor_fill_becomes_nan() {
        let text = "\
Revision: 5
Selected Stations: ALE
====
2001 01 01 00 00 00
ALE 82.50 999999.0 5.80 -2.60 -8.10 5.30 -2.10
";
        let (_dir, path) = write_fixture(text);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();
        assert!(data.var("ALEbx").unwrap().values()[0].is_nan());
        assert_eq!(data.var("ALEby").unwrap().values()[0], 5.8);
    }

    #[test]
    fn unknown_station_is_parse_error() {
        let text = "\
Revision: 5
Selected Stations: ALE
====
2001 01 01 00 00 00
XYZ 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
";
        let (_dir, path) = write_fixture(text);
        let err = read_supermag_file(&path, &ReadOptions::new()).unwrap_err();
        match err {
            FileError::Parse { line, reason } => {
                assert_eq!(line, 5);
                assert!(reason.contains("XYZ"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_trailing_row_strict_vs_tolerant() {
        let text = "\
Revision: 5
Selected Stations: ALE
====
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
2001 01 01 00 01 00
ALE 82.50 -8.60
";
        let (_dir, path) = write_fixture(text);

        let err = read_supermag_file(&path, &ReadOptions::new()).unwrap_err();
        assert!(matches!(err, FileError::Truncated { line: 7, .. }));

        let data =
            read_supermag_file(&path, &ReadOptions::new().with_tolerant(true)).unwrap();
        assert_eq!(data.len(), 2);
        let ale_bx = data.var("ALEbx").unwrap();
        assert_eq!(ale_bx.values()[0], -8.6);
        assert!(ale_bx.values()[1].is_nan());
    }

    #[test]
    fn station_list_on_following_line() {
        let text = "\
Revision: 5
Selected 2 Station codes below
ALE,BOR
====
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
BOR 28.30 -2.30 0.60 2.60 -2.00 0.50 2.40
";
        let (_dir, path) = write_fixture(text);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();
        assert_eq!(data.attr("stations"), Some("ALE,BOR"));
    }

    #[test]
    fn unrecognised_revision_uses_latest_layout() {
        let text = "\
Revision: 9
Selected Stations: ALE
====
2001 01 01 00 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
";
        let (_dir, path) = write_fixture(text);
        let data = read_supermag_file(&path, &ReadOptions::new()).unwrap();
        // No revision attribute and the last-six-column layout applies.
        assert_eq!(data.attr("revision"), None);
        assert_eq!(data.var("ALEbx").unwrap().values(), &[-8.6]);
    }

    #[test]
    fn local_time_derived_from_station_info() {
        let info_text = "\
SuperMAG station information
===========================================
IAGA\tGEOLON\tGEOLAT\tSTATION-NAME
ALE\t297.65\t82.50\t\"Alert\"
";
        let dir = tempfile::tempdir().unwrap();
        let info_path = dir.path().join("station_info.txt");
        std::fs::write(&info_path, info_text).unwrap();

        let data_text = "\
Revision: 5
Selected Stations: ALE
====
2001 01 01 06 00 00
ALE 82.50 -8.60 5.80 -2.60 -8.10 5.30 -2.10
";
        let data_path = dir.path().join("stations.txt");
        std::fs::write(&data_path, data_text).unwrap();

        let opts = ReadOptions::new().with_station_info(&info_path);
        let data = read_supermag_file(&data_path, &opts).unwrap();

        // 06:00 UT + 297.65 deg * 24/360 h = 25.843..., wrapped to 1.843...
        let lt = data.var("ALElt").unwrap();
        assert!((lt.values()[0] - 1.843_333).abs() < 1e-3);
        assert_eq!(lt.attr("units"), Some("hours"));

        let ale_bx = data.var("ALEbx").unwrap();
        assert_eq!(ale_bx.attr("station_name"), Some("Alert"));
        assert_eq!(ale_bx.attr("geolat"), Some("82.5"));
        assert_eq!(ale_bx.attr("geolon"), Some("297.65"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_supermag_file(Path::new("/nonexistent/st.txt"), &ReadOptions::new())
            .unwrap_err();
        assert!(matches!(err, FileError::FileNotFound { .. }));
    }

    #[test]
    fn record_stamp_detection() {
        assert!(is_record_stamp(&["2001", "01", "01", "00", "00", "00"]));
        assert!(!is_record_stamp(&["ALE", "01", "01", "00", "00", "00"]));
        assert!(!is_record_stamp(&["2001", "01", "01"]));
        assert!(!is_record_stamp(&["01", "01", "01", "00", "00", "00"]));
    }
}
