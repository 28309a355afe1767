//! Integration tests for the normalization contract
//!
//! These tests verify that heterogeneous source representations converge
//! to the single canonical output form: one text timestamp format, one
//! glucose unit, one file naming scheme. Each scenario drives a real
//! adapter through the full pipeline from raw bytes to written CSV.

use std::fs;
use std::path::Path;

use cgm_harmonizer::{datasets, DatasetProcessor, HarmonizeConfig, Result};
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config(raw_root: &Path, output_root: &Path) -> HarmonizeConfig {
    HarmonizeConfig::default()
        .with_raw_root(raw_root)
        .with_output_root(output_root)
        .with_workers(2)
}

fn read_output(output_root: &Path, dataset: &str, subject: &str) -> String {
    let path = output_root
        .join("Standardized-datasets")
        .join(dataset)
        .join(format!("{}.csv", subject));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing output {}: {}", path.display(), e))
}

/// The same two readings encoded three ways: a CSV with split date/time
/// columns in mmol/L, an XML event log with day-first timestamps, and a
/// JSON document with ISO-8601 UTC timestamps. All three must emit
/// byte-identical data rows.
#[tokio::test]
async fn test_heterogeneous_sources_converge_to_canonical_form() -> Result<()> {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write_file(
        &raw.path()
            .join("D1NAMO_raw_data/diabetes_subset_pictures-glucose-food-insulin/001/glucose.csv"),
        "date,time,glucose\n\
         2021-03-04,10:15,5.0\n\
         2021-03-04,10:20,7.2\n",
    );
    write_file(
        &raw.path().join("OhioT1DM_raw_data/001-ws-training.xml"),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <patient id=\"001\" weight=\"70\">\n\
           <glucose_level>\n\
             <event ts=\"04-03-2021 10:15:00\" value=\"90\"/>\n\
             <event ts=\"04-03-2021 10:20:00\" value=\"129.6\"/>\n\
           </glucose_level>\n\
         </patient>\n",
    );
    write_file(
        &raw.path()
            .join("AI-READI_raw_data/wearable_blood_glucose/dexcom_g6/001/001_DEX.json"),
        r#"{
  "header": {"modality": "sensed"},
  "body": {
    "cgm": [
      {
        "effective_time_frame": {"time_interval": {"start_date_time": "2021-03-04T10:15:00Z"}},
        "blood_glucose": {"value": 90, "unit": "mg/dL"}
      },
      {
        "effective_time_frame": {"time_interval": {"start_date_time": "2021-03-04T10:20:00Z"}},
        "blood_glucose": {"value": 129.6, "unit": "mg/dL"}
      }
    ]
  }
}"#,
    );

    for id in ["d1namo", "ohiot1dm", "ai-readi"] {
        let processor = DatasetProcessor::new(datasets::find(id)?, config(raw.path(), out.path()));
        processor.process().await?;
    }

    let expected = "timestamp,glucose_value_mg_dl\n\
                    2021-03-04 10:15:00,90\n\
                    2021-03-04 10:20:00,129.6\n";
    assert_eq!(read_output(out.path(), "D1NAMO", "001"), expected);
    assert_eq!(read_output(out.path(), "OhioT1DM", "001"), expected);
    assert_eq!(read_output(out.path(), "AI-READI", "001"), expected);

    Ok(())
}

/// Clock-time-only exports anchor to the reference date. A session that
/// wraps past midnight arrives unordered; the output sort handles it.
#[tokio::test]
async fn test_clock_time_only_export_anchors_to_reference_date() -> Result<()> {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write_file(
        &raw.path().join("Colas_2019_raw_data/1007.csv"),
        "hora,glucemia,pulso\n\
         23:58:00,102,71\n\
         00:03:00,108,69\n",
    );

    let processor =
        DatasetProcessor::new(datasets::find("colas_2019")?, config(raw.path(), out.path()));
    let stats = processor.process().await?;

    assert_eq!(stats.subjects_written, 1);
    assert_eq!(
        read_output(out.path(), "Colas_2019", "1007"),
        "timestamp,glucose_value_mg_dl\n\
         1900-01-01 00:03:00,108\n\
         1900-01-01 23:58:00,102\n"
    );

    Ok(())
}

/// Minute-offset exports anchor to the reference midnight, so relative
/// spacing survives; offsets past a day roll into the next date.
#[tokio::test]
async fn test_minute_offsets_anchor_to_reference_midnight() -> Result<()> {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write_file(
        &raw.path().join("Park_2025_raw_data/park_2025_cgm.csv"),
        "subject,mins_since_start,glucose\n\
         S01,0,101\n\
         S01,95,104\n\
         S01,1450,99\n\
         S02,0,111\n",
    );

    let processor =
        DatasetProcessor::new(datasets::find("park_2025")?, config(raw.path(), out.path()));
    let stats = processor.process().await?;

    assert_eq!(stats.subjects_written, 2);
    assert_eq!(
        read_output(out.path(), "Park_2025", "S01"),
        "timestamp,glucose_value_mg_dl\n\
         1900-01-01 00:00:00,101\n\
         1900-01-01 01:35:00,104\n\
         1900-01-02 00:10:00,99\n"
    );

    Ok(())
}

/// Lab exports type subject ids as floats and mix CGM rows with HbA1c
/// results; ids come out bare and non-CGM rows are excluded.
#[tokio::test]
async fn test_lab_export_subject_ids_and_test_code_exclusion() -> Result<()> {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write_file(
        &raw.path().join("T1DEXI_raw_data/Data Files/LB.csv"),
        "USUBJID,LBTESTCD,LBORRES,LBDTC\n\
         954.0,CGM,101,2021-06-01T10:00:00\n\
         954.0,HBA1C,48,2021-06-01T10:00:00\n\
         954.0,CGM,104,2021-06-01T10:05:00\n\
         1102.0,CGM,98,2021-06-01T10:00:00\n",
    );

    let processor =
        DatasetProcessor::new(datasets::find("t1dexi")?, config(raw.path(), out.path()));
    let stats = processor.process().await?;

    assert_eq!(stats.subjects_written, 2);
    assert_eq!(stats.rejections["excluded by predicate"], 1);

    // float-typed ids write as 954.csv, never 954.0.csv
    let dataset_dir = out.path().join("Standardized-datasets/T1DEXI");
    assert!(dataset_dir.join("954.csv").is_file());
    assert!(dataset_dir.join("1102.csv").is_file());
    assert!(!dataset_dir.join("954.0.csv").exists());

    assert_eq!(
        read_output(out.path(), "T1DEXI", "954"),
        "timestamp,glucose_value_mg_dl\n\
         2021-06-01 10:00:00,101\n\
         2021-06-01 10:05:00,104\n"
    );

    Ok(())
}

/// A tab-delimited multi-subject cohort export partitions on its subject
/// column like any comma-delimited one.
#[tokio::test]
async fn test_tab_delimited_cohort_export() -> Result<()> {
    let raw = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    write_file(
        &raw.path().join("Hall_2018_raw_data/pbio.2005143.s010"),
        "DisplayTime\tsubjectId\tGlucoseValue\n\
         2015-05-08 13:18:42\t1636-69-001\t92\n\
         2015-05-08 13:23:42\t1636-69-001\t94\n\
         2015-05-08 13:18:42\t1636-69-032\t121\n",
    );

    let processor =
        DatasetProcessor::new(datasets::find("hall_2018")?, config(raw.path(), out.path()));
    let stats = processor.process().await?;

    assert_eq!(stats.files_read, 1);
    assert_eq!(stats.subjects_written, 2);
    assert_eq!(
        read_output(out.path(), "Hall_2018", "1636-69-001"),
        "timestamp,glucose_value_mg_dl\n\
         2015-05-08 13:18:42,92\n\
         2015-05-08 13:23:42,94\n"
    );
    assert_eq!(
        read_output(out.path(), "Hall_2018", "1636-69-032"),
        "timestamp,glucose_value_mg_dl\n2015-05-08 13:18:42,121\n"
    );

    Ok(())
}
