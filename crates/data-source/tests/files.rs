use efx_data_source::{CsvDirectory, JsonFileSink, MissingDataset, RawDataSource, ResultSink};
use efx_primitives::{EmissionRecord, SeriesKind};
use std::fs;


const GAS_CSV: &str = "\
\"Date(UTC)\",\"UnixTimeStamp\",\"Value\"
\"7/30/2015\",\"1438214400\",\"0\"
\"7/31/2015\",\"1438300800\",\"0\"
\"8/1/2015\",\"1438387200\",\"2012\"
\"8/2/2015\",\"1438473600\",\"1094\"
";


#[test]
fn loads_quoted_csv() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("GasUsed-2022-06-01.csv"), GAS_CSV)?;

    let rows = CsvDirectory::new(dir.path()).load_series(SeriesKind::GasUsed)?;

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].date_label, "7/30/2015");
    assert_eq!(rows[2].unix_timestamp, 1438387200);
    assert_eq!(rows[3].value, 1094.0);
    Ok(())
}


#[test]
fn newest_export_wins() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("NetworkHash-2021-01-01.csv"), "Date(UTC),UnixTimeStamp,Value\n1/1/2021,1609459200,1.5\n")?;
    fs::write(dir.path().join("NetworkHash-2022-01-01.csv"), "Date(UTC),UnixTimeStamp,Value\n1/1/2022,1640995200,2.5\n")?;
    fs::write(dir.path().join("GasUsed-2023-01-01.csv"), GAS_CSV)?;

    let source = CsvDirectory::new(dir.path());
    let path = source.find_dataset(SeriesKind::NetworkHash)?;
    assert!(path.ends_with("NetworkHash-2022-01-01.csv"));

    let rows = source.load_series(SeriesKind::NetworkHash)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, 2.5);
    Ok(())
}


#[test]
fn missing_dataset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("GasUsed.csv"), GAS_CSV).unwrap();

    let err = CsvDirectory::new(dir.path())
        .load_series(SeriesKind::NetworkHash)
        .unwrap_err();

    let missing = err.downcast_ref::<MissingDataset>().unwrap();
    assert_eq!(missing.kind, SeriesKind::NetworkHash);
}


#[test]
fn unordered_rows_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("GasUsed.csv"),
        "Date(UTC),UnixTimeStamp,Value\n8/1/2015,1438387200,1\n7/31/2015,1438300800,2\n"
    ).unwrap();

    let result = CsvDirectory::new(dir.path()).load_series(SeriesKind::GasUsed);
    assert!(result.is_err());
}


#[test]
fn sink_overwrites_previous_table() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("emissionFactorTable.json");
    fs::write(&path, "stale")?;

    let records = vec![
        EmissionRecord { unix_time: 1438214400, block_number: 0, emission_factor: 0.0 },
        EmissionRecord { unix_time: 1440806400, block_number: 100000, emission_factor: 0.25 }
    ];
    JsonFileSink::new(&path).persist(&records)?;

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(written, serde_json::json!([
        { "unixTime": 1438214400, "blockNumber": 0, "emissionFactor": 0.0 },
        { "unixTime": 1440806400, "blockNumber": 100000, "emissionFactor": 0.25 }
    ]));
    Ok(())
}
