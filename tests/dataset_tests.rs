use std::io::{self, Read};

use tchart::ChartError;
use tchart::core::{
    ChartDataset, DatasetSource, JsonDatasetSource, Series, SeriesColor, StaticDatasetSource,
};

const GREEN: SeriesColor = SeriesColor::rgb(0x3d, 0xc2, 0x3f);
const RED: SeriesColor = SeriesColor::rgb(0xf3, 0x4c, 0x44);

fn two_series_dataset() -> ChartDataset {
    ChartDataset::new(
        vec![1_542_412_800_000, 1_542_499_200_000, 1_542_585_600_000],
        vec![
            Series::new("#0", GREEN, vec![37, 20, 32]),
            Series::new("#1", RED, vec![22, 12, 30]),
        ],
    )
    .expect("valid dataset")
}

#[test]
fn mismatched_names_are_malformed() {
    let err = ChartDataset::from_columns(
        vec![0, 1],
        vec![vec![1, 2], vec![3, 4]],
        vec!["only one".to_owned()],
        vec![GREEN, RED],
    )
    .expect_err("names length mismatch");
    assert!(matches!(err, ChartError::MalformedData(_)));
}

#[test]
fn mismatched_colors_are_malformed() {
    let err = ChartDataset::from_columns(
        vec![0, 1],
        vec![vec![1, 2]],
        vec!["a".to_owned()],
        vec![GREEN, RED],
    )
    .expect_err("colors length mismatch");
    assert!(matches!(err, ChartError::MalformedData(_)));
}

#[test]
fn series_length_must_match_axis() {
    let err = ChartDataset::new(
        vec![0, 1, 2],
        vec![
            Series::new("a", GREEN, vec![1, 2, 3]),
            Series::new("b", RED, vec![1, 2]),
        ],
    )
    .expect_err("short series");
    assert!(matches!(err, ChartError::MalformedData(_)));
}

#[test]
fn json_form_round_trips() {
    let dataset = two_series_dataset();
    let json = dataset.to_json_pretty().expect("serialize");
    assert!(json.contains("\"#3dc23f\""));

    let restored = ChartDataset::from_json_str(&json).expect("parse");
    assert_eq!(restored, dataset);
}

#[test]
fn json_with_invalid_color_is_malformed() {
    let input = r##"{
        "axis": [0, 1],
        "values": [[1, 2]],
        "names": ["a"],
        "colors": ["#12"]
    }"##;
    let err = ChartDataset::from_json_str(input).expect_err("bad color");
    assert!(matches!(err, ChartError::MalformedData(_)));
}

#[test]
fn json_with_unsorted_axis_is_malformed() {
    let input = r##"{
        "axis": [2, 1],
        "values": [],
        "names": [],
        "colors": []
    }"##;
    let err = ChartDataset::from_json_str(input).expect_err("unsorted axis");
    assert!(matches!(err, ChartError::MalformedData(_)));
}

#[test]
fn static_source_hands_out_dataset() {
    let dataset = two_series_dataset();
    let mut source = StaticDatasetSource::new(dataset.clone());
    assert_eq!(source.load_dataset().expect("load"), dataset);
    assert_eq!(source.load_dataset().expect("load twice"), dataset);
}

#[test]
fn json_source_reads_from_stream() {
    let json = two_series_dataset().to_json_pretty().expect("serialize");
    let mut source = JsonDatasetSource::new(json.as_bytes());
    let dataset = source.load_dataset().expect("load");
    assert_eq!(dataset.series_count(), 2);
    assert_eq!(dataset.axis_len(), 3);
    assert_eq!(dataset.series_at(1).expect("series").name, "#1");
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }
}

#[test]
fn json_source_maps_read_failures_to_io() {
    let mut source = JsonDatasetSource::new(FailingReader);
    let err = source.load_dataset().expect_err("read failure");
    assert!(matches!(err, ChartError::Io(_)));
}
