use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SeriesColor;
use crate::error::{ChartError, ChartResult};

/// One named, colored line sharing the dataset time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub values: Vec<i64>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, color: SeriesColor, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
        }
    }
}

/// Immutable time-series data shared by every view of one chart.
///
/// Construction enforces the structural invariants; a dataset that exists is
/// always chartable, so no consumer re-validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChartDataset", into = "RawChartDataset")]
pub struct ChartDataset {
    axis: Vec<i64>,
    series: Vec<Series>,
}

impl ChartDataset {
    pub fn new(axis: Vec<i64>, series: Vec<Series>) -> ChartResult<Self> {
        if axis.len() < 2 {
            return Err(ChartError::MalformedData(format!(
                "time axis must contain at least 2 points, got {}",
                axis.len()
            )));
        }
        if axis.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ChartError::MalformedData(
                "time axis must be sorted in ascending order".to_owned(),
            ));
        }

        for (index, item) in series.iter().enumerate() {
            if item.values.len() != axis.len() {
                return Err(ChartError::MalformedData(format!(
                    "series #{index} (`{}`) has {} values, every series has to contain {}",
                    item.name,
                    item.values.len(),
                    axis.len()
                )));
            }
        }

        debug!(
            axis_len = axis.len(),
            series_count = series.len(),
            "chart dataset constructed"
        );
        Ok(Self { axis, series })
    }

    /// Builds a dataset from parallel column arrays, the shape produced by
    /// column-oriented loaders.
    pub fn from_columns(
        axis: Vec<i64>,
        values: Vec<Vec<i64>>,
        names: Vec<String>,
        colors: Vec<SeriesColor>,
    ) -> ChartResult<Self> {
        if names.len() != values.len() {
            return Err(ChartError::MalformedData(format!(
                "series and names have to contain the same number of elements ({} != {})",
                values.len(),
                names.len()
            )));
        }
        if colors.len() != values.len() {
            return Err(ChartError::MalformedData(format!(
                "series and colors have to contain the same number of elements ({} != {})",
                values.len(),
                colors.len()
            )));
        }

        let series = values
            .into_iter()
            .zip(names)
            .zip(colors)
            .map(|((values, name), color)| Series::new(name, color, values))
            .collect();
        Self::new(axis, series)
    }

    #[must_use]
    pub fn axis(&self) -> &[i64] {
        &self.axis
    }

    #[must_use]
    pub fn axis_len(&self) -> usize {
        self.axis.len()
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series_at(&self, index: usize) -> ChartResult<&Series> {
        self.series.get(index).ok_or(ChartError::IndexOutOfRange {
            index,
            len: self.series.len(),
        })
    }

    /// Parses the dataset's own JSON form (see [`RawChartDataset`]).
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(map_json_error)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize dataset: {e}")))
    }
}

/// Serialized form of [`ChartDataset`]: one axis column and parallel series
/// columns. Colors are `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChartDataset {
    pub axis: Vec<i64>,
    pub values: Vec<Vec<i64>>,
    pub names: Vec<String>,
    pub colors: Vec<String>,
}

impl TryFrom<RawChartDataset> for ChartDataset {
    type Error = ChartError;

    fn try_from(raw: RawChartDataset) -> ChartResult<Self> {
        let colors = raw
            .colors
            .iter()
            .map(|color| SeriesColor::from_hex(color))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::from_columns(raw.axis, raw.values, raw.names, colors)
    }
}

impl From<ChartDataset> for RawChartDataset {
    fn from(dataset: ChartDataset) -> Self {
        let mut values = Vec::with_capacity(dataset.series.len());
        let mut names = Vec::with_capacity(dataset.series.len());
        let mut colors = Vec::with_capacity(dataset.series.len());
        for series in dataset.series {
            values.push(series.values);
            names.push(series.name);
            colors.push(series.color.to_hex());
        }

        Self {
            axis: dataset.axis,
            values,
            names,
            colors,
        }
    }
}

/// Ingestion boundary implemented by data-loading collaborators.
pub trait DatasetSource {
    fn load_dataset(&mut self) -> ChartResult<ChartDataset>;
}

/// Source handing out an already-built dataset.
#[derive(Debug, Clone)]
pub struct StaticDatasetSource {
    dataset: ChartDataset,
}

impl StaticDatasetSource {
    #[must_use]
    pub fn new(dataset: ChartDataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for StaticDatasetSource {
    fn load_dataset(&mut self) -> ChartResult<ChartDataset> {
        Ok(self.dataset.clone())
    }
}

/// Source reading the dataset JSON form from any byte stream.
#[derive(Debug)]
pub struct JsonDatasetSource<R> {
    reader: R,
}

impl<R: Read> JsonDatasetSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> DatasetSource for JsonDatasetSource<R> {
    fn load_dataset(&mut self) -> ChartResult<ChartDataset> {
        serde_json::from_reader(&mut self.reader).map_err(map_json_error)
    }
}

fn map_json_error(error: serde_json::Error) -> ChartError {
    if error.is_io() {
        return ChartError::Io(error.into());
    }
    ChartError::MalformedData(format!("failed to parse dataset json: {error}"))
}
