use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, WepcError};
use crate::provenance::{LoadProvenance, SchemaVersion};

/// JSON form of one stored value. JSON has no literal for infinities or NaN,
/// so those are written as strings (`"inf"`, `"-inf"`, `"NaN"`).
#[derive(Debug, Clone, Copy)]
struct JsonReal(f32);

impl Serialize for JsonReal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() {
            serializer.serialize_f32(self.0)
        } else {
            serializer.collect_str(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for JsonReal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f32),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(Self(value)),
            Repr::Text(text) => match text.trim().parse::<f32>() {
                Ok(value) if !value.is_finite() => Ok(Self(value)),
                _ => Err(serde::de::Error::custom(format!(
                    "expected a number or one of \"inf\", \"-inf\", \"NaN\", found {text:?}"
                ))),
            },
        }
    }
}

fn to_json_reals(values: &[f32]) -> Vec<JsonReal> {
    values.iter().copied().map(JsonReal).collect()
}

fn from_json_reals(values: Vec<JsonReal>) -> Vec<f32> {
    values.into_iter().map(|value| value.0).collect()
}

/// Number of elements addressed by `extents`, or a shape error on overflow.
fn element_count(code: &str, extents: &[usize]) -> Result<usize, WepcError> {
    extents
        .iter()
        .try_fold(1usize, |count, &extent| count.checked_mul(extent))
        .ok_or_else(|| {
            WepcError::Shape(
                ErrorInfo::new(code, "element count overflows the address space")
                    .with_context("shape", format!("{extents:?}")),
            )
        })
}

/// Dense row-major `(frames, columns)` array of single precision values.
///
/// Progress coordinates are stored as one row per simulation frame. The JSON
/// representation is a list of rows so snapshots stay readable by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<JsonReal>>", into = "Vec<Vec<JsonReal>>")]
pub struct PcoordArray {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl PcoordArray {
    /// Wraps a flat row-major buffer, checking that it fills `rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f32>) -> Result<Self, WepcError> {
        let expected = element_count("pcoord-overflow", &[rows, cols])?;
        if values.len() != expected {
            return Err(WepcError::shape_mismatch(
                "pcoord-len",
                "progress coordinate element count",
                expected,
                values.len(),
            ));
        }
        Ok(Self { rows, cols, values })
    }

    /// Builds an array from explicit rows; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, WepcError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(WepcError::Shape(
                    ErrorInfo::new(
                        "pcoord-ragged",
                        format!("row {index} has {} columns, expected {cols}", row.len()),
                    )
                    .with_context("row", index.to_string()),
                ));
            }
            values.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, values)
    }

    /// Number of frames (rows).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per frame.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the element at `(row, col)` if it exists.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns one frame as a slice.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.values[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterates over frames in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        // `max(1)` keeps `chunks` well defined for zero-width arrays.
        self.values.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Copies out one column across all frames.
    pub fn column(&self, col: usize) -> Option<Vec<f32>> {
        if col >= self.cols {
            return None;
        }
        Some(self.iter_rows().map(|row| row[col]).collect())
    }

    /// Flat row-major view of the values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

impl TryFrom<Vec<Vec<f32>>> for PcoordArray {
    type Error = WepcError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PcoordArray> for Vec<Vec<f32>> {
    fn from(array: PcoordArray) -> Self {
        array.iter_rows().map(<[f32]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<JsonReal>>> for PcoordArray {
    type Error = WepcError;

    fn try_from(rows: Vec<Vec<JsonReal>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows.into_iter().map(from_json_reals).collect())
    }
}

impl From<PcoordArray> for Vec<Vec<JsonReal>> {
    fn from(array: PcoordArray) -> Self {
        array.iter_rows().map(to_json_reals).collect()
    }
}

#[derive(Serialize, Deserialize)]
struct RawDataset {
    shape: Vec<usize>,
    values: Vec<JsonReal>,
}

/// N-dimensional auxiliary dataset stored alongside a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset", into = "RawDataset")]
pub struct Dataset {
    shape: Vec<usize>,
    values: Vec<f32>,
}

impl Dataset {
    /// Wraps a flat row-major buffer with the given shape.
    pub fn new(shape: Vec<usize>, values: Vec<f32>) -> Result<Self, WepcError> {
        let expected = element_count("dataset-overflow", &shape)?;
        if values.len() != expected {
            return Err(WepcError::shape_mismatch(
                "dataset-len",
                format!("dataset element count for shape {shape:?}").as_str(),
                expected,
                values.len(),
            ));
        }
        Ok(Self { shape, values })
    }

    /// Extent of every axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat row-major view of the values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the element addressed by a full multi-index.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &extent) in index.iter().zip(&self.shape) {
            if i >= extent {
                return None;
            }
            offset = offset * extent + i;
        }
        self.values.get(offset).copied()
    }
}

impl TryFrom<RawDataset> for Dataset {
    type Error = WepcError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Self::new(raw.shape, from_json_reals(raw.values))
    }
}

impl From<Dataset> for RawDataset {
    fn from(dataset: Dataset) -> Self {
        Self {
            values: to_json_reals(&dataset.values),
            shape: dataset.shape,
        }
    }
}

impl From<PcoordArray> for Dataset {
    fn from(array: PcoordArray) -> Self {
        Self {
            shape: vec![array.rows, array.cols],
            values: array.values,
        }
    }
}

/// Storage contract a segment exposes to the per-segment loaders.
///
/// The progress coordinate is read through [`SegmentStorage::pcoord`] (the
/// state tracker only inspects frame 0) and replaced wholesale through
/// [`SegmentStorage::set_pcoord`]. Auxiliary datasets are keyed by field name.
pub trait SegmentStorage {
    /// Currently stored progress coordinate, if any.
    fn pcoord(&self) -> Option<&PcoordArray>;

    /// Replaces the stored progress coordinate.
    fn set_pcoord(&mut self, pcoord: PcoordArray);

    /// Looks up an auxiliary dataset.
    fn dataset(&self, field: &str) -> Option<&Dataset>;

    /// Stores an auxiliary dataset, replacing any previous value.
    fn set_dataset(&mut self, field: &str, dataset: Dataset);
}

/// One trajectory chunk between resampling events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Segment {
    /// Schema version for the serialized snapshot.
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Weighted-ensemble iteration the segment belongs to.
    #[serde(default)]
    pub n_iter: u64,
    /// Segment identifier within the iteration.
    #[serde(default)]
    pub seg_id: u64,
    /// Per-frame progress coordinate.
    #[serde(default)]
    pub pcoord: Option<PcoordArray>,
    /// Auxiliary per-segment datasets keyed by field name.
    #[serde(default)]
    pub data: BTreeMap<String, Dataset>,
    /// Loaders that have written into this segment, oldest first.
    #[serde(default)]
    pub provenance: Vec<LoadProvenance>,
}

impl Segment {
    /// Creates an empty segment.
    pub fn new(n_iter: u64, seg_id: u64) -> Self {
        Self {
            n_iter,
            seg_id,
            ..Self::default()
        }
    }

    /// Creates a segment that inherits a previously stored progress coordinate.
    pub fn with_pcoord(n_iter: u64, seg_id: u64, pcoord: PcoordArray) -> Self {
        Self {
            pcoord: Some(pcoord),
            ..Self::new(n_iter, seg_id)
        }
    }

    /// Appends a provenance record.
    pub fn record_load(&mut self, record: LoadProvenance) {
        self.provenance.push(record);
    }
}

impl SegmentStorage for Segment {
    fn pcoord(&self) -> Option<&PcoordArray> {
        self.pcoord.as_ref()
    }

    fn set_pcoord(&mut self, pcoord: PcoordArray) {
        self.pcoord = Some(pcoord);
    }

    fn dataset(&self, field: &str) -> Option<&Dataset> {
        self.data.get(field)
    }

    fn set_dataset(&mut self, field: &str, dataset: Dataset) {
        self.data.insert(field.to_string(), dataset);
    }
}
