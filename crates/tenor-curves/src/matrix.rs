//! Labeled rate matrices.

use nalgebra::DMatrix;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::curve::RateCurve;
use crate::error::{CurveError, CurveResult};

/// Rates stacked across observations.
///
/// Rows are observations in the order they were supplied, columns are rungs.
/// Only complete curves are ever stacked.
#[derive(Debug, Clone, PartialEq)]
pub struct RateMatrix {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: DMatrix<f64>,
}

impl RateMatrix {
    /// Creates a matrix, checking that labels match its shape.
    pub fn new(
        row_labels: Vec<String>,
        column_labels: Vec<String>,
        values: DMatrix<f64>,
    ) -> CurveResult<Self> {
        if row_labels.len() != values.nrows() || column_labels.len() != values.ncols() {
            return Err(CurveError::malformed_curve(format!(
                "{}x{} labels for a {}x{} matrix",
                row_labels.len(),
                column_labels.len(),
                values.nrows(),
                values.ncols()
            )));
        }
        Ok(Self {
            row_labels,
            column_labels,
            values,
        })
    }

    /// Stacks named curves into rows.
    ///
    /// # Errors
    ///
    /// [`CurveError::MalformedCurve`] when a curve's labels differ from the
    /// first curve's, and [`CurveError::InsufficientData`] for no curves.
    pub fn from_curves<'a, I>(curves: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a RateCurve)>,
    {
        let mut row_labels = Vec::new();
        let mut column_labels: Option<Vec<String>> = None;
        let mut data = Vec::new();

        for (name, curve) in curves {
            let labels: Vec<String> = curve.labels().into_iter().map(String::from).collect();
            match &column_labels {
                Some(existing) if *existing != labels => {
                    return Err(CurveError::malformed_curve(format!(
                        "observation '{name}' has rungs {labels:?}, expected {existing:?}"
                    )));
                }
                Some(_) => {}
                None => column_labels = Some(labels),
            }
            row_labels.push(name.to_string());
            data.extend_from_slice(curve.rates());
        }

        let column_labels =
            column_labels.ok_or_else(|| CurveError::insufficient_data("rate matrix", 1, 0))?;
        let values = DMatrix::from_row_slice(row_labels.len(), column_labels.len(), &data);
        Self::new(row_labels, column_labels, values)
    }

    /// Observation names.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Rung labels.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// The numeric matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Number of observations.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of rungs.
    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// One observation's rates.
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        (index < self.nrows()).then(|| self.values.row(index).iter().copied().collect())
    }

    /// Rows as plain vectors.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values
            .row_iter()
            .map(|r| r.iter().copied().collect())
            .collect()
    }
}

impl Serialize for RateMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RateMatrix", 3)?;
        state.serialize_field("rows", &self.row_labels)?;
        state.serialize_field("columns", &self.column_labels)?;
        state.serialize_field("values", &self.rows())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rungs::RungSet;

    fn curve(rates: &[f64]) -> RateCurve {
        RateCurve::new(RungSet::annual(rates.len()).unwrap().as_slice().to_vec(), rates.to_vec())
            .unwrap()
    }

    #[test]
    fn test_from_curves_keeps_order() {
        let a = curve(&[0.03, 0.031]);
        let b = curve(&[0.032, 0.033]);
        let m = RateMatrix::from_curves([("feb", &b), ("jan", &a)]).unwrap();

        assert_eq!(m.row_labels(), ["feb", "jan"]);
        assert_eq!(m.column_labels(), ["1yr", "2yr"]);
        assert_eq!(m.row(0), Some(vec![0.032, 0.033]));
        assert_eq!(m.values()[(1, 1)], 0.031);
        assert_eq!(m.row(2), None);
    }

    #[test]
    fn test_rejects_mismatched_rungs() {
        let a = curve(&[0.03, 0.031]);
        let b = curve(&[0.03, 0.031, 0.032]);
        assert!(RateMatrix::from_curves([("a", &a), ("b", &b)]).is_err());
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<(&str, &RateCurve)> = Vec::new();
        assert!(matches!(
            RateMatrix::from_curves(none),
            Err(CurveError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_label_shape_checked() {
        let values = DMatrix::zeros(2, 2);
        assert!(RateMatrix::new(vec!["a".into()], vec!["x".into(), "y".into()], values).is_err());
    }

    #[test]
    fn test_json_shape() {
        let m = RateMatrix::from_curves([("jan", &curve(&[0.03, 0.031]))]).unwrap();
        let json = serde_json::to_value(&m).unwrap();

        assert_eq!(json["rows"][0], "jan");
        assert_eq!(json["columns"][1], "2yr");
        assert_eq!(json["values"][0][1], 0.031);
    }
}
