//! Model feature matrices.

use nalgebra::DMatrix;

use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeRecord;

/// Named feature columns over an `nrows × ncols` matrix of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: DMatrix<f64>,
}

impl FeatureMatrix {
    /// Builds a matrix from rows of values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if a row's width differs from
    /// the number of columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_advisor::prediction::FeatureMatrix;
    ///
    /// let matrix = FeatureMatrix::new(
    ///     vec!["Experience".to_string()],
    ///     vec![vec![1.0], vec![4.5]],
    /// ).unwrap();
    /// assert_eq!(matrix.n_rows(), 2);
    /// assert_eq!(matrix.row(1), vec![4.5]);
    /// ```
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> EngineResult<Self> {
        let width = columns.len();
        let mut flat = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::CalculationError {
                    message: format!(
                        "feature row {} has {} values, expected {}",
                        index,
                        row.len(),
                        width
                    ),
                });
            }
            flat.extend_from_slice(row);
        }
        Ok(Self {
            columns,
            values: DMatrix::from_row_slice(rows.len(), width, &flat),
        })
    }

    /// Extracts the named numeric columns from employee records, one row per
    /// record in order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if a column is not a numeric
    /// employee field.
    pub fn from_records(records: &[EmployeeRecord], columns: &[String]) -> EngineResult<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let row = columns
                .iter()
                .map(|column| {
                    record
                        .numeric_feature(column)
                        .ok_or_else(|| EngineError::CalculationError {
                            message: format!("'{}' cannot be used as a model feature", column),
                        })
                })
                .collect::<EngineResult<Vec<f64>>>()?;
            rows.push(row);
        }
        Self::new(columns.to_vec(), rows)
    }

    /// Feature column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// The underlying matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Returns one row of values.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_rows()`.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.values.row(index).iter().copied().collect()
    }

    /// Returns a single value.
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.values[(row, feature)]
    }

    /// Whether every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
