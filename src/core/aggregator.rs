//! Turns a comma-separated payment table into a [`SummaryRecord`].
//!
//! The whole table is folded in one pass; rows are never kept in memory
//! after they have been added to the running totals.

use crate::domain::model::{PaymentRow, SummaryRecord};
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeMap;

pub const REQUIRED_COLUMNS: [&str; 4] = [
    "order_id",
    "payment_type",
    "payment_value",
    "payment_installments",
];

/// Parses `data` as CSV with a header row and summarizes every row.
pub fn summarize(data: &[u8]) -> Result<SummaryRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    ensure_required_columns(&headers)?;

    let mut accumulator = SummaryAccumulator::default();
    for (index, row) in reader.deserialize::<PaymentRow>().enumerate() {
        accumulator.push(index + 1, row?)?;
    }

    tracing::debug!("Aggregated {} payment rows", accumulator.rows);
    accumulator.finish()
}

/// Summarizes rows that were already parsed.
#[cfg(test)]
fn summarize_rows<I>(rows: I) -> Result<SummaryRecord>
where
    I: IntoIterator<Item = PaymentRow>,
{
    let mut accumulator = SummaryAccumulator::default();
    for (index, row) in rows.into_iter().enumerate() {
        accumulator.push(index + 1, row)?;
    }
    accumulator.finish()
}

fn ensure_required_columns(headers: &csv::StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(EtlError::MissingColumnError {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug)]
struct SummaryAccumulator {
    rows: usize,
    total: f64,
    max: f64,
    min: f64,
    instalments: u64,
    payment_types: BTreeMap<String, u64>,
}

impl Default for SummaryAccumulator {
    fn default() -> Self {
        Self {
            rows: 0,
            total: 0.0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
            instalments: 0,
            payment_types: BTreeMap::new(),
        }
    }
}

impl SummaryAccumulator {
    /// `row_number` is 1-based and only used for error reporting.
    fn push(&mut self, row_number: usize, row: PaymentRow) -> Result<()> {
        let value = row.payment_value;
        if !value.is_finite() {
            return Err(invalid_payment_value(row_number, value.to_string()));
        }

        let total = self.total + value;
        if !total.is_finite() {
            return Err(invalid_payment_value(
                row_number,
                format!("{} overflows the running total", value),
            ));
        }

        self.rows += 1;
        self.total = total;
        self.max = self.max.max(value);
        self.min = self.min.min(value);

        if row.payment_installments.is_some_and(|count| count > 1) {
            self.instalments += 1;
        }

        *self.payment_types.entry(row.payment_type).or_insert(0) += 1;
        Ok(())
    }

    fn finish(self) -> Result<SummaryRecord> {
        if self.rows == 0 {
            return Err(EtlError::EmptyDatasetError);
        }

        let average = self.total / self.rows as f64;

        Ok(SummaryRecord {
            total_purchase: self.total,
            average_purchase: average,
            max_value_purchase: self.max,
            min_value_purchase: self.min,
            payments_with_instalments: self.instalments,
            payment_type: self.payment_types,
        })
    }
}

fn invalid_payment_value(row: usize, value: String) -> EtlError {
    EtlError::InvalidValueError {
        row,
        column: "payment_value".to_string(),
        value,
    }
}
