use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One transaction row of the source table. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRow {
    pub order_id: String,
    pub payment_type: String,
    pub payment_value: f64,
    pub payment_installments: Option<i64>,
}

/// The aggregated output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub total_purchase: f64,
    pub average_purchase: f64,
    pub max_value_purchase: f64,
    pub min_value_purchase: f64,
    pub payments_with_instalments: u64,
    pub payment_type: BTreeMap<String, u64>,
}

impl SummaryRecord {
    /// Every row lands in exactly one payment type bucket.
    pub fn row_count(&self) -> usize {
        self.payment_type.values().sum::<u64>() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// What a finished run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_location: String,
    pub rows_processed: usize,
}
