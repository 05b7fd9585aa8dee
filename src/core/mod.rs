pub mod aggregator;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{ObjectLocation, PaymentRow, RunReport, SummaryRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
