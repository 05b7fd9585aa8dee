use crate::domain::model::{ObjectLocation, SummaryRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_object(
        &self,
        location: &ObjectLocation,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Stores `data` at `location`, replacing any existing object.
    fn write_object(
        &self,
        location: &ObjectLocation,
        content_type: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> ObjectLocation;
    fn destination(&self) -> ObjectLocation;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<u8>>;
    async fn transform(&self, data: Vec<u8>) -> Result<SummaryRecord>;
    async fn load(&self, summary: SummaryRecord) -> Result<String>;
}
