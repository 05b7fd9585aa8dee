use crate::core::aggregator;
use crate::core::{ConfigProvider, Pipeline, Storage, SummaryRecord};
use crate::utils::error::Result;

pub const OUTPUT_CONTENT_TYPE: &str = "application/json";

pub struct SummaryPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SummaryPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SummaryPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<u8>> {
        let source = self.config.source();
        tracing::debug!("Reading source object {}", source);

        let data = self.storage.read_object(&source).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), source);

        Ok(data)
    }

    async fn transform(&self, data: Vec<u8>) -> Result<SummaryRecord> {
        aggregator::summarize(&data)
    }

    async fn load(&self, summary: SummaryRecord) -> Result<String> {
        let destination = self.config.destination();
        let payload = serde_json::to_vec(&summary)?;

        tracing::debug!(
            "Writing summary ({} bytes) to {}",
            payload.len(),
            destination
        );
        self.storage
            .write_object(&destination, OUTPUT_CONTENT_TYPE, &payload)
            .await?;

        Ok(destination.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ObjectLocation;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        objects: Arc<Mutex<HashMap<ObjectLocation, (String, Vec<u8>)>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                objects: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, location: ObjectLocation, data: &[u8]) {
            let mut objects = self.objects.lock().await;
            objects.insert(location, ("text/csv".to_string(), data.to_vec()));
        }

        async fn get(&self, location: &ObjectLocation) -> Option<(String, Vec<u8>)> {
            let objects = self.objects.lock().await;
            objects.get(location).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_object(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
            let objects = self.objects.lock().await;
            objects
                .get(location)
                .map(|(_, data)| data.clone())
                .ok_or_else(|| EtlError::ObjectNotFound {
                    location: location.to_string(),
                })
        }

        async fn write_object(
            &self,
            location: &ObjectLocation,
            content_type: &str,
            data: &[u8],
        ) -> Result<()> {
            let mut objects = self.objects.lock().await;
            objects.insert(
                location.clone(),
                (content_type.to_string(), data.to_vec()),
            );
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn source(&self) -> ObjectLocation {
            ObjectLocation::new("raw", "payments.csv")
        }

        fn destination(&self) -> ObjectLocation {
            ObjectLocation::new("reports", "summary.json")
        }
    }

    const PAYMENTS: &[u8] = b"order_id,payment_type,payment_installments,payment_value\n\
                              1,credit_card,3,100.0\n\
                              2,voucher,1,50.0\n";

    #[tokio::test]
    async fn test_extract_reads_source_object() {
        let storage = MockStorage::new();
        storage.put(TestConfig.source(), PAYMENTS).await;
        let pipeline = SummaryPipeline::new(storage, TestConfig);

        let data = pipeline.extract().await.unwrap();
        assert_eq!(data, PAYMENTS);
    }

    #[tokio::test]
    async fn test_extract_missing_source() {
        let pipeline = SummaryPipeline::new(MockStorage::new(), TestConfig);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::ObjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_writes_json_document() {
        let storage = MockStorage::new();
        let pipeline = SummaryPipeline::new(storage.clone(), TestConfig);

        let summary = pipeline.transform(PAYMENTS.to_vec()).await.unwrap();
        let output = pipeline.load(summary).await.unwrap();
        assert_eq!(output, "s3://reports/summary.json");

        let (content_type, body) = storage.get(&TestConfig.destination()).await.unwrap();
        assert_eq!(content_type, OUTPUT_CONTENT_TYPE);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert_eq!(json["total_purchase"], 150.0);
        assert_eq!(json["average_purchase"], 75.0);
        assert_eq!(json["max_value_purchase"], 100.0);
        assert_eq!(json["min_value_purchase"], 50.0);
        assert_eq!(json["payments_with_instalments"], 1);
        assert_eq!(
            json["payment_type"],
            serde_json::json!({"credit_card": 1, "voucher": 1})
        );
    }

    #[tokio::test]
    async fn test_load_overwrites_existing_object() {
        let storage = MockStorage::new();
        storage.put(TestConfig.destination(), b"stale").await;
        let pipeline = SummaryPipeline::new(storage.clone(), TestConfig);

        let summary = pipeline.transform(PAYMENTS.to_vec()).await.unwrap();
        pipeline.load(summary).await.unwrap();

        let (_, body) = storage.get(&TestConfig.destination()).await.unwrap();
        assert_ne!(body, b"stale");
    }
}
