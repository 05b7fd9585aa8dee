use crate::config::settings::StorageSettings;
use crate::core::{ConfigProvider, ObjectLocation};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_s3_bucket_name, Validate};
use serde::{Deserialize, Serialize};
use std::env;

/// Invocation payload. Any field left out is read from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LambdaRequest {
    pub source_bucket: Option<String>,
    pub source_file: Option<String>,
    pub destination_bucket: Option<String>,
    pub destination_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub source_bucket: String,
    pub source_file: String,
    pub destination_bucket: String,
    pub destination_file: String,
    pub s3_region: Option<String>,
    pub s3_endpoint_url: Option<String>,
}

impl LambdaConfig {
    pub fn from_request(request: LambdaRequest) -> Result<Self> {
        Self::resolve(request, |name| env::var(name).ok())
    }

    fn resolve<F>(request: LambdaRequest, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |value: Option<String>, var: &str| -> Result<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup(var))
                .ok_or_else(|| EtlError::MissingConfigError {
                    field: format!("{} (event field or environment variable)", var),
                })
        };

        Ok(Self {
            source_bucket: required(request.source_bucket, "SOURCE_BUCKET")?,
            source_file: required(request.source_file, "SOURCE_FILE")?,
            destination_bucket: required(request.destination_bucket, "DESTINATION_BUCKET")?,
            destination_file: required(request.destination_file, "DESTINATION_FILE")?,
            s3_region: lookup("S3_REGION"),
            s3_endpoint_url: lookup("S3_ENDPOINT_URL"),
        })
    }

    pub fn storage_settings(&self) -> StorageSettings {
        StorageSettings {
            region: self.s3_region.clone(),
            force_path_style: self.s3_endpoint_url.is_some(),
            endpoint_url: self.s3_endpoint_url.clone(),
            ..StorageSettings::default()
        }
    }
}

impl ConfigProvider for LambdaConfig {
    fn source(&self) -> ObjectLocation {
        ObjectLocation::new(&self.source_bucket, &self.source_file)
    }

    fn destination(&self) -> ObjectLocation {
        ObjectLocation::new(&self.destination_bucket, &self.destination_file)
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        // 驗證來源與目的地
        validate_s3_bucket_name("source_bucket", &self.source_bucket)?;
        validate_non_empty_string("source_file", &self.source_file)?;
        validate_s3_bucket_name("destination_bucket", &self.destination_bucket)?;
        validate_non_empty_string("destination_file", &self.destination_file)?;

        // 驗證 S3 設定
        self.storage_settings().validate()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
