use crate::config::settings::{StorageSettings, DEFAULT_REGION};
use crate::core::{ObjectLocation, Storage};
use crate::utils::error::{EtlError, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Builds a client on the default credential chain with the region and
    /// endpoint taken from `settings`.
    pub async fn from_settings(settings: &StorageSettings) -> Self {
        let region_provider =
            RegionProviderChain::first_try(settings.region.clone().map(Region::new))
                .or_default_provider()
                .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared_config = loader.load().await;

        let config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(settings.force_path_style)
            .build();

        tracing::debug!(
            "S3 client ready (region: {:?}, endpoint: {:?}, path style: {})",
            shared_config.region(),
            settings.endpoint_url,
            settings.force_path_style
        );

        Self::new(S3Client::from_conf(config))
    }
}

/// Maps an S3 error code onto the transport taxonomy.
fn classify<E>(
    operation: &'static str,
    location: &ObjectLocation,
    code: Option<&str>,
    error: &E,
) -> EtlError
where
    E: std::error::Error,
{
    let message = DisplayErrorContext(error).to_string();
    match code {
        Some("NoSuchKey") | Some("NotFound") | Some("NoSuchBucket") if operation == "get" => {
            EtlError::ObjectNotFound {
                location: location.to_string(),
            }
        }
        Some("AccessDenied") | Some("Forbidden") => EtlError::AccessDenied {
            location: location.to_string(),
            message,
        },
        _ => EtlError::StorageError {
            operation,
            location: location.to_string(),
            message,
        },
    }
}

impl Storage for S3Storage {
    async fn read_object(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|err| {
                let code = err.code().map(str::to_owned);
                match err.as_service_error() {
                    Some(GetObjectError::NoSuchKey(_)) => EtlError::ObjectNotFound {
                        location: location.to_string(),
                    },
                    _ => classify("get", location, code.as_deref(), &err),
                }
            })?;

        let data = response.body.collect().await.map_err(|e| EtlError::StorageError {
            operation: "get",
            location: location.to_string(),
            message: format!("Failed to collect object body: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_object(
        &self,
        location: &ObjectLocation,
        content_type: &str,
        data: &[u8],
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|err| {
                let code = err.code().map(str::to_owned);
                classify("put", location, code.as_deref(), &err)
            })?;

        Ok(())
    }
}
