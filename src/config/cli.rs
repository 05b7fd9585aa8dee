use crate::config::settings::{Settings, StorageBackend};
use crate::core::{ConfigProvider, ObjectLocation};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_s3_bucket_name, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "payment-summary")]
#[command(about = "Summarize a payment transaction table stored in object storage")]
pub struct CliConfig {
    #[arg(long = "source_bucket", help = "Bucket holding the payments CSV")]
    pub source_bucket: String,

    #[arg(long = "source_file", help = "Object key of the payments CSV")]
    pub source_file: String,

    #[arg(long = "destination_bucket", help = "Bucket receiving the JSON summary")]
    pub destination_bucket: String,

    #[arg(long = "destination_file", help = "Object key of the JSON summary")]
    pub destination_file: String,

    #[arg(long, value_name = "FILE", help = "Optional TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Read and write <DIR>/<bucket>/<key> instead of S3"
    )]
    pub local_root: Option<PathBuf>,

    #[arg(long, help = "AWS region for the S3 client")]
    pub region: Option<String>,

    #[arg(long, help = "Custom S3-compatible endpoint URL")]
    pub endpoint_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Loads the settings file (if any) and applies command line overrides on top.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if let Some(root) = &self.local_root {
            settings.storage.backend = StorageBackend::Local;
            settings.storage.local_root = Some(root.clone());
        }
        if let Some(region) = &self.region {
            settings.storage.region = Some(region.clone());
        }
        if let Some(endpoint) = &self.endpoint_url {
            settings.storage.endpoint_url = Some(endpoint.clone());
            // S3-compatible servers rarely support virtual-hosted buckets
            settings.storage.force_path_style = true;
        }
        if self.monitor {
            settings.monitoring.enabled = true;
        }

        settings.validate()?;
        if settings.storage.backend == StorageBackend::S3 {
            validate_s3_bucket_name("source_bucket", &self.source_bucket)?;
            validate_s3_bucket_name("destination_bucket", &self.destination_bucket)?;
        }

        Ok(settings)
    }
}

impl ConfigProvider for CliConfig {
    fn source(&self) -> ObjectLocation {
        ObjectLocation::new(&self.source_bucket, &self.source_file)
    }

    fn destination(&self) -> ObjectLocation {
        ObjectLocation::new(&self.destination_bucket, &self.destination_file)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("source_bucket", &self.source_bucket)?;
        validate_non_empty_string("source_file", &self.source_file)?;
        validate_non_empty_string("destination_bucket", &self.destination_bucket)?;
        validate_non_empty_string("destination_file", &self.destination_file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;

    const REQUIRED: [&str; 9] = [
        "payment-summary",
        "--source_bucket",
        "olist-raw",
        "--source_file",
        "olist_order_payments_dataset.csv",
        "--destination_bucket",
        "olist-reports",
        "--destination_file",
        "payments_summary.json",
    ];

    #[test]
    fn test_parse_required_flags() {
        let config = CliConfig::try_parse_from(REQUIRED).unwrap();

        assert_eq!(
            config.source(),
            ObjectLocation::new("olist-raw", "olist_order_payments_dataset.csv")
        );
        assert_eq!(
            config.destination(),
            ObjectLocation::new("olist-reports", "payments_summary.json")
        );
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_flag_is_usage_error() {
        for skipped in [1, 3, 5, 7] {
            let args: Vec<&str> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skipped && *i != skipped + 1)
                .map(|(_, arg)| *arg)
                .collect();

            let err = CliConfig::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
            assert_ne!(err.exit_code(), 0);
        }
    }

    #[test]
    fn test_default_settings_use_s3() {
        let config = CliConfig::try_parse_from(REQUIRED).unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.storage.backend, StorageBackend::S3);
        assert!(!settings.monitoring.enabled);
    }

    #[test]
    fn test_local_root_overrides_backend() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--local-root", "/tmp/buckets", "--monitor"]);
        let config = CliConfig::try_parse_from(args).unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Local);
        assert_eq!(
            settings.storage.local_root,
            Some(PathBuf::from("/tmp/buckets"))
        );
        assert!(settings.monitoring.enabled);
    }

    #[test]
    fn test_endpoint_override_enables_path_style() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--endpoint-url", "http://localhost:9000", "--region", "sa-east-1"]);
        let config = CliConfig::try_parse_from(args).unwrap();

        let settings = config.settings().unwrap();
        assert!(settings.storage.force_path_style);
        assert_eq!(settings.storage.region.as_deref(), Some("sa-east-1"));
    }

    #[test]
    fn test_invalid_bucket_rejected_for_s3() {
        let mut args = REQUIRED.to_vec();
        args[2] = "Not_A_Bucket";
        let config = CliConfig::try_parse_from(args).unwrap();

        assert!(matches!(
            config.settings(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_any_bucket_name_allowed_locally() {
        let mut args = REQUIRED.to_vec();
        args[2] = "Local_Dir";
        args.extend(["--local-root", "/tmp/buckets"]);
        let config = CliConfig::try_parse_from(args).unwrap();

        assert!(config.settings().is_ok());
    }

    #[test]
    fn test_absolute_style_key_is_valid_for_s3() {
        let mut args = REQUIRED.to_vec();
        args[4] = "/data/payments.csv";
        args[8] = "a/../b.json";
        let config = CliConfig::try_parse_from(args).unwrap();

        assert!(config.validate().is_ok());
        assert!(config.settings().is_ok());
        assert_eq!(config.source().key, "/data/payments.csv");
    }

    #[test]
    fn test_empty_location_fails_validation() {
        let mut args = REQUIRED.to_vec();
        args[4] = "";
        let config = CliConfig::try_parse_from(args).unwrap();

        assert!(config.validate().is_err());
    }
}
