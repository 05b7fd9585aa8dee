use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static BUCKET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("bucket name pattern is valid")
});

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !BUCKET_NAME.is_match(bucket_name) {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots, \
             and must start and end with a letter or number",
        ));
    }

    if bucket_name.contains("..") {
        return Err(invalid("S3 bucket name cannot contain consecutive dots"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint_url", "https://s3.example.com").is_ok());
        assert!(validate_url("endpoint_url", "http://localhost:9000").is_ok());
        assert!(validate_url("endpoint_url", "").is_err());
        assert!(validate_url("endpoint_url", "invalid-url").is_err());
        assert!(validate_url("endpoint_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_s3_bucket_name() {
        assert!(validate_s3_bucket_name("source_bucket", "olist-raw-data").is_ok());
        assert!(validate_s3_bucket_name("source_bucket", "reports.2024").is_ok());
        assert!(validate_s3_bucket_name("source_bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("source_bucket", "Upper-Case").is_err());
        assert!(validate_s3_bucket_name("source_bucket", "-leading").is_err());
        assert!(validate_s3_bucket_name("source_bucket", "trailing-").is_err());
        assert!(validate_s3_bucket_name("source_bucket", "double..dot").is_err());
        assert!(validate_s3_bucket_name("source_bucket", "under_score").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("source_file", "payments.csv").is_ok());
        assert!(validate_non_empty_string("source_file", "/data/payments.csv").is_ok());
        assert!(validate_non_empty_string("source_file", "").is_err());
        assert!(validate_non_empty_string("source_file", "  ").is_err());
    }
}
