use aws_config::{timeout::TimeoutConfig, Region};
use log::info;
use std::time::Duration;

const DEFAULT_REGION: &str = "us-east-1"; // AWS default

/// Overrides handed to the AWS configuration loader.
///
/// Every field left as `None` falls through to the SDK's default provider
/// chains (environment, shared profile files, instance metadata).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub region: Option<String>,
    /// e.g. `http://minio:9000`; enables path-style addressing
    pub endpoint_url: Option<String>,
    pub profile_name: Option<String>,
    pub operation_attempt_timeout_secs: Option<u64>,
}

impl StoreConfig {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    pub fn operation_attempt_timeout_secs(mut self, secs: u64) -> Self {
        self.operation_attempt_timeout_secs = Some(secs);
        self
    }

    /// Resolve the S3 client configuration.
    pub async fn load(&self) -> aws_sdk_s3::Config {
        let mut config_loader = aws_config::from_env();
        if let Some(region) = &self.region {
            config_loader = config_loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config_loader = config_loader.endpoint_url(endpoint_url);
        }
        if let Some(profile_name) = &self.profile_name {
            config_loader = config_loader.profile_name(profile_name);
        }
        if let Some(secs) = self.operation_attempt_timeout_secs {
            config_loader = config_loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_attempt_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }

        let sdk_config = config_loader.load().await;
        let mut config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if sdk_config.region().is_none() {
            info!(
                "Can't resolve region. Using default region: {}",
                DEFAULT_REGION
            );
            config_builder = config_builder.region(Region::new(DEFAULT_REGION));
        }
        if self.endpoint_url.is_some() {
            // http://minio:9000 style endpoints don't resolve virtual-hosted buckets
            config_builder = config_builder.force_path_style(true);
        }
        config_builder.build()
    }
}
