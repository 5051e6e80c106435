use blobstore::{Store, StoreConfig};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// The bucket name
    #[clap(short, long)]
    pub bucket: String,
    /// The region
    #[clap(short, long)]
    pub region: Option<String>,
    /// The endpoint URL
    #[clap(short, long)]
    pub endpoint_url: Option<String>,
    /// The AWS profile to load credentials and settings from
    #[clap(long)]
    pub profile: Option<String>,
    /// Per-attempt timeout in seconds, left to the SDK when unset
    #[clap(long)]
    pub timeout_secs: Option<u64>,
}

impl StoreArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile_name: self.profile.clone(),
            operation_attempt_timeout_secs: self.timeout_secs,
        }
    }

    pub async fn connect(&self) -> Store {
        Store::with_config(&self.bucket, self.store_config()).await
    }
}

/// Strip `prefix` from the front of `key` unless asked to keep it.
pub fn display_key<'a>(key: &'a str, prefix: &str, keep_prefix: bool) -> &'a str {
    if keep_prefix {
        key
    } else {
        key.strip_prefix(prefix).unwrap_or(key)
    }
}
