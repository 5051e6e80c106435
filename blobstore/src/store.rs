use crate::config::StoreConfig;
use crate::error::{Error, ListError, Result};
use aws_config::SdkConfig;
use aws_sdk_s3::{primitives::ByteStream, Client as AWSS3Client};
use bytes::Bytes;
use log::debug;
use partial_application::partial;
use std::path::Path;

const UPLOAD_BYTESTREAM_BUFFER_SIZE: usize = 1024 * 1024; // 1MB

/// A single bucket behind an S3 client.
///
/// Every call is dispatched independently to the client, so a `Store` can be
/// cloned and shared across tasks freely.
#[derive(Debug, Clone)]
pub struct Store {
    client: AWSS3Client,
    bucket_name: String,
}

impl Store {
    /// Build a store using the SDK's default configuration chain.
    pub async fn new(bucket_name: impl Into<String>) -> Self {
        Self::with_config(bucket_name, StoreConfig::default()).await
    }

    pub async fn with_config(bucket_name: impl Into<String>, config: StoreConfig) -> Self {
        Self::from_conf(config.load().await, bucket_name)
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, bucket_name: impl Into<String>) -> Self {
        Self::from_client(AWSS3Client::new(sdk_config), bucket_name)
    }

    /// Build from a fully customised S3 configuration, e.g. one produced by
    /// `aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(true).build()`.
    pub fn from_conf(s3_config: aws_sdk_s3::Config, bucket_name: impl Into<String>) -> Self {
        Self::from_client(AWSS3Client::from_conf(s3_config), bucket_name)
    }

    pub fn from_client(client: AWSS3Client, bucket_name: impl Into<String>) -> Self {
        Store {
            client,
            bucket_name: bucket_name.into(),
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn client(&self) -> &AWSS3Client {
        &self.client
    }

    /// Write `body` under `key`, replacing any existing object.
    pub async fn put(&self, key: &str, body: impl Into<ByteStream>) -> Result<()> {
        let bucket = self.bucket_name.as_str();
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body.into())
            .send()
            .await
            .map_err(partial!(Error::put => format!("<put_object> bucket={bucket} key={key}"), _))?;

        debug!("Put s3://{}/{}", bucket, key);
        Ok(())
    }

    /// Stream a local file to `key` in a single request.
    pub async fn put_file(&self, key: &str, local_path: impl AsRef<Path>) -> Result<()> {
        let bucket = self.bucket_name.as_str();
        let local_path = local_path.as_ref();
        let body = ByteStream::read_from()
            .path(local_path)
            .buffer_size(UPLOAD_BYTESTREAM_BUFFER_SIZE)
            .build()
            .await
            .map_err(partial!(Error::byte_stream => format!("<put_file> bucket={bucket} key={key} local_path={}", local_path.display()), _))?;

        self.put(key, body).await?;

        debug!("Uploaded {} to s3://{}/{}", local_path.display(), bucket, key);
        Ok(())
    }

    /// Open `key` for reading.
    ///
    /// The returned stream holds the underlying connection until it is read to
    /// the end or dropped.
    pub async fn get(&self, key: &str) -> Result<ByteStream> {
        let bucket = self.bucket_name.as_str();
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(partial!(Error::get => format!("<get_object> bucket={bucket} key={key}"), _))?;

        debug!(
            "Found s3://{}/{} (content length: {:?})",
            bucket,
            key,
            resp.content_length()
        );
        Ok(resp.body)
    }

    /// Read the whole object at `key` into memory.
    pub async fn get_bytes(&self, key: &str) -> Result<Bytes> {
        let bucket = self.bucket_name.as_str();
        let content = self
            .get(key)
            .await?
            .collect()
            .await
            .map_err(partial!(Error::byte_stream => format!("<get_bytes> bucket={bucket} key={key}"), _))?
            .into_bytes();
        Ok(content)
    }

    /// Every key under `prefix`, in the order the service returns them.
    ///
    /// Pages are fetched until the service stops handing out continuation
    /// tokens. If a page fails, the keys from the pages before it are returned
    /// inside the [`ListError`].
    pub async fn list(&self, prefix: &str) -> std::result::Result<Vec<String>, ListError> {
        let bucket = self.bucket_name.as_str();
        let mut pagination_stream = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys: Vec<String> = vec![];
        loop {
            let page = match pagination_stream.try_next().await {
                Ok(Some(page)) => page,
                Ok(None) => break,
                Err(e) => {
                    return Err(ListError {
                        source: Error::list(
                            format!("<list_objects_v2> bucket={bucket} prefix={prefix}"),
                            e,
                        ),
                        keys,
                    })
                }
            };
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_owned)),
            );
        }

        debug!("Prefix {}: Found {} keys.", prefix, keys.len());
        Ok(keys)
    }
}
