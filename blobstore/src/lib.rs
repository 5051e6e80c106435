#![doc = include_str!("../README.md")]

mod config;
mod error;
mod store;

pub use aws_sdk_s3::primitives::ByteStream;
pub use config::StoreConfig;
pub use error::{Error, ListError, Result};
pub use store::Store;
