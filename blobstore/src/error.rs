use aws_sdk_s3::{
    error::SdkError,
    operation::{
        get_object::GetObjectError, list_objects_v2::ListObjectsV2Error,
        put_object::PutObjectError,
    },
    primitives::ByteStreamError,
};
use log::debug;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Store`](crate::Store).
///
/// The first field is a context string such as `<get_object> bucket=b key=k`;
/// the second is the untouched error reported by the SDK.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{} [PutObject]", .0)]
    Put(String, #[source] SdkError<PutObjectError>),
    #[error("{} [GetObject]", .0)]
    Get(String, #[source] SdkError<GetObjectError>),
    #[error("{} [ListObjectsV2]", .0)]
    List(String, #[source] SdkError<ListObjectsV2Error>),
    #[error("{} [ByteStreamError]", .0)]
    ByteStream(String, #[source] ByteStreamError),
}

impl Error {
    pub(crate) fn put(context: String, e: SdkError<PutObjectError>) -> Self {
        log_sdk_error(&context, &e);
        Error::Put(context, e)
    }

    pub(crate) fn get(context: String, e: SdkError<GetObjectError>) -> Self {
        log_sdk_error(&context, &e);
        Error::Get(context, e)
    }

    pub(crate) fn list(context: String, e: SdkError<ListObjectsV2Error>) -> Self {
        log_sdk_error(&context, &e);
        Error::List(context, e)
    }

    pub(crate) fn byte_stream(context: String, e: ByteStreamError) -> Self {
        debug!("{context} {:?}", e);
        Error::ByteStream(context, e)
    }

    /// The `<op> bucket=.. key=..` string describing the failed call.
    pub fn context(&self) -> &str {
        match self {
            Error::Put(context, _)
            | Error::Get(context, _)
            | Error::List(context, _)
            | Error::ByteStream(context, _) => context,
        }
    }

    /// True when a read failed because the key does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Get(_, e) => {
                e.as_service_error()
                    .map(|service_error| service_error.is_no_such_key())
                    .unwrap_or(false)
                    || e.raw_response()
                        .map(|raw| raw.status().as_u16() == 404)
                        .unwrap_or(false)
            }
            _ => false,
        }
    }
}

fn log_sdk_error<E: std::fmt::Debug>(context: &str, e: &SdkError<E>) {
    match e {
        SdkError::DispatchFailure(dispatch_error) => {
            debug!(
                "{context} is_io: {} is_timeout: {} is_user: {} is_other: {} {:?}",
                dispatch_error.is_io(),
                dispatch_error.is_timeout(),
                dispatch_error.is_user(),
                dispatch_error.is_other(),
                dispatch_error
            );
        }
        SdkError::ServiceError(service_error) => {
            if let Some(bytes) = service_error.raw().body().bytes() {
                if let Ok(raw_content) = std::str::from_utf8(bytes) {
                    debug!("{context} {raw_content}");
                }
            }
        }
        _ => debug!("{context} {:?}", e),
    }
}

/// A listing that stopped part way through.
///
/// `keys` holds every key from the pages fetched before `source` occurred.
#[derive(Error, Debug)]
#[error("{source} ({} keys listed before the failure)", .keys.len())]
pub struct ListError {
    pub keys: Vec<String>,
    pub source: Error,
}

impl ListError {
    pub fn into_parts(self) -> (Vec<String>, Error) {
        (self.keys, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn timeout_error() -> Error {
        Error::list(
            "<list_objects_v2> bucket=b prefix=p".to_owned(),
            SdkError::timeout_error("took too long"),
        )
    }

    #[test]
    fn display_carries_context_and_operation() {
        let e = timeout_error();
        assert_eq!(e.to_string(), "<list_objects_v2> bucket=b prefix=p [ListObjectsV2]");
        assert_eq!(e.context(), "<list_objects_v2> bucket=b prefix=p");
        assert!(e.source().is_some());
    }

    #[test]
    fn only_get_errors_can_be_not_found() {
        assert!(!timeout_error().is_not_found());
        let e = Error::get(
            "<get_object> bucket=b key=k".to_owned(),
            SdkError::timeout_error("took too long"),
        );
        assert!(!e.is_not_found());
    }

    #[test]
    fn list_error_keeps_partial_keys() {
        let e = ListError {
            keys: vec!["a".to_owned(), "b".to_owned()],
            source: timeout_error(),
        };
        assert!(e.to_string().ends_with("(2 keys listed before the failure)"));
        let (keys, source) = e.into_parts();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(matches!(source, Error::List(..)));
    }
}
