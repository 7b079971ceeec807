//! Resource kinds.

pub mod collection_item;
pub mod redirect;
pub mod webhook;

use webflow_client::ClientResult;

/// Map a not-found read to `None`.
pub(crate) fn found<T>(result: ClientResult<T>) -> ClientResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
