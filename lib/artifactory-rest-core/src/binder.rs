//! Attach encoded properties to outgoing requests.
//!
//! A [`Binder`] never mutates the request it is given: it returns a new
//! request with the encoded properties added. Shape and emptiness of the
//! input are checked before anything is built.

use crate::{Properties, PropertyCodec, Request, Result};

/// Rewrites a request with a structured property argument.
pub trait Binder {
    /// Return a copy of `request` carrying `properties`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) when `properties`
    /// has the wrong shape for this binder,
    /// [`Error::EmptyInput`](crate::Error::EmptyInput) when it has no entries.
    fn bind<B: Clone>(&self, request: &Request<B>, properties: &Properties) -> Result<Request<B>>;
}

/// Adds one query parameter per map entry: `?key1=value1&key2=value2,value3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindMapToQuery;

impl Binder for BindMapToQuery {
    fn bind<B: Clone>(&self, request: &Request<B>, properties: &Properties) -> Result<Request<B>> {
        let map = properties.as_map()?;
        let builder = PropertyCodec::encode_map(map)
            .iter()
            .fold(request.to_builder(), |builder, param| {
                builder.encoded_query(&param.wire_key(), &param.wire_value())
            });
        Ok(builder.build())
    }
}

/// Adds a single `properties=key1,key2` query parameter.
///
/// Nothing is added when every key is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindListToQuery;

impl Binder for BindListToQuery {
    fn bind<B: Clone>(&self, request: &Request<B>, properties: &Properties) -> Result<Request<B>> {
        let list = properties.as_list()?;
        let keys = PropertyCodec::encode_list(list);
        if keys.is_empty() {
            return Ok(request.clone());
        }

        Ok(request
            .to_builder()
            .encoded_query("properties", &PropertyCodec::wire_keys(&keys))
            .build())
    }
}

/// Appends map entries as matrix parameters on the last path segment:
/// `/repo/path/file.jar;key1=value1;key2=value2,value3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindMapToMatrix;

impl Binder for BindMapToMatrix {
    fn bind<B: Clone>(&self, request: &Request<B>, properties: &Properties) -> Result<Request<B>> {
        let map = properties.as_map()?;
        let builder = PropertyCodec::encode_map(map)
            .iter()
            .fold(request.to_builder(), |builder, param| {
                builder.matrix_param(&param.wire_key(), &param.wire_value())
            });
        Ok(builder.build())
    }
}
