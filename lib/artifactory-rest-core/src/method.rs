//! HTTP method types.

use derive_more::Display;

/// HTTP verbs used by the Artifactory REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - read an item, its properties or system metadata.
    #[display("GET")]
    Get,
    /// POST method - run a search.
    #[display("POST")]
    Post,
    /// PUT method - deploy an artifact or set properties.
    #[display("PUT")]
    Put,
    /// DELETE method - remove an artifact or properties.
    #[display("DELETE")]
    Delete,
    /// HEAD method - probe an item without its content.
    #[display("HEAD")]
    Head,
}

impl Method {
    /// Returns `true` if repeating the request has no additional effect.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Head => Self::HEAD,
        }
    }
}
