//! Route handlers organized by resource

pub mod albums;
pub mod health;

use axum::extract::OriginalUri;
use axum::http::Method;

use super::error::ApiError;

/// Fallback for paths no route matches
pub(crate) async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}

/// Fallback for a matched path with an unsupported method
pub(crate) async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}
