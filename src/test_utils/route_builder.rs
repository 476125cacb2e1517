//! Helpers for running requests
use anyhow::Result;
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode, Uri};
use hyper::{body::Bytes, Body};
use tower::ServiceExt;

/// Builds a single request against an in-process [Router] and runs it
/// with `oneshot`.
#[derive(Debug)]
pub struct RouteBuilder {
    app: Router,
    method: Method,
    path: Uri,
}

impl RouteBuilder {
    /// Target `method` `path` on the given app.
    pub fn new<U>(app: Router, method: Method, path: U) -> Self
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        Self {
            app,
            method,
            path: TryFrom::try_from(path).map_err(Into::into).unwrap(),
        }
    }

    /// Run the request and hand back status, headers and raw body.
    pub async fn into_raw_response(self) -> Result<(StatusCode, HeaderMap, Bytes)> {
        let request = self.build_request()?;
        let response = self.app.oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = hyper::body::to_bytes(response.into_body()).await?;

        Ok((status, headers, body))
    }

    fn build_request(&self) -> Result<Request<Body>> {
        Ok(Request::builder()
            .method(self.method.clone())
            .uri(self.path.clone())
            .body(Body::empty())?)
    }
}
