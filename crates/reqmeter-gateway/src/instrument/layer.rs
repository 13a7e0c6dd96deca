//! Tower middleware recording every request that passes through it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, Response};
use tower::{Layer, Service};

use reqmeter_core::RequestInfo;

use super::instrumenter::RequestInstrumenter;

/// Build the naming descriptor for an HTTP request.
///
/// One leading `/` is stripped so `/orders` names as `orders` and `/` as the
/// root group.
pub fn request_info<B>(req: &Request<B>) -> RequestInfo {
    let path = req.uri().path();
    let path = path.strip_prefix('/').unwrap_or(path);
    RequestInfo::new(path, req.method().as_str())
}

#[derive(Clone)]
pub struct RequestTimingLayer {
    instrumenter: Arc<RequestInstrumenter>,
}

impl RequestTimingLayer {
    pub fn new(instrumenter: Arc<RequestInstrumenter>) -> Self {
        Self { instrumenter }
    }
}

impl<S> Layer<S> for RequestTimingLayer {
    type Service = RequestTimingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTimingService {
            inner,
            instrumenter: Arc::clone(&self.instrumenter),
        }
    }
}

#[derive(Clone)]
pub struct RequestTimingService<S> {
    inner: S,
    instrumenter: Arc<RequestInstrumenter>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestTimingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: 'static,
    ReqBody: Send + 'static,
    ResBody: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let info = request_info(&req);

        // The readied service is the one in `self`; leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(self.instrumenter.instrument(info, move || inner.call(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn strips_one_leading_slash() {
        let req = Request::builder().uri("/orders").method("PUT").body(Body::empty()).unwrap();
        assert_eq!(request_info(&req), RequestInfo::new("orders", "PUT"));

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(request_info(&req).path, "");

        let req = Request::builder().uri("/users/7?expand=1").body(Body::empty()).unwrap();
        assert_eq!(request_info(&req).path, "users/7");
    }
}
