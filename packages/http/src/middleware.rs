//! Request naming middleware.
//!
//! Derives the segment name for each incoming request and records it on a
//! tracing span that wraps the inner service's future. The middleware never
//! touches the request or response; a request that cannot be named from its
//! headers simply carries the strategy's fallback name.

use std::sync::Arc;
use std::task::{Context, Poll};

use http::Request;
use tower::{Layer, Service};
use tracing::{info_span, instrument::Instrumented, Instrument};
use traceline_core::SegmentNaming;

// ---------------------------------------------------------------------------
// SegmentNameLayer
// ---------------------------------------------------------------------------

/// Tower layer that labels each request's span with its segment name.
#[derive(Debug, Clone)]
pub struct SegmentNameLayer {
    naming: Arc<dyn SegmentNaming>,
}

impl SegmentNameLayer {
    /// Creates a layer that names requests with the given strategy.
    #[must_use]
    pub fn new(naming: Arc<dyn SegmentNaming>) -> Self {
        Self { naming }
    }
}

impl<S> Layer<S> for SegmentNameLayer {
    type Service = SegmentNameService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SegmentNameService {
            inner,
            naming: Arc::clone(&self.naming),
        }
    }
}

// ---------------------------------------------------------------------------
// SegmentNameService
// ---------------------------------------------------------------------------

/// Service wrapper that instruments each request with a named span.
#[derive(Debug, Clone)]
pub struct SegmentNameService<S> {
    inner: S,
    naming: Arc<dyn SegmentNaming>,
}

impl<S, B> Service<Request<B>> for SegmentNameService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Instrumented<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        // Named once per request; the strategy's state is fixed, so repeated
        // calls with the same headers would answer identically.
        let segment = self.naming.name_for_request(req.headers());
        let span = info_span!(
            "request",
            segment = %segment,
            method = %req.method(),
            path = %req.uri().path(),
        );
        self.inner.call(req).instrument(span)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
