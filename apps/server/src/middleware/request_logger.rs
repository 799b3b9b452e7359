//! Request logging middleware for page, upload and file requests.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::StatusCode;
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{info, warn};

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

/// Header value as text, or `fallback` when absent or not visible ASCII.
fn header_or<'a>(req: &'a ServiceRequest, name: &str, fallback: &'a str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback)
}

/// Log the outcome of a finished request, at `warn` for any error status.
fn log_completion(method: &str, path: &str, status: StatusCode, duration_ms: u64) {
    let status_code = status.as_u16();
    if status.is_client_error() || status.is_server_error() {
        warn!(target: "http", method, path, status = status_code, duration_ms, "← Request failed");
    } else {
        info!(target: "http", method, path, status = status_code, duration_ms, "← Request completed");
    }
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        {
            let conn = req.connection_info();
            info!(
                target: "http",
                method = %method,
                path = %path,
                query = req.query_string(),
                remote_addr = conn.realip_remote_addr().unwrap_or("unknown"),
                user_agent = header_or(&req, "user-agent", "unknown"),
                content_length = header_or(&req, "content-length", "0"),
                "→ Request started"
            );
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            log_completion(&method, &path, res.status(), start.elapsed().as_millis() as u64);
            Ok(res)
        })
    }
}
