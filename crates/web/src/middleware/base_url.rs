use std::sync::Arc;

use axum::{
    extract::Request, http::HeaderMap, middleware::Next, response::IntoResponse,
};

/// Base URL the service is reachable under from the client's point of view,
/// honoring forwarding proxies. Used to build absolute resource links.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    proto: String,
    host: String,
    prefix: String,
}

impl BaseUrl {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };

        BaseUrl {
            proto: header("x-forwarded-proto").unwrap_or_else(|| "http".to_owned()),
            host: header("x-forwarded-host")
                .or_else(|| header("host"))
                .unwrap_or_else(|| "localhost".to_owned()),
            prefix: header("x-forwarded-prefix").unwrap_or_default(),
        }
    }

    pub fn full_url<S: Into<String>>(&self, path: S) -> String {
        format!("{}://{}{}{}", self.proto, self.host, self.prefix, path.into())
    }
}

pub async fn base_url_middleware(mut req: Request, next: Next) -> impl IntoResponse {
    let base_url = BaseUrl::from_headers(req.headers());
    req.extensions_mut().insert(Arc::new(base_url));
    next.run(req).await
}
