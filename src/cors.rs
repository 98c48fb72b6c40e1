//! Cross-origin policy applied uniformly to every response.
//!
//! Credentials are allowed, so neither the origin nor the method/header
//! allowances may be a literal `*`. "Any method" and "any header" are expressed
//! by mirroring what the preflight asks for.

use std::time::Duration;

use axum::{http::HeaderValue, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<HeaderValue>,
    pub allow_credentials: bool,
    /// How long a browser may cache a preflight answer.
    pub max_age: Duration,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allowed_origins: vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)],
            allow_credentials: true,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl CorsPolicy {
    /// A single origin is sent on every response; a list only echoes a
    /// matching request `Origin`.
    fn allow_origin(&self) -> AllowOrigin {
        match self.allowed_origins.as_slice() {
            [origin] => AllowOrigin::exact(origin.clone()),
            origins => AllowOrigin::list(origins.iter().cloned()),
        }
    }

    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.allow_origin())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials)
            .max_age(self.max_age)
    }
}

/// Wraps every route and fallback of `router` in `policy`. `OPTIONS` requests
/// are answered by the policy itself and never reach a handler.
pub fn with_cors_policy<S>(router: Router<S>, policy: &CorsPolicy) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(policy.layer())
}
