//! Router entries for TLS-terminated app domains.

use flynn_api_types::Route;
use serde_json::Map;

/// TLS material and stickiness for a domain.
#[derive(Debug, Clone)]
pub struct TlsBinding<'a> {
    pub certificate: &'a str,
    pub private_key: &'a str,
    pub sticky: bool,
}

/// Name of the router service fronting an app's `web` processes.
#[must_use]
pub fn web_service(app_name: &str) -> String {
    format!("{app_name}-web")
}

/// Build a new HTTP route for `domain` on the app's web service.
#[must_use]
pub fn new_route(app_name: &str, domain: &str, tls: &TlsBinding<'_>) -> Route {
    Route {
        id: None,
        kind: "http".to_string(),
        service: web_service(app_name),
        domain: domain.to_string(),
        tls_cert: Some(tls.certificate.to_string()),
        tls_key: Some(tls.private_key.to_string()),
        sticky: tls.sticky,
        extra: Map::new(),
    }
}

/// Point an existing route at `new_domain` with fresh TLS material.
#[must_use]
pub fn rebind(mut route: Route, new_domain: &str, tls: &TlsBinding<'_>) -> Route {
    route.domain = new_domain.to_string();
    route.tls_cert = Some(tls.certificate.to_string());
    route.tls_key = Some(tls.private_key.to_string());
    route.sticky = tls.sticky;
    route
}

/// Find the route serving `domain` for `service`.
#[must_use]
pub fn find<'a>(routes: &'a [Route], service: &str, domain: &str) -> Option<&'a Route> {
    routes
        .iter()
        .find(|r| r.service == service && r.domain == domain)
}
