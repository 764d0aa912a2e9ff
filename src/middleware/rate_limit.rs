use axum::http::Request;
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::{net::IpAddr, sync::Arc, time::Duration};
use tower_governor::{
    errors::GovernorError,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::KeyExtractor,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IpKeyExtractor;

impl KeyExtractor for IpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // 1. Check Cloudflare header first
        // The service runs at the edge behind Cloudflare, so the real
        // client IP is in 'cf-connecting-ip'. We trust it because the
        // deployment only accepts traffic from CF.
        if let Some(ip) = headers
            .get("cf-connecting-ip")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // 2. Check X-Forwarded-For as backup
        // Standard proxy header. First IP in the list is the client.
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // 3. Fallback to localhost
        // Mostly for local dev where the headers are missing. In prod this
        // puts unknown IPs in one shared bucket, which beats panicking.
        Ok("127.0.0.1".parse().unwrap())
    }
}

pub type FetchConfig = GovernorConfig<IpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

pub fn create_fetch_config() -> Arc<FetchConfig> {
    // Package-list composition fans out into several upstream fetches per
    // request, so it is the one surface worth limiting. 30 requests per
    // minute per IP is far beyond what any installer run needs.
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(IpKeyExtractor)
            .period(Duration::from_secs(2))
            .burst_size(30)
            .finish()
            .unwrap(),
    )
}
