use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::Resolver;
use tracing::{debug, warn};

use crate::error::{GleanError, Result};

/// Default timeout per nameserver lookup.
/// One unresponsive host must not stall the whole parse.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Forward lookup of a nameserver host.
///
/// Implementations return `None` on any failure; resolution is best effort
/// and never aborts a parse.
pub trait HostResolver: Send + Sync {
    fn resolve(&self, host: &str) -> Option<IpAddr>;
}

/// Fixed host table, useful when addresses are already known.
impl HostResolver for HashMap<String, IpAddr> {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        self.get(host).copied()
    }
}

/// Blocking DNS resolver backed by hickory.
///
/// Queries Google DNS with a single attempt per lookup. The blocking resolver
/// drives its own runtime, so it must not be called from inside an async task.
pub struct DnsHostResolver {
    resolver: Resolver,
    timeout: Duration,
}

impl std::fmt::Debug for DnsHostResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsHostResolver")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DnsHostResolver {
    /// Creates a resolver with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.use_hosts_file = false;

        let resolver = Resolver::new(ResolverConfig::google(), opts)
            .map_err(|e| GleanError::Dns(e.to_string()))?;
        Ok(Self { resolver, timeout })
    }
}

impl HostResolver for DnsHostResolver {
    fn resolve(&self, host: &str) -> Option<IpAddr> {
        match self.resolver.lookup_ip(host) {
            Ok(lookup) => {
                let ip = lookup.iter().next();
                debug!(host = %host, ip = ?ip, "Resolved nameserver");
                ip
            }
            Err(e) => {
                warn!(host = %host, error = %e, "Nameserver lookup failed");
                None
            }
        }
    }
}
