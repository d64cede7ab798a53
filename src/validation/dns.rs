//! Mail-domain existence checks.
//!
//! The validator only needs a yes/no answer, so resolution sits behind the
//! [`DomainResolver`] trait. [`DnsResolver`] asks real DNS: MX records first,
//! then A/AAAA records as the implicit mail exchanger.

use once_cell::sync::OnceCell;
use std::fmt;
use std::time::Duration;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::Name;
use trust_dns_resolver::Resolver;

/// Answers whether a domain can receive mail.
pub trait DomainResolver: Send + Sync {
    fn accepts_mail(&self, domain: &str) -> bool;
}

/// Blocking resolver backed by `trust-dns-resolver`.
///
/// The underlying resolver (and its private runtime) is built on the first
/// lookup and reused afterwards. A failed build is retried on the next lookup.
pub struct DnsResolver {
    timeout: Duration,
    use_system_conf: bool,
    resolver: OnceCell<Resolver>,
}

impl DnsResolver {
    /// Resolver using the host's `/etc/resolv.conf` (or platform equivalent),
    /// falling back to the library defaults if that cannot be read.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            use_system_conf: true,
            resolver: OnceCell::new(),
        }
    }

    /// Resolver that always uses the library's default upstream servers.
    pub fn with_default_servers(timeout: Duration) -> Self {
        Self {
            timeout,
            use_system_conf: false,
            resolver: OnceCell::new(),
        }
    }

    fn build(&self) -> std::io::Result<Resolver> {
        let (config, mut opts) = if self.use_system_conf {
            trust_dns_resolver::system_conf::read_system_conf()
                .unwrap_or_else(|_| (ResolverConfig::default(), ResolverOpts::default()))
        } else {
            (ResolverConfig::default(), ResolverOpts::default())
        };

        opts.timeout = self.timeout;
        opts.attempts = 1;

        tracing::debug!(timeout = ?self.timeout, "Building DNS resolver");
        Resolver::new(config, opts)
    }

    fn resolver(&self) -> std::io::Result<&Resolver> {
        self.resolver.get_or_try_init(|| self.build())
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl fmt::Debug for DnsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolver")
            .field("timeout", &self.timeout)
            .field("use_system_conf", &self.use_system_conf)
            .field("built", &self.resolver.get().is_some())
            .finish()
    }
}

impl Drop for DnsResolver {
    fn drop(&mut self) {
        // The resolver owns a tokio runtime, which cannot be dropped from
        // inside another runtime's context.
        if let Some(resolver) = self.resolver.take() {
            if tokio::runtime::Handle::try_current().is_ok() {
                std::thread::spawn(move || drop(resolver));
            }
        }
    }
}

/// Verdict from the MX answer alone.
///
/// Any real exchanger means the domain takes mail. A null MX (`MX 0 .`,
/// RFC 7505) on its own means it explicitly does not. `None` when there are
/// no MX records and the A/AAAA fallback applies.
fn mx_verdict<'a>(exchanges: impl IntoIterator<Item = &'a Name>) -> Option<bool> {
    let mut null_mx = false;

    for exchange in exchanges {
        if exchange.is_root() {
            null_mx = true;
        } else {
            return Some(true);
        }
    }

    if null_mx {
        Some(false)
    } else {
        None
    }
}

impl DomainResolver for DnsResolver {
    fn accepts_mail(&self, domain: &str) -> bool {
        // Trailing dot stops search-domain expansion.
        let fqdn = format!("{}.", domain.trim_end_matches('.'));

        let resolver = match self.resolver() {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::warn!(domain = %domain, error = %e, "Failed to build DNS resolver");
                return false;
            }
        };

        match resolver.mx_lookup(fqdn.as_str()) {
            Ok(mx) => match mx_verdict(mx.iter().map(|record| record.exchange())) {
                Some(found) => {
                    tracing::debug!(domain = %domain, found, "MX records evaluated");
                    return found;
                }
                None => tracing::debug!(domain = %domain, "No MX records"),
            },
            Err(e) => tracing::debug!(domain = %domain, error = %e, "MX lookup failed"),
        }

        match resolver.lookup_ip(fqdn.as_str()) {
            Ok(ips) => {
                let found = ips.iter().next().is_some();
                tracing::debug!(domain = %domain, found, "A/AAAA fallback lookup");
                found
            }
            Err(e) => {
                tracing::debug!(domain = %domain, error = %e, "A/AAAA lookup failed");
                false
            }
        }
    }
}
