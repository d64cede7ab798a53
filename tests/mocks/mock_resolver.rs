use outreach_mcp_server::validation::DomainResolver;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Resolver that knows a fixed set of mail domains and records every lookup.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockResolver {
    mail_domains: Arc<Mutex<HashSet<String>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockResolver {
    pub fn new() -> Self {
        Self {
            mail_domains: Arc::new(Mutex::new(HashSet::new())),
            lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_mail_domain(self, domain: &str) -> Self {
        self.mail_domains.lock().unwrap().insert(domain.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainResolver for MockResolver {
    fn accepts_mail(&self, domain: &str) -> bool {
        self.lookups.lock().unwrap().push(domain.to_string());
        self.mail_domains.lock().unwrap().contains(domain)
    }
}
