//! MX-record email validator
//!
//! An address is deliverable when its domain publishes at least one MX
//! record that is not a null MX (`.`). Verdicts are cached per domain for
//! the lifetime of the validator; lookup failures are not cached.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::Resolver;

use crate::domain::ports::{EmailValidator, ValidatorError, Verdict};
use crate::domain::value_objects::EmailAddress;

/// Answer to an MX query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MxAnswer {
    /// Exchange host names, as returned
    Hosts(Vec<String>),
    /// The domain does not exist or has no MX records
    NoRecords,
}

pub trait MxLookup {
    fn lookup_mx(&self, domain: &str) -> Result<MxAnswer, ValidatorError>;
}

/// Resolver configured from the host's resolv.conf
pub struct SystemResolver {
    resolver: Resolver,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Result<Self, ValidatorError> {
        let (config, mut opts) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| ValidatorError(format!("cannot read resolver configuration: {}", e)))?;
        opts.timeout = timeout;
        let resolver = Resolver::new(config, opts)
            .map_err(|e| ValidatorError(format!("cannot start resolver: {}", e)))?;
        Ok(Self { resolver })
    }
}

impl MxLookup for SystemResolver {
    fn lookup_mx(&self, domain: &str) -> Result<MxAnswer, ValidatorError> {
        // Trailing dot keeps search domains out of the query
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        match self.resolver.mx_lookup(fqdn.as_str()) {
            Ok(lookup) => Ok(MxAnswer::Hosts(
                lookup.iter().map(|mx| mx.exchange().to_utf8()).collect(),
            )),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(MxAnswer::NoRecords),
                _ => Err(ValidatorError(e.to_string())),
            },
        }
    }
}

pub struct MxValidator<L: MxLookup = SystemResolver> {
    lookup: L,
    cache: RefCell<HashMap<String, Verdict>>,
}

impl MxValidator<SystemResolver> {
    pub fn system(timeout: Duration) -> Result<Self, ValidatorError> {
        Ok(Self::new(SystemResolver::new(timeout)?))
    }
}

impl<L: MxLookup> MxValidator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn verdict_for(&self, domain: &str) -> Result<Verdict, ValidatorError> {
        if let Some(verdict) = self.cache.borrow().get(domain) {
            return Ok(verdict.clone());
        }

        let verdict = match self.lookup.lookup_mx(domain)? {
            MxAnswer::NoRecords => Verdict::Undeliverable(format!("no MX records for {}", domain)),
            MxAnswer::Hosts(hosts) if hosts.iter().all(|h| is_null_mx(h)) => {
                Verdict::Undeliverable(format!("{} does not accept mail", domain))
            }
            MxAnswer::Hosts(_) => Verdict::Deliverable,
        };
        tracing::debug!(domain, ?verdict, "MX lookup");

        self.cache
            .borrow_mut()
            .insert(domain.to_string(), verdict.clone());
        Ok(verdict)
    }
}

impl<L: MxLookup> EmailValidator for MxValidator<L> {
    fn check(&self, email: &EmailAddress) -> Result<Verdict, ValidatorError> {
        self.verdict_for(email.domain())
    }
}

fn is_null_mx(host: &str) -> bool {
    host.trim_end_matches('.').is_empty()
}
