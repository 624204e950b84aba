/// Builder for `SessionOptions`.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct SessionOptionsBuilder {
    config: SessionOptions,
}

/// Session loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Fail the load when the file is not a JSON object of strings, instead
    /// of continuing with an empty mapping.
    pub strict_decode: bool,

    /// Only load entries whose URL host is this domain or one of its sub-domains.
    pub host_filter: Option<String>,
}

impl SessionOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_decode(mut self, strict: bool) -> Self {
        self.config.strict_decode = strict;
        self
    }

    pub fn host_filter(mut self, domain: &str) -> Self {
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        self.config.host_filter = (!domain.is_empty()).then_some(domain);
        self
    }

    pub fn build(self) -> SessionOptions {
        self.config
    }
}

impl SessionOptions {
    pub fn builder() -> SessionOptionsBuilder {
        SessionOptionsBuilder::new()
    }

    /// Whether an entry for `host` passes the host filter.
    pub fn accepts_host(&self, host: &str) -> bool {
        match &self.host_filter {
            Some(filter) => crate::cookies::psl::domain_matches(host, filter),
            None => true,
        }
    }
}
