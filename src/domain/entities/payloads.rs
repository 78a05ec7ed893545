//! Payload set - opaque text blobs embedded into notebooks
//!
//! Static bootstrap blocks and per-service porting bodies are configuration,
//! loaded once per run. Their content is never parsed beyond string-literal
//! escaping at render time.

use std::collections::HashMap;

use crate::domain::ports::{PayloadError, PayloadRepository, StaticBlock};
use crate::domain::value_objects::ServiceId;

/// All payloads needed to generate notebooks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadSet {
    setup: String,
    pip_install: String,
    porting: HashMap<ServiceId, String>,
}

impl PayloadSet {
    pub fn new(setup: impl Into<String>, pip_install: impl Into<String>) -> Self {
        Self {
            setup: setup.into(),
            pip_install: pip_install.into(),
            porting: HashMap::new(),
        }
    }

    pub fn with_porting(mut self, service: ServiceId, body: impl Into<String>) -> Self {
        self.porting.insert(service, body.into());
        self
    }

    /// Load every payload from a repository
    ///
    /// Static blocks are mandatory. Porting bodies are optional per service:
    /// a row that needs a missing body fails on its own.
    pub fn load(repo: &dyn PayloadRepository) -> Result<Self, PayloadError> {
        let mut set = Self::new(
            repo.static_block(StaticBlock::Setup)?,
            repo.static_block(StaticBlock::PipInstall)?,
        );
        for service in ServiceId::ALL {
            match repo.porting_body(service)? {
                Some(body) => {
                    set.porting.insert(service, body);
                }
                None => tracing::warn!(%service, "no porting code found; rows needing it will fail"),
            }
        }
        Ok(set)
    }

    pub fn static_block(&self, block: StaticBlock) -> &str {
        match block {
            StaticBlock::Setup => &self.setup,
            StaticBlock::PipInstall => &self.pip_install,
        }
    }

    pub fn porting_body(&self, service: ServiceId) -> Option<&str> {
        self.porting.get(&service).map(String::as_str)
    }

    /// Services with a porting body available
    pub fn available_services(&self) -> Vec<ServiceId> {
        ServiceId::ALL
            .into_iter()
            .filter(|s| self.porting.contains_key(s))
            .collect()
    }
}
