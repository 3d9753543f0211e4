//! LTS ceremony setup and bookkeeping
//!
//! A long-term secret is created once for a node set and referenced by id
//! from every Write deposited against it. Generation here runs through
//! the trusted dealer in `scarab_ocs::lts`; the dealer hands each node
//! its share out-of-band and the public half is what gets advertised.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use rand::{CryptoRng, RngCore};
use scarab_ocs::{lts, LtsId, LtsPublic, LtsShare};

use crate::error::{Result, ServiceError};

/// Request to run a setup ceremony over a node set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtsSetupRequest {
    /// Addresses of the participating nodes, one share each
    pub nodes: Vec<String>,
    pub threshold: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtsSetupReply {
    pub lts: LtsPublic,
}

/// Run the dealer ceremony for `req`. Shares are returned in node order
/// and must be delivered to their holders over a secure channel; they do
/// not appear in the reply.
pub fn setup_dealer<R: RngCore + CryptoRng>(
    req: &LtsSetupRequest,
    rng: &mut R,
) -> Result<(LtsSetupReply, Vec<LtsShare>)> {
    let nodes = u32::try_from(req.nodes.len())
        .map_err(|_| ServiceError::Setup("node set too large".to_string()))?;
    if nodes == 0 {
        return Err(ServiceError::Setup("empty node set".to_string()));
    }
    if req.threshold == 0 || req.threshold > nodes {
        return Err(ServiceError::Setup(format!(
            "threshold {} out of range for {} nodes",
            req.threshold, nodes
        )));
    }
    let (public, shares) = lts::generate(req.threshold, nodes, rng)?;
    info!(
        lts = %public.id.short(),
        threshold = req.threshold,
        nodes,
        "LTS ceremony complete"
    );
    Ok((LtsSetupReply { lts: public }, shares))
}

/// Accepted LTS instances known to a node, keyed by identifier.
#[derive(Debug, Default)]
pub struct LtsRegistry {
    known: HashMap<LtsId, LtsPublic>,
}

impl LtsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lts: LtsPublic) {
        self.known.insert(lts.id, lts);
    }

    pub fn get(&self, id: &LtsId) -> Option<&LtsPublic> {
        self.known.get(id)
    }
}
