//! Transaction log replay.
//!
//! A replay log is a JSON document naming the channel, the chaincode
//! configuration, the amounts the reference contract reports and an ordered
//! list of transactions. Each transaction names the caller's PEM certificate
//! by path, relative to the directory the log was loaded from.
//!
//! ```json
//! {
//!   "channel": "mychannel",
//!   "reference": { "a": "100", "b": "" },
//!   "transactions": [
//!     { "certificate": "user_org2.pem", "function": "order",
//!       "args": ["sell", "org1.example.com", "widget", "10", "5", "ref1"] },
//!     { "function": "query" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use relationship_ledger::ReferenceBook;
use relationship_types::{ChaincodeConfig, RelationshipError, Response, Result};
use serde::Deserialize;

use crate::chaincode::RelationshipChaincode;
use crate::peer::LocalPeer;

const DEFAULT_CHANNEL: &str = "mychannel";

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

/// A recorded sequence of transactions for one channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayLog {
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default)]
    pub config: ChaincodeConfig,
    /// Amount reported by the reference contract, by entry name.
    #[serde(default)]
    pub reference: BTreeMap<String, String>,
    pub transactions: Vec<LoggedTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggedTransaction {
    /// Caller certificate. Absent means an empty creator.
    #[serde(default)]
    pub certificate: Option<PathBuf>,
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Response to one replayed transaction.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub function: String,
    pub response: Response,
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub outcomes: Vec<ReplayOutcome>,
    /// Digest of committed state after the last transaction.
    pub state_root: [u8; 32],
}

impl ReplayReport {
    /// Number of transactions answered with an error.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.response.is_ok()).count()
    }
}

impl ReplayLog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a log file; certificate paths resolve against its directory.
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let json = read_to_string(path)?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok((Self::from_json(&json)?, base))
    }

    /// Replay every transaction on a fresh single-replica ledger.
    ///
    /// A rejected transaction is recorded in the report and replay
    /// continues. Only an unusable log (bad configuration, unreadable
    /// certificate, failed instantiation) aborts.
    pub fn run(&self, base_dir: &Path) -> Result<ReplayReport> {
        let chaincode = RelationshipChaincode::new(self.config.clone())?;
        let mut peer = LocalPeer::new(self.channel.clone(), chaincode, self.reference_book());

        let init = peer.instantiate();
        if !init.is_ok() {
            return Err(RelationshipError::Configuration(format!(
                "instantiation failed: {}",
                init.message
            )));
        }

        let mut outcomes = Vec::with_capacity(self.transactions.len());
        for tx in &self.transactions {
            let creator = match &tx.certificate {
                Some(path) => read_to_string(&base_dir.join(path))?.into_bytes(),
                None => Vec::new(),
            };
            let response = peer.submit(&creator, &tx.function, &tx.args);
            outcomes.push(ReplayOutcome {
                function: tx.function.clone(),
                response,
            });
        }

        tracing::info!(
            channel = %self.channel,
            transactions = outcomes.len(),
            keys = peer.ledger().len(),
            "Replay complete"
        );
        Ok(ReplayReport {
            outcomes,
            state_root: peer.state_root(),
        })
    }

    fn reference_book(&self) -> ReferenceBook {
        let book = match &self.config.reference {
            Some(reference) => ReferenceBook::deployed_at(&reference.contract, &reference.channel),
            None => ReferenceBook::new(),
        };
        self.reference
            .iter()
            .fold(book, |book, (name, amount)| book.with_entry(name, amount))
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        RelationshipError::Configuration(format!("cannot read {}: {e}", path.display()))
    })
}
