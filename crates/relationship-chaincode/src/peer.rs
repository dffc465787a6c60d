//! Single-replica host: one chaincode over one in-memory ledger.
//!
//! Each submission gets a fresh [`TxContext`] over a transaction overlay.
//! The overlay's write set is committed only if the chaincode answered
//! with success, so a rejected transaction never changes state.

use relationship_ledger::{ChaincodeInvoker, MemoryLedger, compute_state_root};
use relationship_types::Response;

use crate::chaincode::RelationshipChaincode;
use crate::context::TxContext;

/// One replica executing transactions in the order they are submitted.
pub struct LocalPeer<I> {
    channel: String,
    chaincode: RelationshipChaincode,
    ledger: MemoryLedger,
    invoker: I,
    /// Sequence used for transaction ids; ids depend only on submission order.
    next_tx: u64,
}

impl<I: ChaincodeInvoker> LocalPeer<I> {
    pub fn new(channel: impl Into<String>, chaincode: RelationshipChaincode, invoker: I) -> Self {
        Self {
            channel: channel.into(),
            chaincode,
            ledger: MemoryLedger::new(),
            invoker,
            next_tx: 0,
        }
    }

    /// Run the chaincode's `init`.
    pub fn instantiate(&mut self) -> Response {
        self.execute(&[], |cc, ctx| cc.init(ctx))
    }

    /// Submit one transaction on behalf of `creator`.
    pub fn submit(&mut self, creator: &[u8], function: &str, args: &[String]) -> Response {
        self.execute(creator, |cc, ctx| cc.invoke(ctx, function, args))
    }

    fn execute<F>(&mut self, creator: &[u8], run: F) -> Response
    where
        F: FnOnce(&RelationshipChaincode, &mut TxContext<'_>) -> Response,
    {
        let tx_id = format!("{}-{:08}", self.channel, self.next_tx);
        self.next_tx += 1;

        let mut overlay = self.ledger.begin();
        let response = {
            let mut ctx = TxContext::new(
                tx_id.as_str(),
                self.channel.as_str(),
                creator,
                &mut overlay,
                &self.invoker,
            );
            run(&self.chaincode, &mut ctx)
        };
        let writes = overlay.into_write_set();

        if response.is_ok() {
            if !writes.is_empty() {
                self.ledger.commit(writes);
            }
        } else {
            tracing::debug!(tx_id = %tx_id, discarded = writes.len(), "Write set discarded");
        }
        response
    }

    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Digest of the full committed state.
    pub fn state_root(&self) -> [u8; 32] {
        compute_state_root(self.ledger.entries())
    }
}
