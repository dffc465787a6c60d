//! Per-transaction execution context.

use relationship_ledger::{ChaincodeInvoker, StateStore};
use tracing::Span;

/// Everything one invocation may touch: the caller's raw identity, a
/// transaction-scoped state view, the cross-contract invoker and the
/// tracing span all events of this transaction hang off.
///
/// Nothing here outlives the transaction; the contract keeps no state of
/// its own between invocations.
pub struct TxContext<'a> {
    tx_id: String,
    channel: String,
    creator: &'a [u8],
    store: &'a mut dyn StateStore,
    invoker: &'a dyn ChaincodeInvoker,
    span: Span,
}

impl<'a> TxContext<'a> {
    pub fn new(
        tx_id: impl Into<String>,
        channel: impl Into<String>,
        creator: &'a [u8],
        store: &'a mut dyn StateStore,
        invoker: &'a dyn ChaincodeInvoker,
    ) -> Self {
        let tx_id = tx_id.into();
        let channel = channel.into();
        let span = tracing::info_span!("tx", tx_id = %tx_id, channel = %channel);
        Self {
            tx_id,
            channel,
            creator,
            store,
            invoker,
            span,
        }
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Raw identity blob of the transaction creator.
    pub fn creator(&self) -> &[u8] {
        self.creator
    }

    pub fn store(&self) -> &dyn StateStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn StateStore {
        &mut *self.store
    }

    pub fn invoker(&self) -> &dyn ChaincodeInvoker {
        self.invoker
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
