//! Full-ledger order listing: the read-only query behind `query`.
//!
//! Scans every key in the order namespace, decodes each back into its
//! six-tuple and pairs it with the stored status. Results come back in the
//! store's scan order (ascending key bytes), which is the same on every
//! replica. Any scan or decode error aborts the whole query; there are no
//! partial results.

use relationship_ledger::{CompositeKey, StateStore};
use relationship_types::{Order, OrderStatus, OrderTuple, Result};

use crate::context::TxContext;

/// Lists recorded orders. Never writes.
pub struct OrderQueryEngine<'c> {
    namespace: &'c str,
}

impl<'c> OrderQueryEngine<'c> {
    #[must_use]
    pub fn new(namespace: &'c str) -> Self {
        Self { namespace }
    }

    /// Every recorded order in scan order.
    ///
    /// # Errors
    /// - `Storage` if the scan cannot be opened or fails midway
    /// - `MalformedKey` if a key is outside the namespace or has the wrong arity
    /// - `MalformedValue` if a stored status is not recognised
    pub fn list_all(&self, ctx: &TxContext<'_>) -> Result<Vec<Order>> {
        let no_parts: [&str; 0] = [];
        let prefix = CompositeKey::prefix(self.namespace, &no_parts)?;

        let mut orders = Vec::new();
        for entry in ctx.store().get_state_by_prefix(&prefix)? {
            let entry = entry?;
            let parts = CompositeKey::decode_in(self.namespace, &entry.key)?;
            let tuple = OrderTuple::from_key_parts(parts)?;
            let status = OrderStatus::from_bytes(&entry.value)?;
            tracing::trace!(parent: ctx.span(), key = ?entry.key, status = %status, "Scanned order");
            orders.push(Order::new(tuple, status));
        }

        tracing::debug!(parent: ctx.span(), orders = orders.len(), "Order scan complete");
        Ok(orders)
    }

    /// [`OrderQueryEngine::list_all`] serialized as a JSON array.
    pub fn list_all_json(&self, ctx: &TxContext<'_>) -> Result<Vec<u8>> {
        let orders = self.list_all(ctx)?;
        Ok(serde_json::to_vec(&orders)?)
    }
}
