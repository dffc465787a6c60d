//! Order submission: the state transition behind `order`.
//!
//! ```text
//! submit(request, caller) -> OrderStatus
//! ```
//!
//! ## Algorithm
//!
//! 1. Place the caller on its side of the trade (from identity, never args)
//! 2. Encode the six-tuple into the composite key
//! 3. Read the key
//!    - absent: first leg; optionally ask the reference contract whether a
//!      counter-order exists (`matched` if it reports an amount)
//!    - present: the identical tuple was submitted before → `matched`
//! 4. Write the status bytes at the key
//!
//! At most one state write and at most one cross-contract call per
//! submission. Any error aborts before the write.

use relationship_ledger::{ChaincodeInvoker, CompositeKey, StateStore};
use relationship_types::{
    ArgumentForm, ChaincodeConfig, OrderSide, OrderStatus, Organization, ReferenceRecord,
    RelationshipError, Result,
};

use crate::context::TxContext;
use crate::dispatch::OrderRequest;

/// Applies `order` submissions to the ledger.
pub struct OrderMatcher<'c> {
    config: &'c ChaincodeConfig,
}

impl<'c> OrderMatcher<'c> {
    #[must_use]
    pub fn new(config: &'c ChaincodeConfig) -> Self {
        Self { config }
    }

    /// Record one order leg and return the resulting status.
    ///
    /// # Errors
    /// - `InvalidArgument` if a field is empty or cannot be carried by a key
    /// - `Storage` if the read or the write fails
    /// - `Dependency` if the reference contract call fails
    pub fn submit(
        &self,
        ctx: &mut TxContext<'_>,
        caller: &Organization,
        request: OrderRequest,
    ) -> Result<OrderStatus> {
        let side = request.side;
        let form = request.form;
        let tuple = request.into_tuple(caller);
        tuple.validate()?;

        let key = CompositeKey::encode(&self.config.namespace, &tuple.key_parts())?;
        tracing::debug!(parent: ctx.span(), key = ?key, "Derived order key");

        let existing = ctx.store().get_state(&key)?;
        let status = match existing {
            Some(prior) => {
                tracing::debug!(
                    parent: ctx.span(),
                    prior = %String::from_utf8_lossy(&prior),
                    "Identical tuple already recorded"
                );
                OrderStatus::Matched
            }
            None => self.first_leg_status(ctx, side, form)?,
        };

        ctx.store_mut().put_state(&key, status.as_bytes())?;

        tracing::info!(
            parent: ctx.span(),
            buyer = %tuple.buyer,
            seller = %tuple.seller,
            asset = %tuple.asset,
            reference = %tuple.reference,
            status = %status,
            "Order recorded"
        );
        Ok(status)
    }

    /// Status of a tuple seen for the first time.
    fn first_leg_status(
        &self,
        ctx: &TxContext<'_>,
        side: OrderSide,
        form: ArgumentForm,
    ) -> Result<OrderStatus> {
        // The seller-only form never cross-checks.
        let Some(reference) = self
            .config
            .reference
            .as_ref()
            .filter(|_| form == ArgumentForm::Sided)
        else {
            return Ok(OrderStatus::Initiated);
        };

        let query_key = match side {
            OrderSide::Buy => &reference.buy_key,
            OrderSide::Sell => &reference.sell_key,
        };
        let args = [reference.function.clone(), query_key.clone()];

        let response = ctx
            .invoker()
            .invoke_chaincode(&reference.contract, &args, &reference.channel)
            .map_err(|e| {
                RelationshipError::dependency(format!(
                    "failed to invoke chaincode {}: {e}",
                    reference.contract
                ))
            })?;
        if !response.is_ok() {
            return Err(RelationshipError::dependency(format!(
                "chaincode {} returned status {}: {}",
                reference.contract, response.status, response.message
            )));
        }

        let record = ReferenceRecord::from_payload(&response.payload).map_err(|e| {
            RelationshipError::dependency(format!(
                "chaincode {} returned an unreadable payload: {e}",
                reference.contract
            ))
        })?;

        tracing::debug!(
            parent: ctx.span(),
            entry = %record.name,
            amount = %record.amount,
            side = %side,
            "Reference lookup"
        );

        Ok(if record.has_counter_order() {
            OrderStatus::Matched
        } else {
            OrderStatus::Initiated
        })
    }
}

#[cfg(test)]
mod tests {
    use relationship_ledger::testing::{Fault, FaultyStore};
    use relationship_ledger::{MemoryLedger, ReferenceBook, StateStore};
    use relationship_types::ReferenceConfig;

    use super::*;

    fn org(name: &str) -> Organization {
        Organization::new(name).unwrap()
    }

    fn request(side: OrderSide, counterparty: &str, reference: &str) -> OrderRequest {
        OrderRequest {
            side,
            counterparty: counterparty.into(),
            asset: "widget".into(),
            qty: "10".into(),
            price: "5".into(),
            reference: reference.into(),
            form: ArgumentForm::Sided,
        }
    }

    /// Run one submission against `ledger` and commit it on success.
    fn submit_on(
        ledger: &mut MemoryLedger,
        config: &ChaincodeConfig,
        book: &ReferenceBook,
        caller: &str,
        req: OrderRequest,
    ) -> Result<OrderStatus> {
        let mut tx = ledger.begin();
        let result = {
            let mut ctx = TxContext::new("tx", "mychannel", b"", &mut tx, book);
            OrderMatcher::new(config).submit(&mut ctx, &org(caller), req)
        };
        let writes = tx.into_write_set();
        if result.is_ok() {
            ledger.commit(writes);
        }
        result
    }

    fn no_reference() -> ChaincodeConfig {
        ChaincodeConfig {
            reference: None,
            ..ChaincodeConfig::default()
        }
    }

    #[test]
    fn first_then_repeat() {
        let mut ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();

        let first = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "ref1"));
        assert_eq!(first.unwrap(), OrderStatus::Initiated);
        assert_eq!(ledger.len(), 1);

        let second = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "ref1"));
        assert_eq!(second.unwrap(), OrderStatus::Matched);
        assert_eq!(ledger.len(), 1);

        let key = CompositeKey::encode("Order", &["orgA", "orgB", "widget", "10", "5", "ref1"]).unwrap();
        assert_eq!(ledger.get(&key), Some(&b"matched"[..]));
    }

    #[test]
    fn counterparty_leg_is_same_tuple() {
        // Buyer orgA buying from orgB lands on the key orgB's sell created.
        let mut ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();

        let sell = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "ref1"));
        assert_eq!(sell.unwrap(), OrderStatus::Initiated);
        let buy = submit_on(&mut ledger, &config, &book, "orgA", request(OrderSide::Buy, "orgB", "ref1"));
        assert_eq!(buy.unwrap(), OrderStatus::Matched);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn matched_never_reverts() {
        let mut ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();
        for _ in 0..2 {
            submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r")).unwrap();
        }
        let third = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r"));
        assert_eq!(third.unwrap(), OrderStatus::Matched);
    }

    #[test]
    fn reference_amount_matches_first_leg() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig::default();
        let book = ReferenceBook::new().with_entry("a", "100").with_entry("b", "");

        // Buy side consults entry "a", which reports an amount.
        let buy = submit_on(&mut ledger, &config, &book, "orgA", request(OrderSide::Buy, "orgB", "r1"));
        assert_eq!(buy.unwrap(), OrderStatus::Matched);

        // Sell side consults entry "b", which reports nothing.
        let sell = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r2"));
        assert_eq!(sell.unwrap(), OrderStatus::Initiated);

        let calls = book.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, vec!["query", "a"]);
        assert_eq!(calls[1].args, vec!["query", "b"]);
        assert_eq!(calls[0].contract, "reference");
        assert_eq!(calls[0].channel, "reference");
    }

    #[test]
    fn zero_amount_is_no_counter_order() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig::default();
        let book = ReferenceBook::new().with_entry("b", "0");
        let sell = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r"));
        assert_eq!(sell.unwrap(), OrderStatus::Initiated);
    }

    #[test]
    fn repeat_skips_reference_call() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig::default();
        let book = ReferenceBook::new().with_entry("b", "");
        for _ in 0..2 {
            submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r")).unwrap();
        }
        assert_eq!(book.calls().len(), 1, "only the absent branch may call out");
    }

    #[test]
    fn custom_reference_coordinates() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig {
            reference: Some(ReferenceConfig {
                contract: "ledgerref".into(),
                channel: "refchannel".into(),
                function: "query".into(),
                buy_key: "bids".into(),
                sell_key: "asks".into(),
            }),
            ..ChaincodeConfig::default()
        };
        let book = ReferenceBook::deployed_at("ledgerref", "refchannel").with_entry("asks", "7");
        let sell = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r"));
        assert_eq!(sell.unwrap(), OrderStatus::Matched);
    }

    #[test]
    fn reference_failure_rejects_without_write() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig::default();

        // Unknown entry: the callee answers with an error status.
        let book = ReferenceBook::new();
        let err = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r")).unwrap_err();
        assert!(matches!(err, RelationshipError::Dependency { .. }), "{err}");

        // Transport failure.
        let book = ReferenceBook::new().offline();
        let err = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "r")).unwrap_err();
        assert!(matches!(err, RelationshipError::Dependency { .. }), "{err}");

        assert!(ledger.is_empty());
        assert_eq!(ledger.commits(), 0);
    }

    #[test]
    fn seller_only_form_never_calls_out() {
        let mut ledger = MemoryLedger::new();
        let config = ChaincodeConfig {
            argument_form: ArgumentForm::SellerOnly,
            ..ChaincodeConfig::default()
        };
        let book = ReferenceBook::new().with_entry("b", "100");
        let mut req = request(OrderSide::Sell, "orgA", "r");
        req.form = ArgumentForm::SellerOnly;
        let status = submit_on(&mut ledger, &config, &book, "orgB", req);
        assert_eq!(status.unwrap(), OrderStatus::Initiated);
        assert!(book.calls().is_empty());
    }

    #[test]
    fn delimiter_in_field_rejected() {
        let mut ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();
        let err = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "org\u{0}A", "r")).unwrap_err();
        assert!(matches!(err, RelationshipError::InvalidArgument { .. }), "{err}");
        assert!(ledger.is_empty());
    }

    #[test]
    fn empty_field_rejected() {
        let mut ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();
        let err = submit_on(&mut ledger, &config, &book, "orgB", request(OrderSide::Sell, "orgA", "")).unwrap_err();
        assert!(err.to_string().contains("reference"), "{err}");
    }

    #[test]
    fn storage_errors_propagate_verbatim() {
        let ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();

        for fault in [Fault::Get, Fault::Put] {
            let mut store = FaultyStore::new(ledger.begin(), fault);
            let err = {
                let mut ctx = TxContext::new("tx", "mychannel", b"", &mut store, &book);
                OrderMatcher::new(&config)
                    .submit(&mut ctx, &org("orgB"), request(OrderSide::Sell, "orgA", "r"))
                    .unwrap_err()
            };
            assert!(matches!(err, RelationshipError::Storage(_)), "{err}");
            assert!(err.to_string().contains("injected"));
            assert_eq!(store.puts(), 0);
            assert!(store.into_inner().pending().is_empty());
        }
    }

    #[test]
    fn read_sees_committed_state_only() {
        let ledger = MemoryLedger::new();
        let config = no_reference();
        let book = ReferenceBook::new();
        let mut tx = ledger.begin();
        let mut ctx = TxContext::new("tx", "mychannel", b"", &mut tx, &book);
        let matcher = OrderMatcher::new(&config);
        let req = request(OrderSide::Sell, "orgA", "r");
        // Both legs in one transaction: the second read does not see the first write.
        assert_eq!(matcher.submit(&mut ctx, &org("orgB"), req.clone()).unwrap(), OrderStatus::Initiated);
        assert_eq!(matcher.submit(&mut ctx, &org("orgB"), req).unwrap(), OrderStatus::Initiated);
        drop(ctx);
        assert_eq!(tx.pending().len(), 1);
        assert_eq!(tx.get_state("missing").unwrap(), None);
    }
}
