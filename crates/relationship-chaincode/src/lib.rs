//! # relationship-chaincode
//!
//! Bilateral order-matching contract for a replicated ledger.
//!
//! Two organizations record the same trade independently. The first leg
//! stores the order as `initiated`; the counterparty's identical leg (same
//! buyer, seller, asset, quantity, price and reference) finds the record and
//! flips it to `matched`. Every replica running the same transactions in the
//! same order reaches the same state.
//!
//! ## Components
//!
//! 1. **Invocation**: closed dispatch over `order` / `query`
//! 2. **OrderMatcher**: one leg in, `initiated` or `matched` out
//! 3. **OrderQueryEngine**: full listing of the order namespace
//! 4. **RelationshipChaincode**: `init` / `invoke` entry points
//! 5. **LocalPeer**: single-replica host with commit-on-success
//! 6. **ReplayLog**: JSON transaction log replayed through a `LocalPeer`
//!
//! ```text
//! invoke(fn, args) ─► Invocation ─┬─► OrderMatcher ─► StateStore
//!                                 └─► OrderQueryEngine ─► JSON
//! ```

pub mod chaincode;
pub mod context;
pub mod dispatch;
pub mod matcher;
pub mod peer;
pub mod query;
pub mod replay;

pub use chaincode::RelationshipChaincode;
pub use context::TxContext;
pub use dispatch::{Invocation, OrderRequest};
pub use matcher::OrderMatcher;
pub use peer::LocalPeer;
pub use query::OrderQueryEngine;
pub use replay::{LoggedTransaction, ReplayLog, ReplayOutcome, ReplayReport};
