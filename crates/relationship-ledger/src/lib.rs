//! # relationship-ledger
//!
//! **Ledger boundary** for the relationship chaincode: everything the
//! contract reads from or writes to the hosting platform goes through this
//! crate.
//!
//! ## Components
//!
//! 1. **CompositeKey**: injective, order-preserving `(namespace, parts)` key codec
//! 2. **StateStore**: transaction-scoped get / put / prefix scan
//! 3. **MemoryLedger + TxOverlay**: in-memory host with commit-on-success
//! 4. **IdentityResolver**: caller certificate → issuer organization
//! 5. **ChaincodeInvoker**: synchronous cross-contract call, plus the
//!    in-process `ReferenceBook`
//! 6. **state_root**: digest for cross-replica state comparison
//!
//! ```text
//! creator ─► IdentityResolver ─► Organization
//! tuple ─► CompositeKey ─► StateStore (TxOverlay) ─► WriteSet ─► MemoryLedger::commit
//! ```

pub mod composite_key;
pub mod determinism;
pub mod identity;
pub mod invoker;
pub mod memory;
pub mod state;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use composite_key::CompositeKey;
pub use determinism::{compute_state_root, scan_state_root, verify_state_root};
pub use identity::{IdentityResolver, X509IssuerResolver};
pub use invoker::{ChaincodeInvoker, ObservedCall, ReferenceBook};
pub use memory::{MemoryLedger, TxOverlay, WriteSet};
pub use state::{KeyValue, StateIter, StateStore};
