//! # relationship-types
//!
//! Shared types, errors, and configuration for the **relationship**
//! order-matching chaincode.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Organization`]
//! - **Order model**: [`Order`], [`OrderTuple`], [`OrderSide`], [`OrderStatus`]
//! - **Reference model**: [`ReferenceRecord`]
//! - **Responses**: [`Response`]
//! - **Configuration**: [`ChaincodeConfig`], [`ReferenceConfig`], [`ArgumentForm`]
//! - **Errors**: [`RelationshipError`] with `RS_ERR_` prefix codes
//! - **Constants**: namespace, key delimiters, status codes, defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod reference;
pub mod response;

pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use reference::*;
pub use response::*;

// Constants are accessed via `relationship_types::constants::FOO`
// (not re-exported to avoid name collisions).
