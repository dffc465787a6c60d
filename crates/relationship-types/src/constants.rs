//! System-wide constants for the relationship chaincode.

/// Namespace under which every order record is keyed.
pub const ORDER_NAMESPACE: &str = "Order";

/// Delimiter placed around the namespace and every composite key part.
pub const COMPOSITE_KEY_DELIMITER: char = '\u{0000}';

/// Highest scalar value; reserved as the exclusive upper bound of a
/// prefix scan, so it may not appear inside a key part either.
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Number of fields in an order's identity tuple.
pub const ORDER_KEY_ARITY: usize = 6;

/// Argument count of the sided `order` form: side, counterparty, asset,
/// qty, price, reference.
pub const SIDED_ORDER_ARGS: usize = 6;

/// Argument count of the seller-only `order` form: buyer, asset, qty,
/// price, reference.
pub const SELLER_ONLY_ORDER_ARGS: usize = 5;

/// Invocation function that submits an order leg.
pub const FN_ORDER: &str = "order";

/// Invocation function that lists every recorded order.
pub const FN_QUERY: &str = "query";

/// Peer response status: success.
pub const STATUS_OK: i32 = 200;

/// Peer response status: rejected caller input.
pub const STATUS_BAD_REQUEST: i32 = 400;

/// Peer response status: failed execution.
pub const STATUS_ERROR: i32 = 500;

/// Default reference contract name.
pub const DEFAULT_REFERENCE_CONTRACT: &str = "reference";

/// Default channel the reference contract is deployed on.
pub const DEFAULT_REFERENCE_CHANNEL: &str = "reference";

/// Default query function of the reference contract.
pub const DEFAULT_REFERENCE_FUNCTION: &str = "query";

/// Reference entry consulted for buy-side submissions.
pub const DEFAULT_BUY_QUERY_KEY: &str = "a";

/// Reference entry consulted for sell-side submissions.
pub const DEFAULT_SELL_QUERY_KEY: &str = "b";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chaincode name.
pub const CHAINCODE_NAME: &str = "RelationshipChaincode";
