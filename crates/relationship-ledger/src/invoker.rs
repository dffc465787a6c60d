//! Cross-contract invocation boundary.
//!
//! A chaincode may synchronously call another deployed chaincode within
//! the same transaction. The call is read-only from this contract's point
//! of view, blocks until the callee answers, and is never retried.

use std::cell::RefCell;
use std::collections::BTreeMap;

use relationship_types::{ReferenceRecord, RelationshipError, Response, Result, constants};

/// Synchronous call into another chaincode.
pub trait ChaincodeInvoker {
    /// Invoke `contract` on `channel` with `args` (function name first).
    ///
    /// `Err` means the call could not be made at all; a callee that ran and
    /// failed answers `Ok` with a non-success [`Response`].
    fn invoke_chaincode(&self, contract: &str, args: &[String], channel: &str)
    -> Result<Response>;
}

/// One call observed by a [`ReferenceBook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCall {
    pub contract: String,
    pub channel: String,
    pub args: Vec<String>,
}

/// In-process reference contract: named entries with an amount, answered
/// through `query <name>`.
#[derive(Debug, Default)]
pub struct ReferenceBook {
    contract: String,
    channel: String,
    entries: BTreeMap<String, ReferenceRecord>,
    offline: bool,
    calls: RefCell<Vec<ObservedCall>>,
}

impl ReferenceBook {
    /// Empty book deployed at the default coordinates.
    #[must_use]
    pub fn new() -> Self {
        Self::deployed_at(
            constants::DEFAULT_REFERENCE_CONTRACT,
            constants::DEFAULT_REFERENCE_CHANNEL,
        )
    }

    #[must_use]
    pub fn deployed_at(contract: &str, channel: &str) -> Self {
        Self {
            contract: contract.to_owned(),
            channel: channel.to_owned(),
            ..Self::default()
        }
    }

    /// Set the amount reported for `name`.
    #[must_use]
    pub fn with_entry(mut self, name: &str, amount: &str) -> Self {
        self.entries.insert(
            name.to_owned(),
            ReferenceRecord {
                name: name.to_owned(),
                amount: amount.to_owned(),
            },
        );
        self
    }

    /// Make every call fail at the transport level.
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ObservedCall> {
        self.calls.borrow().clone()
    }

    fn answer(&self, args: &[String]) -> Response {
        match args {
            [function, name] if function == constants::DEFAULT_REFERENCE_FUNCTION => {
                match self.entries.get(name) {
                    Some(record) => match serde_json::to_vec(record) {
                        Ok(payload) => Response::success(payload),
                        Err(e) => Response::error(constants::STATUS_ERROR, e.to_string()),
                    },
                    None => Response::error(
                        constants::STATUS_ERROR,
                        format!("Nil amount for {name}"),
                    ),
                }
            }
            [function, ..] if function == constants::DEFAULT_REFERENCE_FUNCTION => {
                Response::error(
                    constants::STATUS_BAD_REQUEST,
                    "Incorrect number of arguments. Expecting name of the entity to query",
                )
            }
            _ => Response::error(
                constants::STATUS_BAD_REQUEST,
                "Invalid invoke function name. Expecting \"query\"",
            ),
        }
    }
}

impl ChaincodeInvoker for ReferenceBook {
    fn invoke_chaincode(
        &self,
        contract: &str,
        args: &[String],
        channel: &str,
    ) -> Result<Response> {
        self.calls.borrow_mut().push(ObservedCall {
            contract: contract.to_owned(),
            channel: channel.to_owned(),
            args: args.to_vec(),
        });

        if self.offline {
            return Err(RelationshipError::dependency(format!(
                "chaincode {contract} on channel {channel} is unreachable"
            )));
        }
        if contract != self.contract || channel != self.channel {
            return Ok(Response::error(
                constants::STATUS_ERROR,
                format!("chaincode {contract} not found on channel {channel}"),
            ));
        }
        Ok(self.answer(args))
    }
}
