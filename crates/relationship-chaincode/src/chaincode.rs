//! Chaincode entry points.
//!
//! `init` and `invoke` are the only two calls the platform makes. `invoke`
//! parses the invocation once, runs it, and folds every error into a
//! uniform error [`Response`].

use relationship_ledger::{IdentityResolver, X509IssuerResolver};
use relationship_types::{ChaincodeConfig, Organization, Response, Result, constants};

use crate::context::TxContext;
use crate::dispatch::Invocation;
use crate::matcher::OrderMatcher;
use crate::query::OrderQueryEngine;

/// The relationship chaincode: order submission and listing.
pub struct RelationshipChaincode {
    config: ChaincodeConfig,
    resolver: Box<dyn IdentityResolver + Send + Sync>,
}

impl RelationshipChaincode {
    /// Chaincode resolving callers from their certificate issuer.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` does not validate.
    pub fn new(config: ChaincodeConfig) -> Result<Self> {
        Self::with_resolver(config, Box::new(X509IssuerResolver))
    }

    /// Chaincode with a custom identity resolver.
    pub fn with_resolver(
        config: ChaincodeConfig,
        resolver: Box<dyn IdentityResolver + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, resolver })
    }

    #[must_use]
    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Instantiation hook. The contract needs no seed state.
    pub fn init(&self, ctx: &mut TxContext<'_>) -> Response {
        tracing::info!(
            parent: ctx.span(),
            chaincode = constants::CHAINCODE_NAME,
            version = constants::VERSION,
            channel = ctx.channel(),
            "Chaincode instantiated"
        );
        Response::success(Vec::new())
    }

    /// Run `function` with `args` and report the outcome.
    pub fn invoke(&self, ctx: &mut TxContext<'_>, function: &str, args: &[String]) -> Response {
        match self.execute(ctx, function, args) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                tracing::warn!(
                    parent: ctx.span(),
                    function,
                    status = err.status(),
                    error = %err,
                    "Transaction rejected"
                );
                Response::from(err)
            }
        }
    }

    fn execute(&self, ctx: &mut TxContext<'_>, function: &str, args: &[String]) -> Result<Vec<u8>> {
        let invocation = Invocation::parse(function, args, self.config.argument_form)?;
        tracing::debug!(parent: ctx.span(), function = invocation.name(), args = ?args, "Invoke");

        match invocation {
            Invocation::Order(request) => {
                let caller = self.caller(ctx)?;
                let status = OrderMatcher::new(&self.config).submit(ctx, &caller, request)?;
                Ok(status.as_bytes().to_vec())
            }
            Invocation::Query => OrderQueryEngine::new(&self.config.namespace).list_all_json(ctx),
        }
    }

    fn caller(&self, ctx: &TxContext<'_>) -> Result<Organization> {
        let org = self.resolver.resolve_organization(ctx.creator())?;
        tracing::debug!(parent: ctx.span(), organization = %org, "Caller organization");
        Ok(org)
    }
}
