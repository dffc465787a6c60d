//! Deployment configuration for the chaincode.

use serde::{Deserialize, Serialize};

use crate::{RelationshipError, Result, constants};

/// Which shape of `order` arguments this deployment accepts.
///
/// Exactly one form is active per deployment; the two are never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentForm {
    /// `[side, counterparty, asset, qty, price, reference]`.
    #[default]
    Sided,
    /// `[buyer, asset, qty, price, reference]`; the caller is the seller.
    SellerOnly,
}

impl ArgumentForm {
    /// Number of `order` arguments this form expects.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Sided => constants::SIDED_ORDER_ARGS,
            Self::SellerOnly => constants::SELLER_ONLY_ORDER_ARGS,
        }
    }
}

/// Coordinates of the reference contract consulted on a first leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub contract: String,
    pub channel: String,
    pub function: String,
    /// Entry queried when the caller buys.
    pub buy_key: String,
    /// Entry queried when the caller sells.
    pub sell_key: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            contract: constants::DEFAULT_REFERENCE_CONTRACT.to_string(),
            channel: constants::DEFAULT_REFERENCE_CHANNEL.to_string(),
            function: constants::DEFAULT_REFERENCE_FUNCTION.to_string(),
            buy_key: constants::DEFAULT_BUY_QUERY_KEY.to_string(),
            sell_key: constants::DEFAULT_SELL_QUERY_KEY.to_string(),
        }
    }
}

/// Chaincode configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeConfig {
    /// Composite key namespace for order records.
    pub namespace: String,
    pub argument_form: ArgumentForm,
    /// `None` disables the cross-contract check.
    pub reference: Option<ReferenceConfig>,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            namespace: constants::ORDER_NAMESPACE.to_string(),
            argument_form: ArgumentForm::default(),
            reference: Some(ReferenceConfig::default()),
        }
    }
}

impl ChaincodeConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RelationshipError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the namespace can be carried by a composite key.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(RelationshipError::Configuration(
                "namespace must not be empty".into(),
            ));
        }
        if self.namespace.contains(constants::COMPOSITE_KEY_DELIMITER)
            || self.namespace.contains(constants::MAX_UNICODE_RUNE)
        {
            return Err(RelationshipError::Configuration(
                "namespace contains a reserved composite key character".into(),
            ));
        }
        if let Some(reference) = &self.reference {
            if reference.contract.is_empty() || reference.function.is_empty() {
                return Err(RelationshipError::Configuration(
                    "reference contract and function must be named".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let cfg = ChaincodeConfig::default();
        assert_eq!(cfg.namespace, "Order");
        assert_eq!(cfg.argument_form, ArgumentForm::Sided);
        let reference = cfg.reference.unwrap();
        assert_eq!(reference.contract, "reference");
        assert_eq!(reference.channel, "reference");
        assert_eq!(reference.function, "query");
        assert_eq!(reference.buy_key, "a");
        assert_eq!(reference.sell_key, "b");
    }

    #[test]
    fn arity_per_form() {
        assert_eq!(ArgumentForm::Sided.arity(), 6);
        assert_eq!(ArgumentForm::SellerOnly.arity(), 5);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = ChaincodeConfig::from_json(r#"{"argument_form":"seller_only","reference":null}"#)
            .unwrap();
        assert_eq!(cfg.namespace, "Order");
        assert_eq!(cfg.argument_form, ArgumentForm::SellerOnly);
        assert!(cfg.reference.is_none());
    }

    #[test]
    fn bad_namespace_rejected() {
        for json in [r#"{"namespace":""}"#, "{\"namespace\":\"Or\\u0000der\"}"] {
            let err = ChaincodeConfig::from_json(json).unwrap_err();
            assert!(matches!(err, RelationshipError::Configuration(_)), "{json}");
        }
    }

    #[test]
    fn unknown_form_rejected() {
        let err = ChaincodeConfig::from_json(r#"{"argument_form":"buyer_only"}"#).unwrap_err();
        assert!(matches!(err, RelationshipError::Configuration(_)));
    }
}
