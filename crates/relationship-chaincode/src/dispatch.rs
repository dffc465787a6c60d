//! Invocation parsing.
//!
//! The function name and its string arguments are resolved exactly once,
//! here, into a closed [`Invocation`]. Everything downstream works on typed
//! values; an unknown name or a wrong argument count never gets past this
//! point, so it is rejected before any state access.

use relationship_types::{
    ArgumentForm, OrderSide, OrderTuple, Organization, RelationshipError, Result, constants,
};

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Submit one leg of an order.
    Order(OrderRequest),
    /// List every recorded order.
    Query,
}

impl Invocation {
    /// Resolve `function` and `args` under the deployment's argument form.
    ///
    /// # Errors
    /// Returns [`RelationshipError::InvalidArgument`] for an unknown
    /// function, a wrong argument count, or an unknown side.
    pub fn parse(function: &str, args: &[String], form: ArgumentForm) -> Result<Self> {
        match function {
            constants::FN_ORDER => OrderRequest::parse(args, form).map(Self::Order),
            constants::FN_QUERY => {
                if args.is_empty() {
                    Ok(Self::Query)
                } else {
                    Err(RelationshipError::invalid_argument(format!(
                        "query takes no arguments, got {}",
                        args.len()
                    )))
                }
            }
            _ => Err(RelationshipError::invalid_argument(
                "invalid invoke function name",
            )),
        }
    }

    /// Function name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Order(_) => constants::FN_ORDER,
            Self::Query => constants::FN_QUERY,
        }
    }
}

/// One order leg as submitted. The caller's own organization is not part
/// of the request: it is filled in from the verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Side the caller takes.
    pub side: OrderSide,
    /// The other party, taken from the arguments.
    pub counterparty: String,
    pub asset: String,
    pub qty: String,
    pub price: String,
    pub reference: String,
    /// Form the request arrived in.
    pub form: ArgumentForm,
}

impl OrderRequest {
    /// Parse `order` arguments.
    ///
    /// - [`ArgumentForm::Sided`]: `[side, counterparty, asset, qty, price, reference]`
    /// - [`ArgumentForm::SellerOnly`]: `[buyer, asset, qty, price, reference]`
    pub fn parse(args: &[String], form: ArgumentForm) -> Result<Self> {
        if args.len() != form.arity() {
            return Err(RelationshipError::invalid_argument(format!(
                "incorrect number of arguments: expected {}, got {}",
                form.arity(),
                args.len()
            )));
        }

        let (side, rest) = match form {
            ArgumentForm::Sided => (args[0].parse::<OrderSide>()?, &args[1..]),
            ArgumentForm::SellerOnly => (OrderSide::Sell, args),
        };
        let [counterparty, asset, qty, price, reference] = rest else {
            return Err(RelationshipError::invalid_argument(
                "incorrect number of arguments",
            ));
        };

        Ok(Self {
            side,
            counterparty: counterparty.clone(),
            asset: asset.clone(),
            qty: qty.clone(),
            price: price.clone(),
            reference: reference.clone(),
            form,
        })
    }

    /// Place the caller on its side of the trade. The caller's side is
    /// never taken from the arguments.
    #[must_use]
    pub fn into_tuple(self, caller: &Organization) -> OrderTuple {
        let (buyer, seller) = match self.side {
            OrderSide::Buy => (caller.to_string(), self.counterparty),
            OrderSide::Sell => (self.counterparty, caller.to_string()),
        };
        OrderTuple {
            buyer,
            seller,
            asset: self.asset,
            qty: self.qty,
            price: self.price,
            reference: self.reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn org(name: &str) -> Organization {
        Organization::new(name).unwrap()
    }

    #[test]
    fn sided_sell_puts_caller_as_seller() {
        let inv = Invocation::parse(
            "order",
            &args(&["sell", "orgA", "widget", "10", "5", "ref1"]),
            ArgumentForm::Sided,
        )
        .unwrap();
        let Invocation::Order(req) = inv else {
            panic!("expected an order invocation");
        };
        assert_eq!(req.side, OrderSide::Sell);
        let tuple = req.into_tuple(&org("orgB"));
        assert_eq!(tuple.buyer, "orgA");
        assert_eq!(tuple.seller, "orgB");
        assert_eq!(tuple.asset, "widget");
        assert_eq!(tuple.qty, "10");
        assert_eq!(tuple.price, "5");
        assert_eq!(tuple.reference, "ref1");
    }

    #[test]
    fn sided_buy_puts_caller_as_buyer() {
        let req = OrderRequest::parse(
            &args(&["buy", "orgB", "widget", "10", "5", "ref1"]),
            ArgumentForm::Sided,
        )
        .unwrap();
        let tuple = req.into_tuple(&org("orgA"));
        assert_eq!(tuple.buyer, "orgA");
        assert_eq!(tuple.seller, "orgB");
    }

    #[test]
    fn seller_only_form() {
        let req = OrderRequest::parse(
            &args(&["orgA", "widget", "10", "5", "ref1"]),
            ArgumentForm::SellerOnly,
        )
        .unwrap();
        assert_eq!(req.side, OrderSide::Sell);
        assert_eq!(req.form, ArgumentForm::SellerOnly);
        let tuple = req.into_tuple(&org("orgB"));
        assert_eq!(tuple.buyer, "orgA");
        assert_eq!(tuple.seller, "orgB");
        assert_eq!(tuple.asset, "widget");
    }

    #[test]
    fn forms_are_not_merged() {
        // A five-argument call is wrong for the sided form and vice versa.
        let five = args(&["orgA", "widget", "10", "5", "ref1"]);
        let six = args(&["sell", "orgA", "widget", "10", "5", "ref1"]);
        assert!(OrderRequest::parse(&five, ArgumentForm::Sided).is_err());
        assert!(OrderRequest::parse(&six, ArgumentForm::SellerOnly).is_err());
    }

    #[test]
    fn wrong_arity_rejected() {
        for n in [0, 1, 5, 7] {
            let a: Vec<String> = (0..n).map(|i| format!("a{i}")).collect();
            let err = Invocation::parse("order", &a, ArgumentForm::Sided).unwrap_err();
            assert!(
                matches!(err, RelationshipError::InvalidArgument { .. }),
                "{n} args: {err}"
            );
        }
    }

    #[test]
    fn unknown_side_rejected() {
        let err = OrderRequest::parse(
            &args(&["hold", "orgA", "widget", "10", "5", "ref1"]),
            ArgumentForm::Sided,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hold"));
    }

    #[test]
    fn unknown_function_rejected() {
        let err = Invocation::parse("delete", &[], ArgumentForm::Sided).unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.to_string().contains("invalid invoke function name"));
    }

    #[test]
    fn query_takes_no_args() {
        assert_eq!(
            Invocation::parse("query", &[], ArgumentForm::Sided).unwrap(),
            Invocation::Query
        );
        assert!(Invocation::parse("query", &args(&["x"]), ArgumentForm::Sided).is_err());
        assert_eq!(Invocation::Query.name(), "query");
    }
}
