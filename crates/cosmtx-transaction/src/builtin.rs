//! Catalog of built-in operations.
//!
//! Each operation is a factory that reads named parameters from a
//! [`Mapping`] and returns the packed message. Catalogs are plain values:
//! new operations are added with [`BuiltinCatalog::register`] without
//! touching the builder.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use cosmtx_proto::dynamic::{Mapping, Value};
use cosmtx_proto::types::bank::MsgSend;
use cosmtx_proto::types::distribution::{MsgSetWithdrawAddress, MsgWithdrawDelegatorReward};
use cosmtx_proto::types::osmosis::{MsgSwapExactAmountIn, SwapAmountInRoute};
use cosmtx_proto::types::staking::{MsgDelegate, MsgUndelegate};
use cosmtx_proto::types::coin;
use cosmtx_proto::{Any, TypedMessage};

use crate::TransactionError;

/// Builds one message from named parameters.
pub type BuiltinFactory = fn(&Mapping) -> Result<Any, TransactionError>;

static STANDARD: LazyLock<BuiltinCatalog> = LazyLock::new(BuiltinCatalog::standard);

/// Operation name to factory table.
#[derive(Clone, Debug, Default)]
pub struct BuiltinCatalog {
    factories: BTreeMap<String, BuiltinFactory>,
}

impl BuiltinCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shared by [`Transaction::add_builtin`](crate::Transaction::add_builtin).
    pub fn global() -> &'static BuiltinCatalog {
        &STANDARD
    }

    /// Catalog with `transfer`, `delegate`, `undelegate`, `withdraw_reward`,
    /// `swap` and `set_withdraw_address`.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register("transfer", transfer);
        catalog.register("delegate", delegate);
        catalog.register("undelegate", undelegate);
        catalog.register("withdraw_reward", withdraw_reward);
        catalog.register("swap", swap);
        catalog.register("set_withdraw_address", set_withdraw_address);
        catalog
    }

    /// Add or replace an operation.
    pub fn register(&mut self, name: impl Into<String>, factory: BuiltinFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Operation names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Run the operation `name` with `params`.
    pub fn build(&self, name: &str, params: &Mapping) -> Result<Any, TransactionError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| TransactionError::UnknownBuiltin(name.to_string()))?;
        factory(params)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn transfer(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("transfer", params);
    let msg = MsgSend {
        from_address: p.string("sender")?,
        to_address: p.string("recipient")?,
        amount: vec![coin(p.amount("amount")?, p.string("denom")?)],
    };
    Ok(msg.to_any())
}

fn delegate(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("delegate", params);
    let msg = MsgDelegate {
        delegator_address: p.string("delegator")?,
        validator_address: p.string("validator")?,
        amount: Some(coin(p.amount("amount")?, p.string("denom")?)),
    };
    Ok(msg.to_any())
}

fn undelegate(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("undelegate", params);
    let msg = MsgUndelegate {
        delegator_address: p.string("delegator")?,
        validator_address: p.string("validator")?,
        amount: Some(coin(p.amount("amount")?, p.string("denom")?)),
    };
    Ok(msg.to_any())
}

fn withdraw_reward(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("withdraw_reward", params);
    let msg = MsgWithdrawDelegatorReward {
        delegator_address: p.string("delegator")?,
        validator_address: p.string("validator")?,
    };
    Ok(msg.to_any())
}

fn set_withdraw_address(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("set_withdraw_address", params);
    let msg = MsgSetWithdrawAddress {
        delegator_address: p.string("delegator")?,
        withdraw_address: p.string("withdraw_address")?,
    };
    Ok(msg.to_any())
}

/// `routes` is a sequence of `{pool_id, denom}` maps, one per hop.
fn swap(params: &Mapping) -> Result<Any, TransactionError> {
    let p = Params::new("swap", params);
    let routes = p
        .seq("routes")?
        .iter()
        .map(|hop| {
            let Value::Map(hop) = hop else {
                return Err(p.invalid("routes", format!("expected map, found {}", hop.kind_name())));
            };
            let hop = Params::new("swap", hop);
            let pool_id = hop.amount("pool_id")?;
            Ok(SwapAmountInRoute {
                pool_id: u64::try_from(pool_id)
                    .map_err(|_| hop.invalid("pool_id", "exceeds 64 bits".to_string()))?,
                token_out_denom: hop.string("denom")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if routes.is_empty() {
        return Err(p.invalid("routes", "at least one hop is required".to_string()));
    }

    let msg = MsgSwapExactAmountIn {
        sender: p.string("sender")?,
        routes,
        token_in: Some(coin(p.amount("amount_in")?, p.string("denom_in")?)),
        token_out_min_amount: p.amount("min_amount_out")?.to_string(),
    };
    Ok(msg.to_any())
}

// ---------------------------------------------------------------------------
// Parameter access
// ---------------------------------------------------------------------------

struct Params<'a> {
    op: &'static str,
    values: &'a Mapping,
}

impl<'a> Params<'a> {
    fn new(op: &'static str, values: &'a Mapping) -> Self {
        Params { op, values }
    }

    fn get(&self, name: &str) -> Result<&'a Value, TransactionError> {
        self.values
            .get(name)
            .ok_or_else(|| TransactionError::MissingParameter {
                op: self.op.to_string(),
                name: name.to_string(),
            })
    }

    fn invalid(&self, name: &str, reason: String) -> TransactionError {
        TransactionError::InvalidParameter {
            op: self.op.to_string(),
            name: name.to_string(),
            reason,
        }
    }

    fn string(&self, name: &str) -> Result<String, TransactionError> {
        match self.get(name)? {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            Value::String(_) => Err(self.invalid(name, "must not be empty".to_string())),
            other => Err(self.invalid(name, format!("expected string, found {}", other.kind_name()))),
        }
    }

    /// Non-negative integer, given either as an int or as a decimal string
    /// (amounts may exceed 64 bits).
    fn amount(&self, name: &str) -> Result<u128, TransactionError> {
        match self.get(name)? {
            Value::Int(i) => {
                u128::try_from(*i).map_err(|_| self.invalid(name, format!("negative amount {}", i)))
            }
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
                .parse::<u128>()
                .map_err(|e| self.invalid(name, e.to_string())),
            Value::String(s) => Err(self.invalid(name, format!("'{}' is not a decimal amount", s))),
            other => Err(self.invalid(name, format!("expected amount, found {}", other.kind_name()))),
        }
    }

    fn seq(&self, name: &str) -> Result<&'a [Value], TransactionError> {
        match self.get(name)? {
            Value::Seq(items) => Ok(items),
            other => Err(self.invalid(name, format!("expected seq, found {}", other.kind_name()))),
        }
    }
}
