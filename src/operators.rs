//! Operator precedence and associativity table
//!
//! The table is the only state shared between conversions: it is built once,
//! read-only afterwards, and keyed by the caller's token type.  Lookups go
//! through [`FxHashMap`] since the table is a small, read-mostly map queried
//! on every operator token.

use crate::errors::OperatorError;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// Grouping direction for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// Repeated application groups left-to-right: `a - b - c` is `(a-b)-c`.
    Left,
    /// Repeated application groups right-to-left: `a ^ b ^ c` is `a^(b^c)`.
    Right,
}

/// Precedence weight and associativity of one operator token.
///
/// Higher weight binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorRule {
    pub weight: i32,
    pub associativity: Associativity,
}

impl OperatorRule {
    pub fn new(weight: i32, associativity: Associativity) -> Self {
        Self {
            weight,
            associativity,
        }
    }
}

/// Read-only mapping from operator tokens to their [`OperatorRule`].
///
/// Every token the conversion treats as an operator must have an entry here;
/// querying precedence for an unregistered token is a contract violation and
/// fails with [`OperatorError::NotAnOperator`].  All registered operators are
/// binary: the infix algorithm has no way to apply any other arity.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable<T> {
    rules: FxHashMap<T, OperatorRule>,
}

impl<T: Clone + Eq + Hash> OperatorTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// Build a table from `(token, rule)` pairs.
    ///
    /// Registering the same token twice is a construction-time error.
    pub fn from_rules<I>(rules: I) -> Result<Self, OperatorError<T>>
    where
        I: IntoIterator<Item = (T, OperatorRule)>,
    {
        let mut table = Self::new();
        for (token, rule) in rules {
            if table.rules.insert(token.clone(), rule).is_some() {
                return Err(OperatorError::DuplicateOperator { token });
            }
        }
        Ok(table)
    }

    /// True when the token has a registered rule.
    pub fn is_operator(&self, token: &T) -> bool {
        self.rules.contains_key(token)
    }

    /// Precedence weight of an operator token.
    pub fn weight_of(&self, token: &T) -> Result<i32, OperatorError<T>> {
        self.rule_of(token).map(|rule| rule.weight)
    }

    /// Associativity of an operator token.
    pub fn associativity_of(
        &self,
        token: &T,
    ) -> Result<Associativity, OperatorError<T>> {
        self.rule_of(token).map(|rule| rule.associativity)
    }

    /// True when the token is an operator with the given associativity.
    pub fn is_associative(&self, token: &T, associativity: Associativity) -> bool {
        self.rules
            .get(token)
            .is_some_and(|rule| rule.associativity == associativity)
    }

    /// Compare the precedence of two operator tokens.
    ///
    /// Fails when either token is not a registered operator.
    pub fn compare_precedence(
        &self,
        left: &T,
        right: &T,
    ) -> Result<Ordering, OperatorError<T>> {
        let left_weight = self.weight_of(left)?;
        let right_weight = self.weight_of(right)?;
        Ok(left_weight.cmp(&right_weight))
    }

    fn rule_of(&self, token: &T) -> Result<OperatorRule, OperatorError<T>> {
        self.rules
            .get(token)
            .copied()
            .ok_or_else(|| OperatorError::NotAnOperator {
                token: token.clone(),
            })
    }
}
