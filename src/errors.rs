//! Error types for operator-table configuration and infix-to-postfix
//! conversion
//!
//! Two phases, two types, mirroring how configuration problems differ from
//! malformed input:
//! - [`OperatorError`]: duplicate registration at construction time, or a
//!   precedence query on a token that is not an operator.  Both indicate a
//!   broken specialization, not bad input.
//! - [`ConvertError`]: structural problems in the token sequence itself.
//!   Conversion detects these before any stack pop on empty state.
//!
//! All errors are synchronous and surfaced to the caller of the conversion;
//! nothing is retried or locally recovered.

use std::fmt;

/// Operator-table error: configuration or contract violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError<T> {
    /// The same operator token was registered twice at construction time.
    DuplicateOperator { token: T },

    /// A precedence or associativity query named a token with no table entry.
    NotAnOperator { token: T },
}

impl<T: fmt::Debug> fmt::Display for OperatorError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorError::DuplicateOperator { token } => {
                write!(f, "Duplicate operator registration: {:?}", token)
            }
            OperatorError::NotAnOperator { token } => {
                write!(f, "Token is not a registered operator: {:?}", token)
            }
        }
    }
}

impl<T: fmt::Debug> std::error::Error for OperatorError<T> {}

/// Conversion error raised while transforming an infix token sequence.
///
/// Positions are zero-based indices into the input token sequence, counting
/// skippable tokens, so a caller holding the original sequence can point at
/// the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError<T> {
    /// Operator-table failure observed during conversion.
    Operator(OperatorError<T>),

    /// A closing parenthesis with no matching open, reported at the closing
    /// token's index, or an open parenthesis still unmatched when input
    /// ended, reported at the opening token's index.
    UnbalancedParentheses { position: usize },

    /// A comma outside any open call or group.
    MisplacedComma { position: usize },

    /// An operator or resolved call was emitted without enough operands
    /// before it, e.g. a trailing operator or an empty group used as an
    /// operand.
    MissingOperand { position: usize },
}

impl<T: fmt::Debug> fmt::Display for ConvertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Operator(err) => write!(f, "{}", err),
            ConvertError::UnbalancedParentheses { position } => {
                write!(f, "Unbalanced parentheses at token {}", position)
            }
            ConvertError::MisplacedComma { position } => {
                write!(
                    f,
                    "Comma outside any call or group at token {}",
                    position
                )
            }
            ConvertError::MissingOperand { position } => {
                write!(f, "Missing operand at token {}", position)
            }
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ConvertError<T> {}

impl<T> From<OperatorError<T>> for ConvertError<T> {
    fn from(err: OperatorError<T>) -> Self {
        ConvertError::Operator(err)
    }
}
