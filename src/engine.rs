//! Infix-to-postfix conversion engine
//!
//! This module implements the shunting-yard conversion as a single
//! left-to-right pass over the input sequence.  Beyond the classic
//! precedence-climbing rule it resolves each function call's actual argument
//! count, and it handles anonymous grouping parentheses by slipping a
//! synthesized "virtual function" marker beneath them on the stack — a group
//! that turns out to contain a comma-separated list closes as a call to that
//! marker, a plain algebraic group closes silently.
//!
//! # State
//!
//! One conversion owns:
//! - the output sequence (append-only),
//! - the operator/parenthesis stack,
//! - a stack of argument frames, one per open call or group,
//! - a parallel comma-seen stack,
//! - a has-argument flag for the innermost open call, which is what tells a
//!   one-argument call apart from a zero-argument call (one argument never
//!   produces a comma),
//! - whether the previous non-skippable token was a function name, replacing
//!   lookahead when deciding if a parenthesis opens a real call.
//!
//! Argument frames live in a growable `Vec` used as a stack, not in
//! heap-allocated nodes; nesting is emulated without recursion.

use crate::classify::TokenClassifier;
use crate::errors::{ConvertError, OperatorError};
use crate::operators::{Associativity, OperatorRule, OperatorTable};
use std::cmp::Ordering;

/// Entry point implemented by concrete specializations.
///
/// A specialization decides how a raw expression maps to a token sequence,
/// runs it through the shared [`ShuntingYard::infix_to_postfix`] conversion,
/// and may post-process the postfix result (building an expression tree,
/// say).
pub trait Parse<E> {
    type Token;
    type Error;

    fn parse(&mut self, expression: E) -> Result<Vec<Self::Token>, Self::Error>;
}

/// Argument bookkeeping for one open call or group.
struct FunctionArgs<T> {
    /// Function-name token (or virtual marker) the count belongs to.
    name: T,
    /// Arguments completed so far, i.e. commas consumed in this frame.
    args_count: usize,
}

/// Shunting-yard converter parameterized over a caller-defined token type.
///
/// The operator table is configured at construction and read-only afterwards;
/// all other state is scoped to a single
/// [`infix_to_postfix`](ShuntingYard::infix_to_postfix) call.
pub struct ShuntingYard<C: TokenClassifier> {
    classifier: C,
    operators: OperatorTable<C::Token>,
}

impl<C: TokenClassifier> ShuntingYard<C> {
    /// Create an engine with an empty operator table.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            operators: OperatorTable::new(),
        }
    }

    /// Create an engine from `(token, rule)` operator pairs.
    ///
    /// Fails on duplicate operator registration.
    pub fn with_rules<I>(
        classifier: C,
        rules: I,
    ) -> Result<Self, OperatorError<C::Token>>
    where
        I: IntoIterator<Item = (C::Token, OperatorRule)>,
    {
        Ok(Self {
            classifier,
            operators: OperatorTable::from_rules(rules)?,
        })
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn operators(&self) -> &OperatorTable<C::Token> {
        &self.operators
    }

    /// Convert an infix token sequence into postfix order.
    ///
    /// Parentheses and commas never appear in the output; every other token
    /// appears exactly once, with function-name tokens (and virtual markers
    /// for anonymous groups holding a comma-separated list) renamed to carry
    /// their resolved argument count.
    ///
    /// Errors report the zero-based input index of the offending token:
    /// unbalanced parentheses, a comma outside any call, or an operator with
    /// too few operands.
    pub fn infix_to_postfix<I>(
        &mut self,
        tokens: I,
    ) -> Result<Vec<C::Token>, ConvertError<C::Token>>
    where
        I: IntoIterator<Item = C::Token>,
    {
        let mut output: Vec<C::Token> = Vec::new();
        let mut stack: Vec<C::Token> = Vec::new();
        let mut frames: Vec<FunctionArgs<C::Token>> = Vec::new();
        let mut comma_seen: Vec<bool> = Vec::new();
        let mut open_positions: Vec<usize> = Vec::new();

        let mut inside_call = false;
        let mut has_argument = false;
        let mut operand_depth: usize = 0;
        let mut previous_is_function = false;
        let mut next_position: usize = 0;

        for token in tokens {
            let position = next_position;
            next_position += 1;

            if self.classifier.is_skippable(&token) {
                continue;
            }

            let is_function = self.is_function_name(&token);

            if self.operators.is_operator(&token) {
                // Pop while the stack top binds earlier: equal precedence
                // pops for left-associative operators, not for
                // right-associative ones.
                while let Some(top) = stack.last() {
                    if !self.operators.is_operator(top) {
                        break;
                    }
                    let yields = match self.operators.associativity_of(&token)? {
                        Associativity::Left => {
                            self.operators.compare_precedence(&token, top)?
                                != Ordering::Greater
                        }
                        Associativity::Right => {
                            self.operators.compare_precedence(&token, top)?
                                == Ordering::Less
                        }
                    };
                    if !yields {
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        self.emit(&mut output, &mut operand_depth, popped, position)?;
                    }
                }
                stack.push(token);
            } else if self.classifier.is_left_parenthesis(&token) {
                // A parenthesis not opened by a function name is an
                // anonymous group: slip a fresh virtual marker beneath it so
                // argument counting needs no separate grouping path.
                if !previous_is_function {
                    let marker = self.classifier.generate_virtual_token();
                    frames.push(FunctionArgs {
                        name: marker.clone(),
                        args_count: 0,
                    });
                    comma_seen.push(false);
                    inside_call = true;
                    stack.push(marker);
                }
                open_positions.push(position);
                stack.push(token);
            } else if self.classifier.is_right_parenthesis(&token) {
                let mut matched = false;
                while let Some(top) = stack.last() {
                    if self.classifier.is_left_parenthesis(top) {
                        matched = true;
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        self.emit(&mut output, &mut operand_depth, popped, position)?;
                    }
                }
                if !matched {
                    return Err(ConvertError::UnbalancedParentheses { position });
                }
                stack.pop();
                open_positions.pop();

                let top_is_virtual = stack
                    .last()
                    .is_some_and(|top| self.classifier.is_virtual_function(top));
                let top_is_call = top_is_virtual
                    || stack.last().is_some_and(|top| self.is_function_name(top));

                if top_is_call {
                    stack.pop();
                    let seen_comma = comma_seen.pop().unwrap_or(false);
                    if let Some(frame) = frames.pop() {
                        if top_is_virtual && !seen_comma {
                            // Pure grouping: one or zero expressions inside,
                            // no call semantics, nothing emitted.
                        } else {
                            let args_count = frame.args_count
                                + usize::from(seen_comma || has_argument);
                            let renamed = self
                                .classifier
                                .rename_with_args_count(&frame.name, args_count);
                            self.emit_call(
                                &mut output,
                                &mut operand_depth,
                                renamed,
                                args_count,
                                position,
                            )?;
                        }
                    }
                    inside_call = false;
                    has_argument = false;
                }
            } else if is_function {
                frames.push(FunctionArgs {
                    name: token.clone(),
                    args_count: 0,
                });
                comma_seen.push(false);
                inside_call = true;
                has_argument = false;
                stack.push(token);
            } else if self.classifier.is_comma(&token) {
                match comma_seen.last_mut() {
                    Some(seen) => *seen = true,
                    None => {
                        return Err(ConvertError::MisplacedComma { position });
                    }
                }
                // The argument before this comma is complete: flush its
                // pending operators down to the open parenthesis.
                while let Some(top) = stack.last() {
                    if self.classifier.is_left_parenthesis(top) {
                        break;
                    }
                    if let Some(popped) = stack.pop() {
                        self.emit(&mut output, &mut operand_depth, popped, position)?;
                    }
                }
                if let Some(frame) = frames.last_mut() {
                    frame.args_count += 1;
                }
            } else {
                // Plain value: goes straight to the output.  Seeing one
                // inside an open call is what distinguishes a one-argument
                // call from a zero-argument call, since a single argument
                // never produces a comma.
                if inside_call && !has_argument {
                    has_argument = true;
                }
                self.emit(&mut output, &mut operand_depth, token, position)?;
            }

            previous_is_function = is_function;
        }

        if let Some(&position) = open_positions.last() {
            return Err(ConvertError::UnbalancedParentheses { position });
        }
        while let Some(top) = stack.pop() {
            self.emit(&mut output, &mut operand_depth, top, next_position)?;
        }

        Ok(output)
    }

    /// A function name is a word that is not a registered operator.
    fn is_function_name(&self, token: &C::Token) -> bool {
        self.classifier.is_word(token) && !self.operators.is_operator(token)
    }

    /// Append a token to the output, tracking how many operands the postfix
    /// sequence has available so an operator short of operands is reported
    /// instead of producing an unevaluable sequence.  Operators are binary;
    /// anything else counts as one operand.
    fn emit(
        &self,
        output: &mut Vec<C::Token>,
        operand_depth: &mut usize,
        token: C::Token,
        position: usize,
    ) -> Result<(), ConvertError<C::Token>> {
        if self.operators.is_operator(&token) {
            if *operand_depth < 2 {
                return Err(ConvertError::MissingOperand { position });
            }
            *operand_depth -= 1;
        } else {
            *operand_depth += 1;
        }
        output.push(token);
        Ok(())
    }

    /// Append a resolved call token: consumes its arguments, produces one
    /// result.
    fn emit_call(
        &self,
        output: &mut Vec<C::Token>,
        operand_depth: &mut usize,
        renamed: C::Token,
        args_count: usize,
        position: usize,
    ) -> Result<(), ConvertError<C::Token>> {
        if *operand_depth < args_count {
            return Err(ConvertError::MissingOperand { position });
        }
        *operand_depth = *operand_depth - args_count + 1;
        output.push(renamed);
        Ok(())
    }
}
