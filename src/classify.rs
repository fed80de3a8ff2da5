//! Token classification contract supplied by a specialization
//!
//! The conversion engine is polymorphic over a caller-defined token type.  A
//! specialization implements [`TokenClassifier`] to answer what each token
//! is; the engine never inspects token contents itself.  All predicates must
//! be deterministic and side-effect free — the engine may evaluate them in
//! any order and any number of times per token.

use std::hash::Hash;

/// Classification capability set for a caller-defined token type.
///
/// A token is inferred to be a **function name** precisely when it is a word
/// and not a registered operator; that inference lives in the engine, so
/// [`is_word`](TokenClassifier::is_word) should be true exactly for tokens
/// that can name a function in the specialization's vocabulary.  Plain
/// values (literals, variables) are not words in this sense — they flow
/// straight to the output.
pub trait TokenClassifier {
    /// Caller-defined token representation.
    ///
    /// `Eq + Hash` because operator tokens key the operator table; `Clone`
    /// because resolved call tokens are renamed rather than mutated.
    type Token: Clone + Eq + Hash;

    /// True for tokens the conversion ignores entirely (whitespace, no-ops).
    fn is_skippable(&self, token: &Self::Token) -> bool;

    /// True for an opening parenthesis.
    fn is_left_parenthesis(&self, token: &Self::Token) -> bool;

    /// True for a closing parenthesis.
    fn is_right_parenthesis(&self, token: &Self::Token) -> bool;

    /// True for an argument separator.
    fn is_comma(&self, token: &Self::Token) -> bool;

    /// True for a word that can name a function.
    fn is_word(&self, token: &Self::Token) -> bool;

    /// True only for markers produced by
    /// [`generate_virtual_token`](TokenClassifier::generate_virtual_token).
    /// Real input tokens must never satisfy this.
    fn is_virtual_function(&self, token: &Self::Token) -> bool;

    /// Produce a fresh marker for an anonymous grouping parenthesis.
    ///
    /// Every call must return a token distinguishable from all real input
    /// tokens and from every previously generated marker, since nested
    /// anonymous groups are open simultaneously.  A monotonically increasing
    /// counter embedded in the token is the expected implementation.
    fn generate_virtual_token(&mut self) -> Self::Token;

    /// Return a new token embedding the resolved argument count, so a
    /// downstream consumer can tell a 0-argument call from a 3-argument call
    /// without re-scanning the sequence.
    fn rename_with_args_count(
        &self,
        token: &Self::Token,
        args_count: usize,
    ) -> Self::Token;
}
