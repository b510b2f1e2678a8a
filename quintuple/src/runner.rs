//! A cursor walking a [`Dfa`] one symbol at a time.

use tracing::trace;

use crate::dfa::Dfa;
use crate::error::DfaError;
use crate::state::{State, SymbolId, Target};

/// The only stateful piece: a borrowed DFA plus the current position.
///
/// The runner never halts, acceptance is a predicate that can be asked at any point.
/// Once in the dead state it stays there, but invalid symbols are still refused.
#[derive(Debug, Clone)]
pub struct Runner<'d> {
    dfa: &'d Dfa,
    cursor: Target,
}

impl<'d> Runner<'d> {
    /// Starts at the initial state of `dfa`.
    pub fn new(dfa: &'d Dfa) -> Self {
        Self {
            dfa,
            cursor: dfa.initial(),
        }
    }

    /// The DFA being walked.
    pub fn dfa(&self) -> &'d Dfa {
        self.dfa
    }

    /// Where the cursor is, possibly the dead state.
    pub fn current_state(&self) -> State<'d> {
        self.dfa.state_of(self.cursor)
    }

    /// The state `consume(symbol)` would move to, without moving.
    pub fn peek(&self, symbol: &str) -> Result<State<'d>, DfaError> {
        let symbol = self.dfa.resolve_symbol(symbol)?;
        Ok(self.dfa.state_of(self.dfa.step(self.cursor, symbol)))
    }

    /// Moves along `symbol` and returns the new state. On error the cursor does not move.
    pub fn consume(&mut self, symbol: &str) -> Result<State<'d>, DfaError> {
        let id = self.dfa.resolve_symbol(symbol)?;
        self.advance(id);
        trace!(
            target: "quintuple::runner",
            symbol,
            state = %self.current_state(),
            "Consumed symbol"
        );
        Ok(self.current_state())
    }

    /// Consumes every symbol of a delimited word. The word is checked as a whole first,
    /// so an invalid word leaves the cursor where it was.
    pub fn consume_word(&mut self, word: &str) -> Result<State<'d>, DfaError> {
        let tokens = self.dfa.tokenize(word)?;
        for symbol in tokens {
            self.advance(symbol);
        }
        trace!(target: "quintuple::runner", word, state = %self.current_state(), "Consumed word");
        Ok(self.current_state())
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.cursor = self.dfa.initial();
    }

    /// True iff the cursor is on a final state, never in the dead state.
    pub fn is_in_final_state(&self) -> bool {
        self.dfa.accepting(self.cursor)
    }

    pub(crate) fn advance(&mut self, symbol: SymbolId) {
        self.cursor = self.dfa.step(self.cursor, symbol);
    }
}
