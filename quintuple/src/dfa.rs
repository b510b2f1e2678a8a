//! The validated, immutable automaton.

use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::alphabet::{Alphabet, Tokens};
use crate::definition::{Definition, Delta, Row};
use crate::error::{DfaError, ParseError, SymbolError};
use crate::runner::Runner;
use crate::state::{Indexable, State, StateId, SymbolId, Target};
use crate::validate::{self, StateTable};

// MARK: DFA
/// An immutable, validated 5-tuple (states, alphabet, delta, initial state, final states).
///
/// Only [`Dfa::new`] (and the parsing shortcuts on top of it) can produce one, so every value
/// of this type satisfies the definition rules. There are no mutators, any number of
/// [`Runner`]s can walk the same DFA at once.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: StateTable,
    alphabet: Alphabet,
    /// `states * symbols` cells, row per state in declaration order.
    table: Vec<Target>,
    initial: StateId,
    /// Accept flag per state.
    accepting: Vec<bool>,
}

impl Dfa {
    /// Validates `definition` and freezes it. The checks run in a fixed order and the first
    /// violated one is reported:
    /// empty state, alphabet, state coverage of delta, symbol coverage of every row,
    /// transition targets, initial state, final states.
    pub fn new(definition: Definition) -> Result<Self, DfaError> {
        let result = Self::validate(&definition);
        match &result {
            Ok(dfa) => debug!(
                target: "quintuple::dfa",
                states = dfa.states.names.len(),
                symbols = dfa.alphabet.len(),
                "Accepted definition"
            ),
            Err(error) => debug!(
                target: "quintuple::dfa",
                kind = %error.kind(),
                %error,
                "Rejected definition"
            ),
        }
        result
    }

    fn validate(definition: &Definition) -> Result<Self, DfaError> {
        let states = validate::check_states(&definition.states)?;
        let alphabet = validate::check_alphabet(&definition.alphabet)?;
        validate::check_state_coverage(&states, &definition.delta)?;
        validate::check_symbol_coverage(&states, &alphabet, &definition.delta)?;
        let table = validate::check_targets(&states, &alphabet, &definition.delta)?;
        let initial = validate::check_initial_state(&states, &definition.initial_state)?;
        let accepting = validate::check_final_states(&states, &definition.final_states)?;

        Ok(Self {
            states,
            alphabet,
            table,
            initial,
            accepting,
        })
    }

    /// Parses the JSON wire format and validates it.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Definition::from_json(json)?)?)
    }

    /// Declared states, in declaration order, without duplicates.
    pub fn states(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.states.names.iter().map(String::as_str)
    }

    /// The alphabet this DFA is defined over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The initial state, always one of [`Dfa::states`].
    pub fn initial_state(&self) -> &str {
        self.name(self.initial)
    }

    /// The final states, in declaration order. All are members of [`Dfa::states`].
    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states
            .names
            .iter()
            .zip(&self.accepting)
            .filter(|(_, accepting)| **accepting)
            .map(|(name, _)| name.as_str())
    }

    /// True iff `state` is declared. The dead state never is.
    pub fn is_declared(&self, state: State<'_>) -> bool {
        state.name().is_some_and(|name| self.states.contains(name))
    }

    /// True iff `state` is a declared final state. The dead state never is.
    pub fn is_final(&self, state: State<'_>) -> bool {
        match state {
            State::Alive(name) => self
                .states
                .get(name)
                .is_some_and(|id| self.accepting[id.index()]),
            State::Dead => false,
        }
    }

    /// One step of the transition function, without any cursor.
    ///
    /// The symbol is checked first (empty, then membership), so an invalid symbol is an
    /// error even from the dead state. From the dead state every valid symbol leads back to
    /// the dead state, otherwise `state` has to be declared.
    pub fn next_state<'s>(&'s self, state: State<'_>, symbol: &str) -> Result<State<'s>, DfaError> {
        let symbol = self.resolve_symbol(symbol)?;
        let from = match state {
            State::Dead => return Ok(State::Dead),
            State::Alive(name) => self
                .states
                .get(name)
                .ok_or_else(|| DfaError::InvalidStartState(name.to_string()))?,
        };
        Ok(self.state_of(self.step(Target::To(from), symbol)))
    }

    /// Runs `word` from the initial state and reports whether it ends in a final state.
    ///
    /// The word is split on the delimiter before anything runs, an empty or unknown token
    /// anywhere fails with [`DfaError::InvalidWord`]. The empty word is accepted iff the
    /// initial state is final.
    pub fn accepts(&self, word: &str) -> Result<bool, DfaError> {
        let tokens = self.tokenize(word)?;
        let mut runner = self.runner();
        for symbol in tokens {
            runner.advance(symbol);
        }
        Ok(runner.is_in_final_state())
    }

    /// A fresh runner positioned at the initial state.
    pub fn runner(&self) -> Runner<'_> {
        Runner::new(self)
    }

    /// Every transition as `(from, symbol, to)`, states in declaration order and symbols in
    /// alphabet order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, State<'_>)> + '_ {
        let width = self.alphabet.len();
        self.table.iter().enumerate().map(move |(cell, &target)| {
            (
                self.states.names[cell / width].as_str(),
                self.alphabet.symbol_of(SymbolId((cell % width) as u32)),
                self.state_of(target),
            )
        })
    }

    // MARK: Internals shared with Runner
    pub(crate) fn initial(&self) -> Target {
        Target::To(self.initial)
    }

    pub(crate) fn step(&self, from: Target, symbol: SymbolId) -> Target {
        match from {
            Target::Dead => Target::Dead,
            Target::To(state) => self.table[state.index() * self.alphabet.len() + symbol.index()],
        }
    }

    pub(crate) fn accepting(&self, at: Target) -> bool {
        match at {
            Target::To(state) => self.accepting[state.index()],
            Target::Dead => false,
        }
    }

    pub(crate) fn state_of(&self, at: Target) -> State<'_> {
        match at {
            Target::To(state) => State::Alive(self.name(state)),
            Target::Dead => State::Dead,
        }
    }

    pub(crate) fn resolve_symbol(&self, symbol: &str) -> Result<SymbolId, DfaError> {
        if symbol.is_empty() {
            return Err(SymbolError::Empty.into());
        }
        self.alphabet
            .index_of(symbol)
            .ok_or_else(|| SymbolError::Unknown(symbol.to_string()).into())
    }

    pub(crate) fn tokenize(&self, word: &str) -> Result<Tokens, DfaError> {
        self.alphabet
            .tokenize(word)
            .map_err(|fault| DfaError::InvalidWord {
                word: word.to_string(),
                fault,
            })
    }

    fn name(&self, state: StateId) -> &str {
        &self.states.names[state.index()]
    }
}

impl TryFrom<Definition> for Dfa {
    type Error = DfaError;

    fn try_from(definition: Definition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

impl FromStr for Dfa {
    type Err = ParseError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_json(json)
    }
}

impl From<&Dfa> for Definition {
    fn from(dfa: &Dfa) -> Self {
        let mut delta: Delta = HashMap::with_capacity(dfa.states.names.len());
        for (from, symbol, to) in dfa.transitions() {
            delta
                .entry(from.to_string())
                .or_insert_with(|| Row::with_capacity(dfa.alphabet.len()))
                .insert(symbol.to_string(), to.name().map(str::to_string));
        }

        Definition {
            alphabet: dfa.alphabet.symbols().map(str::to_string).collect(),
            states: dfa.states().map(str::to_string).collect(),
            delta,
            initial_state: dfa.initial_state().to_string(),
            final_states: dfa.final_states().map(str::to_string).collect(),
        }
    }
}

impl Serialize for Dfa {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Definition::from(self).serialize(serializer)
    }
}
