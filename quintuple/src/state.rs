//! States of a DFA, with the dead state as its own variant instead of a missing value.

use std::fmt::{self, Display};

/// A position in a DFA: either a declared state or the absorbing dead state.
/// The dead state is never declared and never final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State<'a> {
    /// A declared state, by identifier.
    Alive(&'a str),
    /// The absorbing sink.
    Dead,
}

impl<'a> State<'a> {
    /// True for the dead state.
    pub fn is_dead(&self) -> bool {
        matches!(self, State::Dead)
    }

    /// The identifier of a declared state, `None` when dead.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            State::Alive(name) => Some(name),
            State::Dead => None,
        }
    }
}

impl<'a> From<&'a str> for State<'a> {
    fn from(name: &'a str) -> Self {
        State::Alive(name)
    }
}

impl<'a> From<Option<&'a str>> for State<'a> {
    fn from(name: Option<&'a str>) -> Self {
        name.map_or(State::Dead, State::Alive)
    }
}

impl Display for State<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Alive(name) => f.write_str(name),
            State::Dead => f.write_str("∅"),
        }
    }
}

/// Marker trait for ids which index straight into a dense table.
pub trait Indexable: Copy {
    /// Returns the index.
    fn index(&self) -> usize;
}

/// Dense index of a declared state, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

/// Dense index of a symbol, in the alphabet's sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u32);

impl Indexable for StateId {
    fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Indexable for SymbolId {
    fn index(&self) -> usize {
        self.0 as usize
    }
}

/// One cell of the transition table, and the runner's cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    To(StateId),
    Dead,
}
