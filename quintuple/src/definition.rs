//! The declarative form of a DFA, as read from JSON or built with [`definition!`](crate::definition!).
//!
//! ```json
//! {
//!   "alphabet": ["0", "1"],
//!   "states": ["q0", "q1", "q2"],
//!   "delta": {
//!     "q0": { "0": "q1", "1": null },
//!     "q1": { "0": "q1", "1": "q2" },
//!     "q2": { "0": "q1", "1": "q2" }
//!   },
//!   "initialState": "q0",
//!   "finalStates": ["q2"]
//! }
//! ```
//!
//! A `null` target is the dead state. Nothing here is validated, see [`Dfa::new`](crate::Dfa::new).

use std::fmt;
use std::marker::PhantomData;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Transitions out of one state: symbol to target, `None` for the dead state.
pub type Row = HashMap<String, Option<String>>;

/// Transition table: state to its [`Row`].
pub type Delta = HashMap<String, Row>;

/// Unvalidated 5-tuple, field for field the wire schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Symbols, duplicates ignored.
    pub alphabet: Vec<String>,
    /// State identifiers, duplicates ignored.
    pub states: Vec<String>,
    /// The transition function. Duplicate keys, at either level, are a parse error.
    #[serde(deserialize_with = "deserialize_delta")]
    pub delta: Delta,
    /// Where every run starts.
    pub initial_state: String,
    /// Accepting states, may be empty.
    #[serde(default)]
    pub final_states: Vec<String>,
}

impl Definition {
    /// Creates an empty definition starting in `initial_state`.
    pub fn new(initial_state: impl Into<String>) -> Self {
        Self {
            initial_state: initial_state.into(),
            ..Self::default()
        }
    }

    /// Parses the wire format without validating it.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty printed wire format.
    pub fn to_json_pretty(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets `delta(state, symbol)`, `None` meaning the dead state.
    pub fn set_transition(
        &mut self,
        state: impl Into<String>,
        symbol: impl Into<String>,
        target: Option<&str>,
    ) -> &mut Self {
        self.delta
            .entry(state.into())
            .or_default()
            .insert(symbol.into(), target.map(str::to_string));
        self
    }
}

// MARK: Duplicate keys

/// Collects a JSON object into a map, refusing a key that was already seen.
struct UniqueKeys<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
    type Value = HashMap<String, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object without duplicate keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(de::Error::custom(format_args!("duplicate key '{}'", entry.key())));
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
        }
        Ok(map)
    }
}

struct UniqueRow(Row);

impl<'de> Deserialize<'de> for UniqueRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UniqueKeys(PhantomData)).map(UniqueRow)
    }
}

fn deserialize_delta<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Delta, D::Error> {
    let rows = deserializer.deserialize_map(UniqueKeys::<UniqueRow>(PhantomData))?;
    Ok(rows.into_iter().map(|(state, UniqueRow(row))| (state, row)).collect())
}

/// Builds a [`Definition`] in place, `dead` stands for the dead state.
///
/// ```
/// use quintuple::definition;
///
/// let definition = definition! {
///     alphabet: ["0", "1"],
///     states: ["q0", "q1"],
///     delta: {
///         "q0" => { "0" => "q1", "1" => dead },
///         "q1" => { "0" => "q1", "1" => "q1" },
///     },
///     initial: "q0",
///     finals: ["q1"],
/// };
/// assert_eq!(definition.delta["q0"]["1"], None);
/// ```
#[macro_export]
macro_rules! definition {
    (
        alphabet: [$($symbol:expr),* $(,)?],
        states: [$($state:expr),* $(,)?],
        delta: { $($from:expr => { $($on:expr => $to:tt),* $(,)? }),* $(,)? },
        initial: $initial:expr,
        finals: [$($final:expr),* $(,)?] $(,)?
    ) => {
        {
            let mut definition = $crate::Definition::new($initial);
            $( definition.alphabet.push(::std::string::String::from($symbol)); )*
            $( definition.states.push(::std::string::String::from($state)); )*
            $(
                let mut row = $crate::definition::Row::default();
                $( row.insert(::std::string::String::from($on), $crate::definition!(@target $to)); )*
                definition.delta.insert(::std::string::String::from($from), row);
            )*
            $( definition.final_states.push(::std::string::String::from($final)); )*
            definition
        }
    };
    (@target dead) => { ::std::option::Option::None };
    (@target $to:expr) => { ::std::option::Option::Some(::std::string::String::from($to)) };
}
