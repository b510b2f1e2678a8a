#![warn(missing_docs)]

//! Deterministic finite automata from declarative definitions.
//!
//! A [`Definition`] (usually JSON) is validated against the 5-tuple rules by [`Dfa::new`],
//! which yields an immutable [`Dfa`]. A [`Runner`] walks a `Dfa` one symbol at a time,
//! [`Dfa::accepts`] runs a whole comma delimited word.
//!
//! ```
//! use quintuple::{Dfa, State};
//!
//! let dfa = Dfa::from_json(r#"{
//!     "alphabet": ["0", "1"],
//!     "states": ["q0", "q1", "q2"],
//!     "delta": {
//!         "q0": { "0": "q1", "1": null },
//!         "q1": { "0": "q1", "1": "q2" },
//!         "q2": { "0": "q1", "1": "q2" }
//!     },
//!     "initialState": "q0",
//!     "finalStates": ["q2"]
//! }"#).unwrap();
//!
//! assert!(dfa.accepts("0,1").unwrap());
//! assert!(!dfa.accepts("1,0").unwrap());
//!
//! let mut runner = dfa.runner();
//! assert_eq!(runner.consume("1").unwrap(), State::Dead);
//! assert_eq!(runner.consume("0").unwrap(), State::Dead);
//! ```

pub mod alphabet;
pub mod definition;
pub mod dfa;
pub mod error;
pub mod runner;
pub mod state;
mod validate;

pub use alphabet::{Alphabet, DELIMITER};
pub use definition::Definition;
pub use dfa::Dfa;
pub use error::{AlphabetError, DfaError, ErrorKind, ParseError, SymbolError, WordFault};
pub use runner::Runner;
pub use state::{State, StateId, SymbolId};
