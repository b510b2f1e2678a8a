//! Error taxonomy for alphabets, definitions, transitions and words.

use thiserror::Error;

/// Reasons an alphabet can not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// No symbols at all.
    #[error("empty alphabet is disallowed")]
    Empty,
    /// One of the symbols is the empty string, including the ones implied by stray delimiters.
    #[error("empty symbol is disallowed")]
    EmptySymbol,
    /// The symbol contains the word delimiter and could never appear in a word.
    #[error("symbol '{0}' contains the delimiter")]
    DelimiterInSymbol(String),
}

/// Reasons a single symbol is refused by a transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// The empty string is never a symbol.
    #[error("empty symbol is invalid for transition")]
    Empty,
    /// The symbol is not part of the alphabet.
    #[error("invalid symbol '{0}', not in the alphabet")]
    Unknown(String),
}

/// The first bad token found while splitting a word.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordFault {
    /// An empty token, from a leading, trailing or doubled delimiter.
    #[error("empty symbol at position {position}")]
    EmptyToken {
        /// Zero based token index.
        position: usize,
    },
    /// A token that is not part of the alphabet.
    #[error("invalid symbol '{token}' at position {position}")]
    UnknownToken {
        /// Zero based token index.
        position: usize,
        /// The offending token.
        token: String,
    },
}

/// Everything that can go wrong while building or running a DFA.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DfaError {
    /// The symbol list does not form a valid alphabet.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(#[from] AlphabetError),

    /// A declared state identifier is the empty string.
    #[error("empty state in set of states is disallowed")]
    EmptyState,

    /// The outer keys of delta are not exactly the declared states.
    #[error("delta not defined for exactly all states (missing: {missing:?}, extra: {extra:?})")]
    IncompleteStateCoverage {
        /// Declared states without a delta entry.
        missing: Vec<String>,
        /// Delta entries for undeclared states.
        extra: Vec<String>,
    },

    /// A delta entry is not defined for exactly the alphabet.
    #[error("transitions of '{state}' not defined for exactly all symbols in alphabet (missing: {missing:?}, extra: {extra:?})")]
    IncompleteSymbolCoverage {
        /// The state whose row is wrong.
        state: String,
        /// Alphabet symbols without a transition.
        missing: Vec<String>,
        /// Transitions on symbols outside the alphabet.
        extra: Vec<String>,
    },

    /// A transition leads to a state that was never declared.
    #[error("invalid target state '{target}' in delta('{state}', '{symbol}')")]
    InvalidTargetState {
        /// Source state of the transition.
        state: String,
        /// Symbol of the transition.
        symbol: String,
        /// The undeclared target.
        target: String,
    },

    /// The initial state was never declared.
    #[error("invalid initial state '{0}'")]
    InvalidInitialState(String),

    /// A final state was never declared.
    #[error("invalid final state '{0}'")]
    InvalidFinalState(String),

    /// A transition call got an empty or unknown symbol.
    #[error("{0}")]
    InvalidSymbol(#[from] SymbolError),

    /// A transition call started from an undeclared state.
    #[error("cannot transition from invalid starting state '{0}'")]
    InvalidStartState(String),

    /// A word contains an empty or unknown token.
    #[error("invalid word '{word}': {fault}")]
    InvalidWord {
        /// The whole word as given.
        word: String,
        /// The first bad token.
        fault: WordFault,
    },
}

/// Payload free name of a [`DfaError`], one per row of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DfaError::InvalidAlphabet`].
    InvalidAlphabet,
    /// See [`DfaError::EmptyState`].
    EmptyState,
    /// See [`DfaError::IncompleteStateCoverage`].
    IncompleteStateCoverage,
    /// See [`DfaError::IncompleteSymbolCoverage`].
    IncompleteSymbolCoverage,
    /// See [`DfaError::InvalidTargetState`].
    InvalidTargetState,
    /// See [`DfaError::InvalidInitialState`].
    InvalidInitialState,
    /// See [`DfaError::InvalidFinalState`].
    InvalidFinalState,
    /// See [`DfaError::InvalidSymbol`].
    InvalidSymbol,
    /// See [`DfaError::InvalidStartState`].
    InvalidStartState,
    /// See [`DfaError::InvalidWord`].
    InvalidWord,
}

impl ErrorKind {
    /// The taxonomy name, as printed by tooling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAlphabet => "InvalidAlphabet",
            ErrorKind::EmptyState => "EmptyState",
            ErrorKind::IncompleteStateCoverage => "IncompleteStateCoverage",
            ErrorKind::IncompleteSymbolCoverage => "IncompleteSymbolCoverage",
            ErrorKind::InvalidTargetState => "InvalidTargetState",
            ErrorKind::InvalidInitialState => "InvalidInitialState",
            ErrorKind::InvalidFinalState => "InvalidFinalState",
            ErrorKind::InvalidSymbol => "InvalidSymbol",
            ErrorKind::InvalidStartState => "InvalidStartState",
            ErrorKind::InvalidWord => "InvalidWord",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DfaError {
    /// Which taxonomy row this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DfaError::InvalidAlphabet(_) => ErrorKind::InvalidAlphabet,
            DfaError::EmptyState => ErrorKind::EmptyState,
            DfaError::IncompleteStateCoverage { .. } => ErrorKind::IncompleteStateCoverage,
            DfaError::IncompleteSymbolCoverage { .. } => ErrorKind::IncompleteSymbolCoverage,
            DfaError::InvalidTargetState { .. } => ErrorKind::InvalidTargetState,
            DfaError::InvalidInitialState(_) => ErrorKind::InvalidInitialState,
            DfaError::InvalidFinalState(_) => ErrorKind::InvalidFinalState,
            DfaError::InvalidSymbol(_) => ErrorKind::InvalidSymbol,
            DfaError::InvalidStartState(_) => ErrorKind::InvalidStartState,
            DfaError::InvalidWord { .. } => ErrorKind::InvalidWord,
        }
    }
}

/// Failure to turn JSON text into a DFA.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not JSON, or does not match the definition schema.
    #[error("malformed definition: {0}")]
    Json(#[from] serde_json::Error),
    /// The definition parsed but breaks a DFA rule.
    #[error(transparent)]
    Invalid(#[from] DfaError),
}

impl ParseError {
    /// The validation kind, if the definition got as far as validation.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ParseError::Json(_) => None,
            ParseError::Invalid(e) => Some(e.kind()),
        }
    }
}
