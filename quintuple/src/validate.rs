//! The checks a [`Definition`](crate::Definition) must pass, one function per rule.
//! [`Dfa::new`](crate::Dfa::new) runs them in the order below and stops at the first failure.

use hashbrown::{HashMap, HashSet};

use crate::alphabet::Alphabet;
use crate::definition::Delta;
use crate::error::DfaError;
use crate::state::{StateId, Target};

/// Declared states, deduplicated, in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct StateTable {
    pub(crate) names: Vec<String>,
    pub(crate) index: HashMap<String, StateId>,
}

impl StateTable {
    pub(crate) fn get(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort_unstable();
    names
}

/// 1. No declared state may be the empty string.
pub(crate) fn check_states(states: &[String]) -> Result<StateTable, DfaError> {
    if states.iter().any(|state| state.is_empty()) {
        return Err(DfaError::EmptyState);
    }

    let mut table = StateTable {
        names: Vec::with_capacity(states.len()),
        index: HashMap::with_capacity(states.len()),
    };
    for state in states {
        if !table.index.contains_key(state.as_str()) {
            table.index.insert(state.clone(), StateId(table.names.len() as u32));
            table.names.push(state.clone());
        }
    }
    Ok(table)
}

/// 2. The symbol list must form an alphabet.
pub(crate) fn check_alphabet(symbols: &[String]) -> Result<Alphabet, DfaError> {
    Ok(Alphabet::new(symbols.iter().cloned())?)
}

/// 3. Delta is keyed by exactly the declared states.
pub(crate) fn check_state_coverage(states: &StateTable, delta: &Delta) -> Result<(), DfaError> {
    let missing: Vec<String> = states
        .names
        .iter()
        .filter(|state| !delta.contains_key(state.as_str()))
        .cloned()
        .collect();
    let extra: Vec<String> = delta
        .keys()
        .filter(|state| !states.contains(state))
        .cloned()
        .collect();

    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(DfaError::IncompleteStateCoverage {
            missing: sorted(missing),
            extra: sorted(extra),
        })
    }
}

/// 4. Every row of delta is keyed by exactly the alphabet.
pub(crate) fn check_symbol_coverage(
    states: &StateTable,
    alphabet: &Alphabet,
    delta: &Delta,
) -> Result<(), DfaError> {
    for state in &states.names {
        let row = delta.get(state.as_str());
        let missing: Vec<String> = alphabet
            .symbols()
            .filter(|symbol| !row.is_some_and(|row| row.contains_key(*symbol)))
            .map(str::to_string)
            .collect();
        let extra: Vec<String> = row
            .into_iter()
            .flat_map(|row| row.keys())
            .filter(|symbol| !alphabet.is_valid_symbol(symbol))
            .cloned()
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            return Err(DfaError::IncompleteSymbolCoverage {
                state: state.clone(),
                missing,
                extra: sorted(extra),
            });
        }
    }
    Ok(())
}

/// 5. Every non dead target is a declared state. Produces the dense table,
/// rows in declaration order and columns in alphabet order.
pub(crate) fn check_targets(
    states: &StateTable,
    alphabet: &Alphabet,
    delta: &Delta,
) -> Result<Vec<Target>, DfaError> {
    let mut table = Vec::with_capacity(states.names.len() * alphabet.len());

    for state in &states.names {
        for symbol in alphabet.symbols() {
            let cell = delta
                .get(state.as_str())
                .and_then(|row| row.get(symbol))
                .ok_or_else(|| DfaError::IncompleteSymbolCoverage {
                    state: state.clone(),
                    missing: vec![symbol.to_string()],
                    extra: Vec::new(),
                })?;

            let target = match cell {
                None => Target::Dead,
                Some(target) => states.get(target).map(Target::To).ok_or_else(|| {
                    DfaError::InvalidTargetState {
                        state: state.clone(),
                        symbol: symbol.to_string(),
                        target: target.clone(),
                    }
                })?,
            };
            table.push(target);
        }
    }
    Ok(table)
}

/// 6. The initial state is declared.
pub(crate) fn check_initial_state(states: &StateTable, initial: &str) -> Result<StateId, DfaError> {
    states
        .get(initial)
        .ok_or_else(|| DfaError::InvalidInitialState(initial.to_string()))
}

/// 7. Every final state is declared. Returns one accept flag per state.
pub(crate) fn check_final_states(
    states: &StateTable,
    finals: &[String],
) -> Result<Vec<bool>, DfaError> {
    let mut accepting = vec![false; states.names.len()];
    let mut seen = HashSet::with_capacity(finals.len());

    for name in finals {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let id = states
            .get(name)
            .ok_or_else(|| DfaError::InvalidFinalState(name.clone()))?;
        accepting[id.0 as usize] = true;
    }
    Ok(accepting)
}
