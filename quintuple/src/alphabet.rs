//! The alphabet of a DFA, and the comma delimited word format built on it.

use std::fmt::{self, Display};
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::{AlphabetError, WordFault};
use crate::state::{Indexable, SymbolId};

/// Separates the symbols of a word, and the symbols of an alphabet given as one string.
pub const DELIMITER: char = ',';

/// Token buffer for a split word, words up to this length stay on the stack.
pub type Tokens = SmallVec<[SymbolId; 16]>;

/// An immutable, nonempty set of nonempty symbols.
///
/// Symbols are kept sorted, so a [`SymbolId`] is the rank of its symbol and two alphabets
/// with the same symbols always agree on ids.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<String>,
    index: HashMap<String, SymbolId>,
}

impl Alphabet {
    /// Builds an alphabet from a collection of symbols, duplicates are collapsed.
    pub fn new<I, S>(symbols: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();

        if symbols.iter().any(|symbol| symbol.is_empty()) {
            return Err(AlphabetError::EmptySymbol);
        }
        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if let Some(symbol) = symbols.iter().find(|symbol| symbol.contains(DELIMITER)) {
            return Err(AlphabetError::DelimiterInSymbol(symbol.clone()));
        }

        symbols.sort_unstable();
        symbols.dedup();

        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (symbol.clone(), SymbolId(i as u32)))
            .collect();

        Ok(Self { symbols, index })
    }

    /// Builds an alphabet from a delimited string such as `"a,b,c"`.
    /// Leading, trailing or doubled delimiters imply empty symbols and are refused.
    pub fn parse(symbols: &str) -> Result<Self, AlphabetError> {
        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        Self::new(symbols.split(DELIMITER))
    }

    /// The accepted symbols, in sorted order.
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    /// Number of distinct symbols, never zero.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false, an alphabet has at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True iff `symbol` is a member of this alphabet.
    pub fn is_valid_symbol(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// The dense id of `symbol`, if it is a member.
    pub fn index_of(&self, symbol: &str) -> Option<SymbolId> {
        self.index.get(symbol).copied()
    }

    /// The symbol behind `id`, `None` if the id is out of range for this alphabet.
    pub fn symbol(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id.index()).map(String::as_str)
    }

    /// Like [`Alphabet::symbol`], for ids this alphabet handed out itself.
    pub(crate) fn symbol_of(&self, id: SymbolId) -> &str {
        &self.symbols[id.index()]
    }

    /// True iff `word` splits into member symbols. The empty word is always valid,
    /// any empty token (leading, trailing or embedded) makes the word invalid.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.tokenize(word).is_ok()
    }

    /// Splits `word` on the delimiter and resolves every token, stopping at the first bad one.
    pub fn tokenize(&self, word: &str) -> Result<Tokens, WordFault> {
        let mut tokens = Tokens::new();
        if word.is_empty() {
            return Ok(tokens);
        }

        for (position, token) in word.split(DELIMITER).enumerate() {
            if token.is_empty() {
                return Err(WordFault::EmptyToken { position });
            }
            match self.index_of(token) {
                Some(id) => tokens.push(id),
                None => {
                    return Err(WordFault::UnknownToken {
                        position,
                        token: token.to_string(),
                    });
                }
            }
        }
        Ok(tokens)
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        // both sides are sorted and deduplicated
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.symbols.join(", "))
    }
}

impl Serialize for Alphabet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.symbols())
    }
}

impl<'de> Deserialize<'de> for Alphabet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbols = Vec::<String>::deserialize(deserializer)?;
        Alphabet::new(symbols).map_err(serde::de::Error::custom)
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Alphabet {
        Alphabet::parse("a,b,cde,hello world").unwrap()
    }

    #[test]
    fn test_symbols() {
        let alphabet = sample();
        let symbols: Vec<&str> = alphabet.symbols().collect();
        assert_eq!(symbols, ["a", "b", "cde", "hello world"]);
        assert_eq!(alphabet.len(), 4);
        assert!(!alphabet.is_empty());
    }

    #[test]
    fn test_valid_symbol() {
        let alphabet = sample();
        assert!(alphabet.is_valid_symbol("a"));
        assert!(alphabet.is_valid_symbol("hello world"));
        assert!(!alphabet.is_valid_symbol("hello, world"));
        assert!(!alphabet.is_valid_symbol(""));
    }

    #[test]
    fn test_valid_word() {
        let alphabet = sample();
        assert!(alphabet.is_valid_word(""));
        assert!(alphabet.is_valid_word("a"));
        assert!(alphabet.is_valid_word("hello world"));
        assert!(alphabet.is_valid_word("a,b,cde"));
        assert!(alphabet.is_valid_word("a,a,hello world,a,b"));

        assert!(!alphabet.is_valid_word("q"));
        assert!(!alphabet.is_valid_word("a,q"));
        assert!(!alphabet.is_valid_word("a,cde,hello world,q"));
        assert!(!alphabet.is_valid_word("q,q,q,derp,sc2"));

        assert!(!alphabet.is_valid_word("a,b,,a"));
        assert!(!alphabet.is_valid_word(",a,b,a"));
        assert!(!alphabet.is_valid_word("a,b,a,"));
        assert!(!alphabet.is_valid_word(","));
    }

    #[test]
    fn test_tokenize() {
        let alphabet = Alphabet::parse("0,1").unwrap();
        let tokens = alphabet.tokenize("1,0,1").unwrap();
        let symbols: Vec<&str> = tokens.iter().map(|&id| alphabet.symbol_of(id)).collect();
        assert_eq!(symbols, ["1", "0", "1"]);

        assert!(alphabet.tokenize("").unwrap().is_empty());
        assert_eq!(
            alphabet.tokenize("0,,1"),
            Err(WordFault::EmptyToken { position: 1 })
        );
        assert_eq!(
            alphabet.tokenize("0,2"),
            Err(WordFault::UnknownToken { position: 1, token: "2".into() })
        );
    }

    #[test]
    fn test_empty_alphabet() {
        assert_eq!(Alphabet::parse(""), Err(AlphabetError::Empty));
        assert_eq!(Alphabet::new(Vec::<String>::new()), Err(AlphabetError::Empty));
    }

    #[test]
    fn test_empty_symbols_delimited() {
        assert_eq!(Alphabet::parse("a,b,c,,e"), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::parse("a,b,c,e,"), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::parse(",a,b,c,e"), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::parse(","), Err(AlphabetError::EmptySymbol));
    }

    #[test]
    fn test_empty_symbols_collection() {
        assert_eq!(Alphabet::new(["a", "b", "c", "", "e"]), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::new(["a", "b", "c", "e", ""]), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::new(["", "a", "b", "c", "e"]), Err(AlphabetError::EmptySymbol));
        assert_eq!(Alphabet::new([""]), Err(AlphabetError::EmptySymbol));
    }

    #[test]
    fn test_delimiter_in_symbol() {
        assert_eq!(
            Alphabet::new(["a", "b,c"]),
            Err(AlphabetError::DelimiterInSymbol("b,c".into()))
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let alphabet = Alphabet::new(["b", "a", "b", "a"]).unwrap();
        assert_eq!(alphabet.len(), 2);
        assert_eq!(alphabet, Alphabet::parse("a,b").unwrap());
    }

    #[test]
    fn test_equality() {
        let a1 = Alphabet::parse("a,b,c,d,e").unwrap();
        let a2 = Alphabet::new(["b", "e", "a", "d", "c"]).unwrap();
        assert_eq!(a1, a1);
        assert_eq!(a2, a2);
        assert_eq!(a1, a2);
        assert_eq!(a2, a1);
        assert_ne!(a1, Alphabet::parse("a,b,c,d").unwrap());
    }

    #[test]
    fn test_ids_follow_sorted_order() {
        let alphabet = Alphabet::new(["z", "m", "a"]).unwrap();
        assert_eq!(alphabet.index_of("a"), Some(SymbolId(0)));
        assert_eq!(alphabet.index_of("z"), Some(SymbolId(2)));
        assert_eq!(alphabet.index_of("q"), None);
    }

    #[test]
    fn test_symbol_lookup() {
        let alphabet = Alphabet::parse("b,a").unwrap();
        let a = alphabet.index_of("a").unwrap();
        assert_eq!(alphabet.symbol(a), Some("a"));

        let wider = Alphabet::parse("a,b,c").unwrap();
        let c = wider.index_of("c").unwrap();
        assert_eq!(alphabet.symbol(c), None);
        assert_eq!(Alphabet::parse("a").unwrap().symbol(c), None);
    }

    #[test]
    fn test_display_and_serde() {
        let alphabet: Alphabet = "1,0".parse().unwrap();
        assert_eq!(alphabet.to_string(), "{0, 1}");
        assert_eq!(serde_json::to_string(&alphabet).unwrap(), r#"["0","1"]"#);

        let back: Alphabet = serde_json::from_str(r#"["1","0","1"]"#).unwrap();
        assert_eq!(back, alphabet);
        assert!(serde_json::from_str::<Alphabet>("[]").is_err());
    }
}
