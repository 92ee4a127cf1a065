
/*!
Defines the symbol set that aligned outputs are drawn from.
A symbol's index in the set is its identity throughout alignment: constraint masks and
admissibility counts are all ordered the same way as the alphabet.
```rust
use seq_polish::alphabet::Alphabet;
let alphabet = Alphabet::dna();
assert_eq!(alphabet.symbols(), b"ACGT");
assert_eq!(alphabet.index_of(b'G'), Some(2));
assert_eq!(alphabet.index_of(b'N'), None);
```
*/

use rustc_hash::FxHashSet as HashSet;
use simple_error::bail;

/// An ordered set of distinct output symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    /// The symbols, in mask order
    symbols: Vec<u8>
}

impl Alphabet {
    /// Creates a new alphabet from an ordered symbol list and performs sanity checks.
    /// # Arguments
    /// * `symbols` - the ordered symbols, e.g. `b"ACGT".to_vec()`
    /// # Errors
    /// * if the symbol list is empty
    /// * if the symbol list contains a duplicate
    pub fn new(symbols: Vec<u8>) -> Result<Alphabet, Box<dyn std::error::Error>> {
        if symbols.is_empty() {
            bail!("Alphabet requires at least one symbol.");
        }
        let distinct: HashSet<u8> = symbols.iter().copied().collect();
        if distinct.len() != symbols.len() {
            bail!("Alphabet symbols must be distinct.");
        }
        Ok(Alphabet {
            symbols
        })
    }

    /// Returns the standard DNA alphabet, `ACGT`.
    pub fn dna() -> Alphabet {
        Alphabet {
            symbols: b"ACGT".to_vec()
        }
    }

    /// Returns the index of a symbol, or None if the symbol is not in the alphabet.
    /// Linear scan; alphabets are expected to stay small.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    // getters
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
