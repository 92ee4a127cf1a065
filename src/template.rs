
/*!
Positional admissible-symbol maps.
A template records, for each output position it covers, which alphabet symbols may occupy that
position. Templates are usually built from a byte pattern where a wildcard marks "anything":
```rust
use seq_polish::alphabet::Alphabet;
use seq_polish::template::Template;

let alphabet = Alphabet::dna();
let template = Template::from_pattern("target".to_string(), b"ANGT", b'N', &alphabet).unwrap();
assert_eq!(template.options_at(0), Some(b"A".as_slice())); // fixed
assert_eq!(template.options_at(1), Some(b"ACGT".as_slice())); // wildcard
assert_eq!(template.options_at(4), None); // past the end
```
*/

use simple_error::bail;

use crate::alphabet::Alphabet;

/// A per-position map of admissible symbols.
/// Positions past the template end report `None`, which downstream constraints read as
/// "no opinion"; an explicitly empty set at a covered position forbids every symbol there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    /// Identifier for logging
    name: String,
    /// Admissible symbols per covered position; a full-alphabet entry is unconstrained
    options: Vec<Vec<u8>>
}

impl Template {
    /// Creates a template covering `length` positions, all of them unconstrained.
    /// # Arguments
    /// * `name` - identifier for the template
    /// * `length` - number of covered positions
    /// * `alphabet` - the alphabet admissible sets are drawn from
    pub fn new(name: String, length: usize, alphabet: &Alphabet) -> Template {
        let options = vec![alphabet.symbols().to_vec(); length];
        Template {
            name,
            options
        }
    }

    /// Builds a template from a byte pattern: the wildcard byte leaves a position unconstrained,
    /// any other byte pins the position to exactly that symbol.
    /// # Arguments
    /// * `name` - identifier for the template
    /// * `pattern` - the byte pattern, one byte per covered position
    /// * `wildcard` - the byte marking unconstrained positions
    /// * `alphabet` - the alphabet pinned symbols must come from
    /// # Errors
    /// * if a non-wildcard pattern byte is not in the alphabet
    pub fn from_pattern(name: String, pattern: &[u8], wildcard: u8, alphabet: &Alphabet) -> Result<Template, Box<dyn std::error::Error>> {
        let mut template = Template::new(name, pattern.len(), alphabet);
        for (position, &symbol) in pattern.iter().enumerate() {
            if symbol == wildcard {
                continue;
            }
            if alphabet.index_of(symbol).is_none() {
                bail!("Pattern symbol at position {} is not in the alphabet: {:?}", position, symbol as char);
            }
            template.options[position] = vec![symbol];
        }
        Ok(template)
    }

    /// Returns the admissible symbols at a position, or None when the position is past the
    /// template end.
    pub fn options_at(&self, position: usize) -> Option<&[u8]> {
        self.options.get(position).map(|options| options.as_slice())
    }

    /// Replaces the admissible set at a covered position.
    /// # Arguments
    /// * `position` - the position to overwrite
    /// * `options` - the new admissible symbols; an empty set forbids the position outright
    /// # Errors
    /// * if the position is past the template end
    pub fn set_options(&mut self, position: usize, options: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
        if position >= self.options.len() {
            bail!("Position {} is past the template end, which covers {} positions.", position, self.options.len());
        }
        self.options[position] = options;
        Ok(())
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
