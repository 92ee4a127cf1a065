
/*!
Admissibility constraints applied at every output position during alignment.
Each constraint clears entries in a shared boolean mask (one entry per alphabet symbol, in
alphabet order); applying several in sequence intersects them, since none may re-admit a
symbol another one cleared.
```rust
use seq_polish::alphabet::Alphabet;
use seq_polish::constraint::{Constraint, NoHomopolymerConstraint};

let alphabet = Alphabet::dna();
let constraint = NoHomopolymerConstraint::new(alphabet.clone());

let mut options = vec![true; alphabet.len()];
constraint.filter_options(3, Some(b'C'), &mut options);
assert_eq!(options, vec![true, false, true, true]); // no C after a C
```
*/

use crate::alphabet::Alphabet;
use crate::template::Template;

/// A rule narrowing which symbols may occupy an output position.
/// Implementations only ever clear mask entries, never set them.
pub trait Constraint: std::fmt::Debug + Send + Sync {
    /// Clears mask entries for symbols that may not occupy `position`.
    /// # Arguments
    /// * `position` - the output position under consideration
    /// * `prev` - the symbol occupying `position - 1` on the candidate path, or None when the
    ///   path has emitted nothing there
    /// * `options` - the admissibility mask, one entry per alphabet symbol
    fn filter_options(&self, position: usize, prev: Option<u8>, options: &mut [bool]);
}

/// Narrows each output position to the symbols its template admits.
/// Positions past the template end are left untouched; pair with a [MaxLengthConstraint] when
/// the output must not outgrow the template.
#[derive(Clone, Debug)]
pub struct TemplateConstraint {
    template: Template,
    alphabet: Alphabet
}

impl TemplateConstraint {
    /// Constructor
    pub fn new(template: Template, alphabet: Alphabet) -> TemplateConstraint {
        TemplateConstraint {
            template,
            alphabet
        }
    }
}

impl Constraint for TemplateConstraint {
    fn filter_options(&self, position: usize, _prev: Option<u8>, options: &mut [bool]) {
        let allowed = match self.template.options_at(position) {
            Some(allowed) => allowed,
            // past the template end, no opinion
            None => return
        };
        if allowed.len() == self.alphabet.len() {
            // the full alphabet, nothing to clear
            return;
        }
        for (index, &symbol) in self.alphabet.symbols().iter().enumerate() {
            options[index] = options[index] && allowed.contains(&symbol);
        }
    }
}

/// Forbids an output symbol from repeating the symbol immediately before it.
/// Useful for alphabets where runs of identical symbols are encoded out-of-band and a literal
/// repeat is always an input artifact.
#[derive(Clone, Debug)]
pub struct NoHomopolymerConstraint {
    alphabet: Alphabet
}

impl NoHomopolymerConstraint {
    /// Constructor
    pub fn new(alphabet: Alphabet) -> NoHomopolymerConstraint {
        NoHomopolymerConstraint {
            alphabet
        }
    }
}

impl Constraint for NoHomopolymerConstraint {
    fn filter_options(&self, _position: usize, prev: Option<u8>, options: &mut [bool]) {
        let prev = match prev {
            Some(prev) => prev,
            // nothing emitted yet, anything may start the output
            None => return
        };
        if let Some(index) = self.alphabet.index_of(prev) {
            options[index] = false;
        }
    }
}

/// Hard-caps the output length by marking every symbol inadmissible once the position passes
/// the maximum. Positions are zero-based, so outputs stay within `max_position + 1` symbols.
#[derive(Clone, Copy, Debug)]
pub struct MaxLengthConstraint {
    max_position: usize
}

impl MaxLengthConstraint {
    /// Constructor
    pub fn new(max_position: usize) -> MaxLengthConstraint {
        MaxLengthConstraint {
            max_position
        }
    }
}

impl Constraint for MaxLengthConstraint {
    fn filter_options(&self, position: usize, _prev: Option<u8>, options: &mut [bool]) {
        if position > self.max_position {
            options.fill(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_mask(alphabet: &Alphabet) -> Vec<bool> {
        vec![true; alphabet.len()]
    }

    #[test]
    fn test_template_constraint() {
        let alphabet = Alphabet::dna();
        let template = Template::from_pattern("target".to_string(), b"ANG", b'N', &alphabet).unwrap();
        let constraint = TemplateConstraint::new(template, alphabet.clone());

        let mut options = open_mask(&alphabet);
        constraint.filter_options(0, None, &mut options);
        assert_eq!(options, vec![true, false, false, false]);

        // wildcard position, untouched
        let mut options = open_mask(&alphabet);
        constraint.filter_options(1, None, &mut options);
        assert_eq!(options, vec![true, true, true, true]);

        let mut options = open_mask(&alphabet);
        constraint.filter_options(2, None, &mut options);
        assert_eq!(options, vec![false, false, true, false]);

        // past the template end, untouched
        let mut options = open_mask(&alphabet);
        constraint.filter_options(3, None, &mut options);
        assert_eq!(options, vec![true, true, true, true]);
    }

    #[test]
    fn test_template_constraint_empty_set() {
        let alphabet = Alphabet::dna();
        let mut template = Template::new("closed".to_string(), 2, &alphabet);
        template.set_options(1, vec![]).unwrap();
        let constraint = TemplateConstraint::new(template, alphabet.clone());

        let mut options = open_mask(&alphabet);
        constraint.filter_options(1, None, &mut options);
        assert_eq!(options, vec![false, false, false, false]);
    }

    #[test]
    fn test_template_constraint_narrows_only() {
        let alphabet = Alphabet::dna();
        let template = Template::from_pattern("target".to_string(), b"A", b'N', &alphabet).unwrap();
        let constraint = TemplateConstraint::new(template, alphabet.clone());

        // 'A' is admissible by the template but was already cleared; it must stay cleared
        let mut options = vec![false, true, true, true];
        constraint.filter_options(0, None, &mut options);
        assert_eq!(options, vec![false, false, false, false]);
    }

    #[test]
    fn test_no_homopolymer_constraint() {
        let alphabet = Alphabet::dna();
        let constraint = NoHomopolymerConstraint::new(alphabet.clone());

        let mut options = open_mask(&alphabet);
        constraint.filter_options(0, None, &mut options);
        assert_eq!(options, vec![true, true, true, true]);

        let mut options = open_mask(&alphabet);
        constraint.filter_options(5, Some(b'G'), &mut options);
        assert_eq!(options, vec![true, true, false, true]);

        // a preceding symbol outside the alphabet clears nothing
        let mut options = open_mask(&alphabet);
        constraint.filter_options(5, Some(b'N'), &mut options);
        assert_eq!(options, vec![true, true, true, true]);
    }

    #[test]
    fn test_max_length_constraint() {
        let alphabet = Alphabet::dna();
        let constraint = MaxLengthConstraint::new(2);

        let mut options = open_mask(&alphabet);
        constraint.filter_options(2, None, &mut options);
        assert_eq!(options, vec![true, true, true, true]);

        let mut options = open_mask(&alphabet);
        constraint.filter_options(3, None, &mut options);
        assert_eq!(options, vec![false, false, false, false]);
    }

    #[test]
    fn test_sequential_application_intersects() {
        let alphabet = Alphabet::dna();
        let template = Template::from_pattern("target".to_string(), b"NC", b'N', &alphabet).unwrap();
        let constraints: Vec<Box<dyn Constraint>> = vec![
            Box::new(TemplateConstraint::new(template, alphabet.clone())),
            Box::new(NoHomopolymerConstraint::new(alphabet.clone())),
            Box::new(MaxLengthConstraint::new(10))
        ];

        // the template pins position 1 to C, but the path just emitted C
        let mut options = open_mask(&alphabet);
        for constraint in constraints.iter() {
            constraint.filter_options(1, Some(b'C'), &mut options);
        }
        assert_eq!(options, vec![false, false, false, false]);
    }

    #[test]
    fn test_filters_never_readmit() {
        let alphabet = Alphabet::dna();
        let template = Template::from_pattern("target".to_string(), b"ANGN", b'N', &alphabet).unwrap();
        let constraints: Vec<Box<dyn Constraint>> = vec![
            Box::new(TemplateConstraint::new(template, alphabet.clone())),
            Box::new(NoHomopolymerConstraint::new(alphabet.clone())),
            Box::new(MaxLengthConstraint::new(3))
        ];

        let prevs = [None, Some(b'A'), Some(b'C'), Some(b'G'), Some(b'T'), Some(b'N')];
        for position in 0..6 {
            for &prev in prevs.iter() {
                let mut options = open_mask(&alphabet);
                for constraint in constraints.iter() {
                    let before = options.clone();
                    constraint.filter_options(position, prev, &mut options);
                    for index in 0..options.len() {
                        // anything cleared earlier must still be cleared
                        assert!(before[index] || !options[index]);
                    }
                }
            }
        }
    }
}
