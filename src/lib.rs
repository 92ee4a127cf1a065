/*!
# seq_polish
This library cleans noisy symbol sequences (e.g., DNA reads) by aligning each one to the cheapest output satisfying a set of hard positional constraints.

Key benefits:
* Pluggable constraints: partial templates, homopolymer suppression, output length caps, or anything implementing the constraint trait
* Matches are charged by how ambiguous their position is, so fully pinned positions align for free
* Bounded deletion bridging recovers symbols the input dropped
* Reusable scratch buffers and a worker-pool adapter for high-throughput streams

Performance notes:
* Heavily constrained inputs prune aggressively and explore few states
* Unconstrained stretches branch more; the admission threshold keeps the frontier bounded

# Example usage
```rust
use seq_polish::aligner::ConstraintAligner;
use seq_polish::constraint::{MaxLengthConstraint, NoHomopolymerConstraint, TemplateConstraint};
use seq_polish::sequence::PlainSequence;
use seq_polish::template::Template;

// defaults to the DNA alphabet
let mut aligner: ConstraintAligner = Default::default();
let alphabet = aligner.alphabet().clone();

// position 2 must be 'A', repeats are forbidden, output caps at 11 symbols
let template = Template::from_pattern("target".to_string(), b"NNAN", b'N', &alphabet).unwrap();
aligner.add_constraint(Box::new(TemplateConstraint::new(template, alphabet.clone())));
aligner.add_constraint(Box::new(NoHomopolymerConstraint::new(alphabet.clone())));
aligner.add_constraint(Box::new(MaxLengthConstraint::new(10)));

// the homopolymer run cannot survive alignment
let read = PlainSequence::new("read_1".to_string(), b"AAAT".to_vec());
let alignment = aligner.align(&read);
assert_eq!(alignment.name(), "read_1_aligned");
assert_eq!(alignment.contents(), b"AT");
assert_eq!(alignment.cost(), 15);
```
*/

/// Worker-pool adapter for streaming sequences through an aligner
pub mod align_pool;
/// Main functionality for the constrained alignment component
pub mod aligner;
/// The symbol set outputs are drawn from
pub mod alphabet;
/// Admissibility constraints applied at each output position
pub mod constraint;
/// Pluggable per-position input cost functions
pub mod cost;
/// Utility for generating examples
pub mod example_gen;
/// Configuration for ConstraintAligner
pub mod polish_config;
/// Sequence contracts consumed and produced by the aligner
pub mod sequence;
/// Positional admissible-symbol templates
pub mod template;
