
/*!
This module provides access to the ConstraintAligner, which aligns one noisy input sequence at a
time to the cheapest output satisfying a set of hard positional constraints.

The search walks the input left to right, carrying a frontier of partial outputs. Each input
symbol either extends an output (a match, charged by how ambiguous the position was), gets
consumed in place (an insert), or bridges over a bounded run of skipped output positions (a
deletion chain). The frontier keeps the cheapest survivor per output length and prunes against a
running admission threshold, then a traceback over the cheapest terminal rebuilds the output.

# Example usage
```rust
use seq_polish::aligner::ConstraintAligner;
use seq_polish::alphabet::Alphabet;
use seq_polish::constraint::TemplateConstraint;
use seq_polish::polish_config::PolishConfigBuilder;
use seq_polish::sequence::PlainSequence;
use seq_polish::template::Template;

let alphabet = Alphabet::dna();
let template = Template::from_pattern("target".to_string(), b"ACGT", b'N', &alphabet).unwrap();

// cheap deletions, expensive insertions
let config = PolishConfigBuilder::default()
    .insert_cost(3)
    .delete_cost(1)
    .build()
    .unwrap();
let mut aligner = ConstraintAligner::with_config(alphabet.clone(), config).unwrap();
aligner.add_constraint(Box::new(TemplateConstraint::new(template, alphabet)));

// the read dropped the 'G'; the template pins it back
let read = PlainSequence::new("read_1".to_string(), b"ACT".to_vec());
let alignment = aligner.align(&read);
assert_eq!(alignment.name(), "read_1_aligned");
assert_eq!(alignment.contents(), b"ACGT");
assert_eq!(alignment.cost(), 5);
```
*/

use itertools::Itertools;
use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::constraint::Constraint;
use crate::polish_config::PolishConfig;
use crate::sequence::Sequence;

/// Fixed bias added to both configured indel costs, keeping matches comparatively cheap even
/// when a position admits the whole alphabet
const INDEL_COST_BIAS: usize = 4;
/// Initial allocation for freshly created scratch buffers
const DEFAULT_SCRATCH_CAPACITY: usize = 300;

/// The outcome of aligning one input: the constrained output plus the total cost paid for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    /// The input name with the aligned suffix appended
    name: String,
    /// The constrained output symbols
    contents: Vec<u8>,
    /// Total cost of the winning path
    cost: usize
}

impl Alignment {
    /// Constructor
    pub fn new(name: String, contents: Vec<u8>, cost: usize) -> Alignment {
        Alignment {
            name,
            contents,
            cost
        }
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn cost(&self) -> usize {
        self.cost
    }
}

impl Sequence for Alignment {
    fn name(&self) -> &str {
        &self.name
    }

    fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// Core utility that aligns noisy inputs to the best output satisfying a constraint set.
#[derive(Debug)]
pub struct ConstraintAligner {
    /// The alphabet output symbols are drawn from
    alphabet: Alphabet,
    /// Constraints narrowing each output position, applied in insertion order
    constraints: Vec<Box<dyn Constraint>>,
    /// The config for this aligner
    config: PolishConfig,
    /// Configured insert cost with the fixed bias applied
    insert_cost: usize,
    /// Configured delete cost with the fixed bias applied
    delete_cost: usize
}

impl Default for ConstraintAligner {
    fn default() -> Self {
        let config = PolishConfig::default();
        let insert_cost = config.insert_cost + INDEL_COST_BIAS;
        let delete_cost = config.delete_cost + INDEL_COST_BIAS;
        Self {
            alphabet: Alphabet::dna(),
            constraints: vec![],
            config,
            insert_cost,
            delete_cost
        }
    }
}

impl ConstraintAligner {
    /// Creates a new instance of ConstraintAligner with a given config.
    /// # Arguments
    /// * `alphabet` - the output symbol set
    /// * `config` - tunable parameters for this aligner
    /// # Errors
    /// * None so far
    pub fn with_config(alphabet: Alphabet, config: PolishConfig) -> Result<ConstraintAligner, Box<dyn std::error::Error>> {
        let insert_cost = config.insert_cost + INDEL_COST_BIAS;
        let delete_cost = config.delete_cost + INDEL_COST_BIAS;
        Ok(ConstraintAligner {
            alphabet,
            constraints: vec![],
            config,
            insert_cost,
            delete_cost
        })
    }

    /// Adds a constraint to the end of the application order.
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    /// Aligns one input with fresh scratch space.
    /// Callers aligning many sequences should prefer [ConstraintAligner::align_with_scratch].
    pub fn align(&self, sequence: &dyn Sequence) -> Alignment {
        let mut scratch = AlignScratch::with_capacity(DEFAULT_SCRATCH_CAPACITY);
        self.align_with_scratch(sequence, &mut scratch)
    }

    /// Aligns one input, reusing previously allocated scratch buffers.
    /// # Arguments
    /// * `sequence` - the input to align
    /// * `scratch` - search buffers, cleared here before use
    pub fn align_with_scratch(&self, sequence: &dyn Sequence, scratch: &mut AlignScratch) -> Alignment {
        let contents = sequence.contents();
        scratch.reset(self.alphabet.len());
        scratch.frontier.push(None);

        // the worst admissible path consumes the entire input without emitting anything
        let mut threshold_cost = contents.len() * self.insert_cost;
        let mut peak_frontier = scratch.frontier.len();

        for (input_index, &symbol) in contents.iter().enumerate() {
            // symbols outside the alphabet never satisfy a match test
            let alpha_index = self.alphabet.index_of(symbol);
            let remaining = contents.len() - input_index - 1;
            scratch.candidates.clear();

            for frontier_index in 0..scratch.frontier.len() {
                let entry = scratch.frontier[frontier_index];
                let (prev_cost, prev_symbol, target) = match entry {
                    Some(state_index) => {
                        let state = scratch.arena[state_index];
                        (state.cost, state.output, state.extent)
                    },
                    // the root entry: nothing consumed, nothing emitted
                    None => (0, None, 0)
                };

                // insert: consume the symbol without advancing, re-emitting what the path
                // last emitted so the slot assignment survives the traceback
                let insert_index = push_state(&mut scratch.arena, AlignState {
                    output: prev_symbol,
                    cost: prev_cost + self.insert_cost,
                    extent: target,
                    prev: entry,
                    ancestor: None
                });
                scratch.candidates.push(insert_index);

                // match: emit the symbol at the next slot if the constraints admit it, charged
                // one unit per admissible alternative beyond the symbol itself
                self.fill_options(&mut scratch.options, target, prev_symbol);
                if let Some(alpha_index) = alpha_index {
                    if scratch.options[alpha_index] {
                        let option_cost = scratch.options.iter().filter(|&&admissible| admissible).count();
                        let cost = prev_cost + option_cost - 1;
                        let match_index = push_state(&mut scratch.arena, AlignState {
                            output: Some(symbol),
                            cost,
                            extent: target + 1,
                            prev: entry,
                            ancestor: None
                        });
                        scratch.candidates.push(match_index);

                        // direct matches are the only place the admission threshold tightens
                        let bound = cost + self.insert_cost * remaining;
                        if bound < threshold_cost {
                            threshold_cost = bound;
                        }
                    }
                }

                // deletion chain: bridge up to delete_window skipped slots, testing after each
                // hop whether the symbol matches there; only the post-hop matches become
                // candidates, the hops themselves live solely as traceback links
                let mut bridge_symbol = self.resolve_options(&scratch.options);
                let mut chain_prev = entry;
                let mut chain_cost = prev_cost;
                for hop in 1..=self.config.delete_window {
                    let hop_extent = target + hop;
                    let hop_index = push_state(&mut scratch.arena, AlignState {
                        output: bridge_symbol,
                        cost: chain_cost + self.delete_cost,
                        extent: hop_extent,
                        prev: chain_prev,
                        ancestor: entry
                    });
                    chain_prev = Some(hop_index);
                    chain_cost = scratch.arena[hop_index].cost;

                    self.fill_options(&mut scratch.options, hop_extent, bridge_symbol);
                    if let Some(alpha_index) = alpha_index {
                        if scratch.options[alpha_index] {
                            let option_cost = scratch.options.iter().filter(|&&admissible| admissible).count();
                            let match_index = push_state(&mut scratch.arena, AlignState {
                                output: Some(symbol),
                                cost: chain_cost + option_cost - 1,
                                extent: hop_extent + 1,
                                prev: chain_prev,
                                ancestor: entry
                            });
                            scratch.candidates.push(match_index);
                        }
                    }

                    // past the first hop there is no single known symbol for the bridged slot
                    bridge_symbol = Some(self.config.ambiguous_symbol);
                }
            }

            // keep the cheapest candidate per extent (stable, so the earliest generated wins
            // ties), then drop everything above the admission threshold
            let arena = &scratch.arena;
            scratch.candidates.sort_by_key(|&index| (arena[index].extent, arena[index].cost));
            scratch.candidates.dedup_by_key(|index| arena[*index].extent);
            scratch.candidates.retain(|&index| arena[index].cost <= threshold_cost);

            scratch.frontier.clear();
            for &index in scratch.candidates.iter() {
                scratch.frontier.push(Some(index));
            }

            peak_frontier = peak_frontier.max(scratch.frontier.len());
            trace!("symbol {input_index} ({:?}): frontier {}, threshold {threshold_cost}", symbol as char, scratch.frontier.len());
        }

        debug!("{}: {} states explored, peak frontier {peak_frontier}, final threshold {threshold_cost}", sequence.name(), scratch.arena.len());
        self.trace_back(sequence.name(), scratch)
    }

    /// Resets the mask to all-admissible, then applies every constraint in order.
    fn fill_options(&self, options: &mut [bool], position: usize, prev: Option<u8>) {
        options.fill(true);
        for constraint in self.constraints.iter() {
            constraint.filter_options(position, prev, options);
        }
    }

    /// The symbol a deletion hop assigns to the slot it skips: the uniquely admissible symbol
    /// when the mask narrowed to one, the ambiguous placeholder when several remain, nothing
    /// when none do.
    fn resolve_options(&self, options: &[bool]) -> Option<u8> {
        let mut resolved = None;
        for (index, &admissible) in options.iter().enumerate() {
            if admissible {
                resolved = if resolved.is_none() {
                    Some(self.alphabet.symbols()[index])
                } else {
                    Some(self.config.ambiguous_symbol)
                };
            }
        }
        resolved
    }

    /// Rebuilds the cheapest surviving path into a named output.
    /// Ties go to the earliest frontier entry, which the frontier ordering makes the shortest
    /// output. Unresolved slots keep the ambiguous placeholder.
    fn trace_back(&self, input_name: &str, scratch: &AlignScratch) -> Alignment {
        let name = format!("{input_name}{}", self.config.aligned_suffix);

        // root entries carry no state to trace; an all-root frontier means an empty input (or
        // one that never matched), which aligns to an empty output
        let live: Vec<usize> = scratch.frontier.iter().copied().flatten().collect();
        let best_index = match live.iter().position_min_by_key(|&&index| scratch.arena[index].cost) {
            Some(position) => live[position],
            None => return Alignment::new(name, vec![], 0)
        };

        let terminal = scratch.arena[best_index];
        let mut contents = vec![self.config.ambiguous_symbol; terminal.extent];
        let mut cursor = Some(best_index);
        while let Some(state_index) = cursor {
            let state = scratch.arena[state_index];
            if let Some(emitted) = state.output {
                contents[state.extent - 1] = emitted;
            }
            cursor = state.prev;
        }

        Alignment::new(name, contents, terminal.cost)
    }

    // getters
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> &PolishConfig {
        &self.config
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }
}

/// Appends a state to the arena, handing back its index for frontier and traceback links.
fn push_state(arena: &mut Vec<AlignState>, state: AlignState) -> usize {
    arena.push(state);
    arena.len() - 1
}

/// Reusable per-sequence search buffers.
/// Workers hold one of these across many alignments and let [ConstraintAligner::align_with_scratch]
/// clear it, keeping the allocations.
#[derive(Debug, Default)]
pub struct AlignScratch {
    /// Every state created while aligning the current input; never shrinks mid-sequence, so
    /// indices into it stay valid for traceback
    arena: Vec<AlignState>,
    /// Surviving paths after the latest input symbol; None marks the root entry
    frontier: Vec<Option<usize>>,
    /// Candidate states generated for the current input symbol
    candidates: Vec<usize>,
    /// Admissibility mask, one entry per alphabet symbol
    options: Vec<bool>
}

impl AlignScratch {
    /// Creates scratch space with pre-reserved state capacity.
    pub fn with_capacity(capacity: usize) -> AlignScratch {
        AlignScratch {
            arena: Vec::with_capacity(capacity),
            frontier: Vec::with_capacity(capacity),
            candidates: Vec::with_capacity(capacity),
            options: vec![]
        }
    }

    /// Clears all buffers while keeping their allocations.
    fn reset(&mut self, alphabet_len: usize) {
        self.arena.clear();
        self.frontier.clear();
        self.candidates.clear();
        self.options.clear();
        self.options.resize(alphabet_len, true);
    }
}

/// One node in the search, linked backwards for traceback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AlignState {
    /// Symbol assigned to output slot `extent - 1`, or None when this step assigned nothing
    output: Option<u8>,
    /// Cumulative cost of the path ending here
    cost: usize,
    /// Output slots consumed so far; 0 means the path has emitted nothing yet
    extent: usize,
    /// Arena index of the predecessor state; None for paths rooted at the start
    prev: Option<usize>,
    /// The state a deletion chain was expanded from, carried by every state built during that
    /// expansion. Nothing reads it yet; a constraint needing to see further back than `prev`
    /// through a chain of hops would.
    ancestor: Option<usize>
}
