
/*!
Pluggable per-position input costs.
These are separate from the ambiguity charges the search itself accumulates (see
[crate::aligner]); they let callers weight individual input positions, which matters for
compressed representations where one stored symbol stands for many observed ones.
*/

use crate::sequence::Sequence;

/// A pure cost over one input position. Implementations must not keep state between calls.
pub trait CostFunction: std::fmt::Debug + Send + Sync {
    /// Returns the cost charged for the symbol at `position` of `sequence`.
    fn cost(&self, sequence: &dyn Sequence, position: usize) -> usize;
}

/// Charges the same constant at every position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedCost {
    cost: usize
}

impl FixedCost {
    /// Constructor
    pub fn new(cost: usize) -> FixedCost {
        FixedCost {
            cost
        }
    }
}

impl CostFunction for FixedCost {
    fn cost(&self, _sequence: &dyn Sequence, _position: usize) -> usize {
        self.cost
    }
}

/// Scales a constant by the run length the sequence reports at each position, so a symbol that
/// stands for a long observed run weighs more than a singleton. Sequences without run lengths
/// fall back to the constant alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunLengthCost {
    cost_per_symbol: usize
}

impl RunLengthCost {
    /// Constructor
    pub fn new(cost_per_symbol: usize) -> RunLengthCost {
        RunLengthCost {
            cost_per_symbol
        }
    }
}

impl CostFunction for RunLengthCost {
    fn cost(&self, sequence: &dyn Sequence, position: usize) -> usize {
        self.cost_per_symbol * sequence.run_length(position).unwrap_or(1)
    }
}
