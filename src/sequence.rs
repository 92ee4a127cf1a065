
/*!
Sequence contracts consumed and produced by the aligner.
Inputs only need a name and raw contents; compressed representations can additionally expose
per-position run lengths, which the run-length cost function picks up.
*/

use simple_error::bail;

/// A named, ordered run of symbols.
/// Contents may contain symbols outside the configured alphabet; those never satisfy a match
/// test during alignment and end up consumed as inserts.
pub trait Sequence {
    /// An identifier carried through to logging and output naming
    fn name(&self) -> &str;
    /// The ordered symbols
    fn contents(&self) -> &[u8];
    /// Per-position expansion weight for compressed representations.
    /// The default covers representations that do not carry weights at all.
    fn run_length(&self, position: usize) -> Option<usize> {
        let _ = position;
        None
    }
}

/// The basic owned sequence: a name and raw contents, nothing else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlainSequence {
    name: String,
    contents: Vec<u8>
}

impl PlainSequence {
    /// Constructor
    pub fn new(name: String, contents: Vec<u8>) -> PlainSequence {
        PlainSequence {
            name,
            contents
        }
    }
}

impl Sequence for PlainSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// A run-length compressed sequence: each stored symbol stands for a run of identical symbols,
/// and the length of that run rides alongside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RleSequence {
    name: String,
    symbols: Vec<u8>,
    run_lengths: Vec<usize>
}

impl RleSequence {
    /// Creates a new run-length compressed sequence and performs sanity checks.
    /// # Arguments
    /// * `name` - identifier for the sequence
    /// * `symbols` - the compressed symbols, one per run
    /// * `run_lengths` - the length of each run, parallel to `symbols`
    /// # Errors
    /// * if the symbol and run-length lists have different lengths
    pub fn new(name: String, symbols: Vec<u8>, run_lengths: Vec<usize>) -> Result<RleSequence, Box<dyn std::error::Error>> {
        if symbols.len() != run_lengths.len() {
            bail!("RleSequence requires one run length per symbol: {} symbols != {} run lengths", symbols.len(), run_lengths.len());
        }
        Ok(RleSequence {
            name,
            symbols,
            run_lengths
        })
    }

    // getters
    pub fn run_lengths(&self) -> &[usize] {
        &self.run_lengths
    }
}

impl Sequence for RleSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn contents(&self) -> &[u8] {
        &self.symbols
    }

    fn run_length(&self, position: usize) -> Option<usize> {
        self.run_lengths.get(position).copied()
    }
}
