
/*!
Worker-pool adapter for streaming many sequences through one aligner.
Workers pull whole sequences from a bounded input channel, align them with a scratch buffer they
keep across items, and push results to a bounded output channel. Results arrive in completion
order, not submission order; callers that need pairing should key on the output name.

# Example usage
```rust
use std::sync::Arc;
use seq_polish::align_pool::AlignerPool;
use seq_polish::aligner::ConstraintAligner;
use seq_polish::sequence::PlainSequence;

let aligner = Arc::new(ConstraintAligner::default());
let pool = AlignerPool::spawn(aligner, 2, 4).unwrap();

// feed from a separate thread so the bounded queue can apply backpressure
let sender = pool.sender();
std::thread::spawn(move || {
    for i in 0..8 {
        let read = PlainSequence::new(format!("read_{i}"), b"ACGT".to_vec());
        sender.send(Box::new(read)).unwrap();
    }
});

let mut results = vec![];
for _ in 0..8 {
    results.push(pool.results().recv().unwrap());
}
pool.join().unwrap();
assert_eq!(results.len(), 8);
```
*/

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;
use simple_error::bail;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::aligner::{AlignScratch, Alignment, ConstraintAligner};
use crate::sequence::Sequence;

/// Boxed sequence type the pool's input channel carries
pub type PoolSequence = Box<dyn Sequence + Send>;

/// A fixed set of worker threads aligning sequences from a shared bounded queue.
#[derive(Debug)]
pub struct AlignerPool {
    /// The pool's own handle on the input channel; dropped by [AlignerPool::join] so workers
    /// can drain and exit
    input_tx: Sender<PoolSequence>,
    /// Completed alignments, in completion order
    output_rx: Receiver<Alignment>,
    /// One handle per spawned worker
    workers: Vec<JoinHandle<()>>
}

impl AlignerPool {
    /// Spawns the worker threads and wires up the channels.
    /// # Arguments
    /// * `aligner` - the shared aligner; read-only across workers
    /// * `num_workers` - worker thread count
    /// * `queue_capacity` - bound on both channels; sends block when a channel is full
    /// # Errors
    /// * if `num_workers` is zero
    pub fn spawn(aligner: Arc<ConstraintAligner>, num_workers: usize, queue_capacity: usize) -> Result<AlignerPool, Box<dyn std::error::Error>> {
        if num_workers == 0 {
            bail!("AlignerPool requires at least one worker.");
        }

        let (input_tx, input_rx) = bounded::<PoolSequence>(queue_capacity);
        let (output_tx, output_rx) = bounded::<Alignment>(queue_capacity);

        let workers: Vec<JoinHandle<()>> = (0..num_workers)
            .map(|worker_id| {
                let aligner = aligner.clone();
                let input_rx = input_rx.clone();
                let output_tx = output_tx.clone();
                std::thread::spawn(move || {
                    worker_loop(worker_id, aligner, input_rx, output_tx);
                })
            })
            .collect();

        Ok(AlignerPool {
            input_tx,
            output_rx,
            workers
        })
    }

    /// Returns a new handle for feeding sequences into the pool.
    /// All handles must drop before [AlignerPool::join] can finish.
    pub fn sender(&self) -> Sender<PoolSequence> {
        self.input_tx.clone()
    }

    /// Returns the channel completed alignments arrive on.
    pub fn results(&self) -> &Receiver<Alignment> {
        &self.output_rx
    }

    /// Closes the pool's input handle and waits for the workers to drain the queue and exit.
    /// Callers must have dropped their cloned senders and keep draining [AlignerPool::results],
    /// otherwise the workers never finish.
    /// # Errors
    /// * if a worker panicked
    pub fn join(self) -> Result<(), Box<dyn std::error::Error>> {
        drop(self.input_tx);
        for (worker_id, handle) in self.workers.into_iter().enumerate() {
            if handle.join().is_err() {
                bail!("Alignment worker {} panicked.", worker_id);
            }
        }
        Ok(())
    }
}

/// Pulls sequences until the input channel closes, reusing one scratch across all of them.
fn worker_loop(worker_id: usize, aligner: Arc<ConstraintAligner>, input_rx: Receiver<PoolSequence>, output_tx: Sender<Alignment>) {
    debug!("Alignment worker {worker_id} started");
    let mut scratch = AlignScratch::default();
    let mut aligned: usize = 0;
    while let Ok(sequence) = input_rx.recv() {
        let alignment = aligner.align_with_scratch(sequence.as_ref(), &mut scratch);
        if output_tx.send(alignment).is_err() {
            // nobody is listening for results anymore
            break;
        }
        aligned += 1;
    }
    debug!("Alignment worker {worker_id} finished after {aligned} alignments");
}

#[cfg(test)]
mod tests {
    use super::*;

    use rustc_hash::FxHashMap as HashMap;

    use crate::alphabet::Alphabet;
    use crate::constraint::{MaxLengthConstraint, NoHomopolymerConstraint, TemplateConstraint};
    use crate::example_gen::generate_test;
    use crate::sequence::PlainSequence;
    use crate::template::Template;

    fn example_aligner(pattern: &[u8]) -> ConstraintAligner {
        let alphabet = Alphabet::dna();
        let template = Template::from_pattern("target".to_string(), pattern, b'N', &alphabet).unwrap();

        let mut aligner = ConstraintAligner::default();
        aligner.add_constraint(Box::new(TemplateConstraint::new(template, alphabet.clone())));
        aligner.add_constraint(Box::new(NoHomopolymerConstraint::new(alphabet.clone())));
        aligner.add_constraint(Box::new(MaxLengthConstraint::new(100)));
        aligner
    }

    #[test]
    fn test_zero_workers() {
        let aligner = Arc::new(ConstraintAligner::default());
        let result = AlignerPool::spawn(aligner, 0, 4);
        assert!(result.is_err());
    }

    #[test]
    fn test_join_without_input() {
        let aligner = Arc::new(ConstraintAligner::default());
        let pool = AlignerPool::spawn(aligner, 2, 4).unwrap();
        pool.join().unwrap();
    }

    #[test]
    fn test_pool_matches_serial() {
        let alphabet = Alphabet::dna();
        let (clean, dataset) = generate_test(&alphabet, 50, 12, 0.05);
        let aligner = Arc::new(example_aligner(&clean));

        let reads: Vec<PlainSequence> = dataset.into_iter().enumerate()
            .map(|(i, contents)| PlainSequence::new(format!("read_{i}"), contents))
            .collect();

        // serial pass first, keyed by output name
        let mut expected: HashMap<String, Alignment> = Default::default();
        for read in reads.iter() {
            let alignment = aligner.align(read);
            expected.insert(alignment.name().to_string(), alignment);
        }

        let pool = AlignerPool::spawn(aligner, 4, 4).unwrap();
        let sender = pool.sender();
        let feeder = std::thread::spawn(move || {
            for read in reads {
                sender.send(Box::new(read)).unwrap();
            }
        });

        for _ in 0..expected.len() {
            let alignment = pool.results().recv().unwrap();
            let serial = expected.get(alignment.name()).unwrap();
            assert_eq!(&alignment, serial);
        }

        feeder.join().unwrap();
        pool.join().unwrap();
    }
}
