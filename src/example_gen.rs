
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::alphabet::Alphabet;

/// Creates a test set we can verify is working: a clean target with no immediate symbol repeats
/// plus noisy reads sampled from it
/// # Arguments
/// * `alphabet` - the symbol set to draw from, e.g. [Alphabet::dna]; needs at least two symbols
/// * `seq_len` - the length of the clean target
/// * `num_samples` - the number of noisy reads to generate from the target
/// * `error_rate` - overall error rate, assumes mismatch, insertion, and deletion are equally likely sub-components of this error rate
pub fn generate_test(alphabet: &Alphabet, seq_len: usize, num_samples: usize, error_rate: f64) -> (Vec<u8>, Vec<Vec<u8>>) {
    let alphabet_size = alphabet.len();
    assert!(alphabet_size > 1);
    assert!((0.0..=1.0).contains(&error_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let symbol_distribution = Uniform::new(0, alphabet_size);
    let symbolm1_distribution = Uniform::new(0, alphabet_size-1);
    let error_distribution = Uniform::new(0.0, 1.0);
    let error_type_distribution = Uniform::new(0, 3);

    // offsetting by [1, alphabet_size) guarantees each symbol differs from the one before it
    let mut target_indices: Vec<usize> = Vec::with_capacity(seq_len);
    let mut symbol_index = rng.sample(symbol_distribution);
    for _i in 0..seq_len {
        target_indices.push(symbol_index);
        symbol_index = (symbol_index + 1 + rng.sample(symbolm1_distribution)) % alphabet_size;
    }

    let samples: Vec<Vec<u8>> = (0..num_samples)
        .map(|_i| {

            let mut seq = vec![];
            let mut target_index = 0;
            while target_index < target_indices.len() {
                let c = target_indices[target_index];
                let is_error = rng.sample(error_distribution) < error_rate;
                if is_error {
                    let error_type = rng.sample(error_type_distribution);
                    match error_type {
                        0 => {
                            // substitution, never the original symbol
                            let sub_offset = rng.sample(symbolm1_distribution);
                            let alt_c = (c + 1 + sub_offset) % alphabet_size;
                            seq.push(alphabet.symbols()[alt_c]);
                            target_index += 1;
                        },
                        1 => {
                            // deletion
                            target_index += 1;
                        },
                        2 => {
                            //insertion
                            let s = rng.sample(symbol_distribution);
                            seq.push(alphabet.symbols()[s]);
                        },
                        _ => panic!("no impl")
                    }
                } else {
                    seq.push(alphabet.symbols()[c]);
                    target_index += 1;
                }
            }
            seq
        })
        .collect();

    let target: Vec<u8> = target_indices.iter()
        .map(|&index| alphabet.symbols()[index])
        .collect();

    (target, samples)
}
