/*!
Contains configuration information for the constrained alignment algorithm.
Typical usage is to the use the builder to construct the config, e.g.
```
use seq_polish::polish_config::{PolishConfig, PolishConfigBuilder};
let config: PolishConfig = PolishConfigBuilder::default()
    .delete_cost(2)
    .ambiguous_symbol(b'N')
    .build()
    .unwrap();
```
*/

/**
Contains configuration information for the constrained alignment algorithm.
Typical usage is to the use the builder to construct the config, e.g.
```
use seq_polish::polish_config::{PolishConfig, PolishConfigBuilder};
let config: PolishConfig = PolishConfigBuilder::default()
    .delete_cost(2)
    .ambiguous_symbol(b'N')
    .build()
    .unwrap();
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct PolishConfig {
    /// Tunable part of the cost paid each time an input symbol is consumed without advancing the output
    pub insert_cost: usize,
    /// Tunable part of the cost paid each time the output advances without consuming an input symbol
    pub delete_cost: usize,
    /// Symbol written to output positions that no input symbol resolved
    pub ambiguous_symbol: u8,
    /// How many consecutive output positions a single input symbol may bridge by deletion
    pub delete_window: usize,
    /// Appended to the input name to label the aligned output
    pub aligned_suffix: String
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            // the aligner adds a fixed bias on top of both indel costs, these only set the relative part
            insert_cost: 1,
            // equal to insert_cost by default, ties then resolve towards shorter outputs
            delete_cost: 1,
            // the IUPAC "any base" code
            ambiguous_symbol: b'N',
            // bridging more than 4 skipped positions on one input symbol has not proven useful
            delete_window: 4,
            // matches the labeling downstream tooling expects
            aligned_suffix: "_aligned".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config: PolishConfig = PolishConfigBuilder::default()
            .build()
            .unwrap();
        assert_eq!(config.insert_cost, 1);
        assert_eq!(config.delete_cost, 1);
        assert_eq!(config.ambiguous_symbol, b'N');
        assert_eq!(config.delete_window, 4);
        assert_eq!(config.aligned_suffix, "_aligned");
    }

    #[test]
    fn test_builder_overrides() {
        let config: PolishConfig = PolishConfigBuilder::default()
            .insert_cost(3)
            .delete_window(2)
            .aligned_suffix("_clean".to_string())
            .build()
            .unwrap();
        assert_eq!(config.insert_cost, 3);
        assert_eq!(config.delete_cost, 1);
        assert_eq!(config.delete_window, 2);
        assert_eq!(config.aligned_suffix, "_clean");
    }
}
