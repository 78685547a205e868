pub mod stage1_punctuate;
pub mod stage2_grammar;

pub use stage1_punctuate::*;
pub use stage2_grammar::*;
