//! `.cor` wildlife corridor instance files.
//!
//! Line-oriented, whitespace separated, node ids 0-based:
//!
//! ```text
//! c free-form comment
//! p <nodes> <reserves>
//! n <id> <reserve 0|1> <profit> <cost>
//! e <u> <v>
//! b <budget>
//! ```

pub mod reader;
pub mod writer;

pub use reader::{CorFileSource, parse_cor};
pub use writer::CorBudgetWriter;
