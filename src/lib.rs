pub mod gene;
pub mod merge;
pub mod output;
pub mod parser;
pub mod recover;
pub mod tables;
