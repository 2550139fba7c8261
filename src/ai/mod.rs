pub mod classifier;
pub mod extractor;
pub mod prompt;
