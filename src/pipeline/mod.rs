pub mod audit;
pub mod extractor;
pub mod listing;
