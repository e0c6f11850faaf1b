pub mod assignment;
pub mod classification;
pub mod ingestion;
pub mod prediction;
