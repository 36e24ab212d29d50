pub mod chat;
pub mod classifier;
pub mod dataset;
pub mod embedding;
pub mod extract;
pub mod generator;
pub mod similarity;
