pub mod assets;
pub mod payload;
pub mod stats;
