pub mod breakdown;
pub mod files;
pub mod narrative;
pub mod scatter;
pub mod stats;
