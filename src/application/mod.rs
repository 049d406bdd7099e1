pub mod aggregate;
pub mod alerts;
pub mod assemble;
pub mod prompt;
pub mod report;
pub mod sample;
pub mod stats;
