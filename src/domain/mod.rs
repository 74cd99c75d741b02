pub mod prospect;

pub use prospect::*;
