pub mod competition;
pub mod engine;
pub mod fit;
pub mod industry;
pub mod opportunity;
pub mod relevance;

pub use competition::*;
pub use engine::*;
pub use fit::*;
pub use industry::*;
pub use opportunity::*;
pub use relevance::*;
