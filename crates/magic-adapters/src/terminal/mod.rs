//! Terminal size adapters.

mod size;

pub use size::CrosstermSize;
