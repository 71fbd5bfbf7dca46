pub mod entries;

pub use entries::{FormEntries, ReplayReport};
