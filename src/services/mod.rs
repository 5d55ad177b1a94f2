pub mod test_lookup;

pub use test_lookup::{Navigation, TestLookup};
