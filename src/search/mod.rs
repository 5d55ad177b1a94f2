pub mod index;

pub use index::{discipline_label, teacher_label, SearchEntry, SearchIndex, SearchIndexBuilder};
