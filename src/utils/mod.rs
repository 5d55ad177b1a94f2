pub mod logging;

pub use logging::{log_page_loaded, log_startup, truncate_text};
