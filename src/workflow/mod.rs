pub mod add_test_flow;
pub mod cascade;
pub mod notice;

pub use add_test_flow::{AddTestFlow, CascadeOutcome, ADD_SUCCESS_TEXT};
pub use cascade::{CascadeSelector, FetchTicket, OptionValue, SelectOption};
pub use notice::{Notice, NoticeLevel};
