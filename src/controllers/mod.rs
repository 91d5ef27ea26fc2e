pub mod console;

pub use console::{parse_ticket_count, Console, InputError, RequestError};
