pub mod movie;
pub mod showing;
pub mod booking;

pub use movie::Movie;
pub use showing::ShowingKey;
pub use booking::Booking;
