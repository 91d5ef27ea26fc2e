use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Confirmation of a successful booking.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub movie_code: String,
    pub title: String,
    pub showtime: String,
    pub tickets: u32,
    pub remaining_seats: u32,
    pub booked_at: DateTime<Utc>,
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully booked {} tickets for {} at {}",
            self.tickets, self.title, self.showtime
        )
    }
}
