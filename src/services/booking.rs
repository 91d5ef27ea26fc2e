use chrono::Utc;
use std::sync::atomic::Ordering;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::models::Booking;
use crate::services::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid movie code: {0}")]
    UnknownMovie(String),

    #[error("Invalid showtime for movie: {showtime}")]
    UnknownShowtime { movie_code: String, showtime: String },

    #[error("Not enough seats available for {title} at {showtime}")]
    InsufficientSeats {
        title: String,
        showtime: String,
        requested: u32,
        available: u32,
    },

    #[error("Number of tickets must be greater than zero")]
    InvalidTicketCount(u32),
}

/// Books tickets against an owned [`Catalog`].
///
/// Every showing's seat count is decremented with a compare-and-swap loop, so
/// the capacity check and the decrement cannot interleave with another booking
/// of the same showing even when the service is shared across tasks.
#[derive(Debug, Default)]
pub struct BookingService {
    catalog: Catalog,
}

impl BookingService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn available_seats(&self, movie_code: &str, showtime: &str) -> Option<u32> {
        self.catalog.available_seats(movie_code, showtime)
    }

    #[instrument(level = "info", skip(self))]
    pub fn book(&self, movie_code: &str, showtime: &str, tickets: u32) -> Result<Booking, BookingError> {
        let movie = self.catalog.movie(movie_code).ok_or_else(|| {
            warn!("Unknown movie code");
            BookingError::UnknownMovie(movie_code.to_string())
        })?;

        let seats = self
            .catalog
            .seat_counter(movie_code, showtime)
            .ok_or_else(|| {
                warn!("Unknown showtime");
                BookingError::UnknownShowtime {
                    movie_code: movie_code.to_string(),
                    showtime: showtime.to_string(),
                }
            })?;

        if tickets == 0 {
            return Err(BookingError::InvalidTicketCount(tickets));
        }

        // Err carries the count observed when the check failed; nothing is written
        let previous = seats
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |available| {
                available.checked_sub(tickets)
            })
            .map_err(|available| {
                warn!(available, "Not enough seats");
                BookingError::InsufficientSeats {
                    title: movie.title.clone(),
                    showtime: showtime.to_string(),
                    requested: tickets,
                    available,
                }
            })?;

        let booking = Booking {
            id: Uuid::new_v4(),
            movie_code: movie.code.clone(),
            title: movie.title.clone(),
            showtime: showtime.to_string(),
            tickets,
            remaining_seats: previous - tickets,
            booked_at: Utc::now(),
        };
        info!(booking_id = %booking.id, remaining = booking.remaining_seats, "Tickets booked");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> BookingService {
        let mut builder = Catalog::builder();
        builder.add_showing("M1", "Inception", "10:00", 5);
        builder.add_showing("M1", "Inception", "18:00", 1);
        BookingService::new(builder.build())
    }

    #[test]
    fn books_then_rejects_overbooking() {
        let service = service();

        let booking = service.book("M1", "10:00", 3).unwrap();
        assert_eq!(booking.remaining_seats, 2);
        assert_eq!(booking.title, "Inception");
        assert_eq!(service.available_seats("M1", "10:00"), Some(2));

        let err = service.book("M1", "10:00", 3).unwrap_err();
        assert_eq!(
            err,
            BookingError::InsufficientSeats {
                title: "Inception".to_string(),
                showtime: "10:00".to_string(),
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(service.available_seats("M1", "10:00"), Some(2));
    }

    #[test]
    fn unknown_movie_wins_over_other_checks() {
        let service = service();
        assert_eq!(
            service.book("M404", "10:00", 0).unwrap_err(),
            BookingError::UnknownMovie("M404".to_string())
        );
    }

    #[test]
    fn unknown_showtime_for_known_movie() {
        let service = service();
        let err = service.book("M1", "23:59", 1).unwrap_err();
        assert!(matches!(err, BookingError::UnknownShowtime { ref showtime, .. } if showtime == "23:59"));
        assert_eq!(err.to_string(), "Invalid showtime for movie: 23:59");
    }

    #[test]
    fn zero_tickets_is_rejected_without_touching_seats() {
        let service = service();
        assert_eq!(
            service.book("M1", "10:00", 0).unwrap_err(),
            BookingError::InvalidTicketCount(0)
        );
        assert_eq!(service.available_seats("M1", "10:00"), Some(5));
    }

    #[test]
    fn can_book_exactly_the_last_seats() {
        let service = service();
        let booking = service.book("M1", "18:00", 1).unwrap();
        assert_eq!(booking.remaining_seats, 0);
        assert!(service.book("M1", "18:00", 1).is_err());
    }

    #[test]
    fn error_messages_match_console_wording() {
        let service = service();
        assert_eq!(
            service.book("X", "10:00", 1).unwrap_err().to_string(),
            "Invalid movie code: X"
        );
        assert_eq!(
            service.book("M1", "10:00", 6).unwrap_err().to_string(),
            "Not enough seats available for Inception at 10:00"
        );
    }
}
