//! console.rs
//!
//! Interactive booking over a line-oriented console.
//!
//! One request is three prompts (movie code, showtime, number of tickets)
//! followed by a single booking attempt. The outcome is printed as one line;
//! booking and input errors are shown to the user and are not fatal.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::models::Booking;
use crate::services::booking::{BookingError, BookingService};

const MOVIE_CODE_PROMPT: &str = "Enter movie code: ";
const SHOWTIME_PROMPT: &str = "Enter showtime: ";
const TICKETS_PROMPT: &str = "Enter number of tickets: ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid input for number of tickets. Please enter an integer.")]
    NotAnInteger(String),

    #[error("Number of tickets must be greater than zero, got {0}.")]
    NotPositive(i64),

    #[error("Number of tickets {0} is more than any showing can hold.")]
    OutOfRange(i64),

    #[error("Input ended before the {0} was entered.")]
    EndOfInput(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses the ticket prompt answer. Anything that is not a positive integer
/// fitting in `u32` is rejected here, before the booking service sees it.
pub fn parse_ticket_count(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))?;
    if value <= 0 {
        return Err(InputError::NotPositive(value));
    }
    u32::try_from(value).map_err(|_| InputError::OutOfRange(value))
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /* ---------- prompts ---------- */

    async fn prompt(&mut self, label: &str, field: &'static str) -> Result<String, RequestError> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(InputError::EndOfInput(field).into());
        }
        // Only the terminator is dropped; the answer is matched as typed
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn write_line(&mut self, message: &str) -> std::io::Result<()> {
        self.output.write_all(message.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /* ---------- booking ---------- */

    /// Collects the three answers and attempts the booking. Nothing is printed
    /// besides the prompts.
    pub async fn request(&mut self, service: &BookingService) -> Result<Booking, RequestError> {
        let movie_code = self.prompt(MOVIE_CODE_PROMPT, "movie code").await?;
        let showtime = self.prompt(SHOWTIME_PROMPT, "showtime").await?;
        let raw_tickets = self.prompt(TICKETS_PROMPT, "number of tickets").await?;
        let tickets = parse_ticket_count(&raw_tickets)?;

        Ok(service.book(&movie_code, &showtime, tickets)?)
    }

    /// Runs one request and prints its outcome. Only console I/O failures are
    /// returned as errors.
    pub async fn run(&mut self, service: &BookingService) -> std::io::Result<Option<Booking>> {
        match self.request(service).await {
            Ok(booking) => {
                self.write_line(&booking.to_string()).await?;
                Ok(Some(booking))
            }
            Err(RequestError::Io(e)) => Err(e),
            Err(RequestError::Input(e)) => {
                warn!(error = %e, "Rejected console input");
                self.write_line(&format!("Error: {}", e)).await?;
                Ok(None)
            }
            Err(RequestError::Booking(e)) => {
                info!(error = %e, "Booking refused");
                self.write_line(&e.to_string()).await?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integers() {
        assert_eq!(parse_ticket_count("3"), Ok(3));
        assert_eq!(parse_ticket_count("  12 \n"), Ok(12));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(
            parse_ticket_count("three"),
            Err(InputError::NotAnInteger("three".to_string()))
        );
        assert!(matches!(parse_ticket_count("2.5"), Err(InputError::NotAnInteger(_))));
        assert!(matches!(parse_ticket_count(""), Err(InputError::NotAnInteger(_))));
    }

    #[test]
    fn rejects_zero_and_negative_counts() {
        assert_eq!(parse_ticket_count("0"), Err(InputError::NotPositive(0)));
        assert_eq!(parse_ticket_count("-4"), Err(InputError::NotPositive(-4)));
    }

    #[test]
    fn rejects_counts_beyond_u32() {
        assert_eq!(
            parse_ticket_count("4294967296"),
            Err(InputError::OutOfRange(4_294_967_296))
        );
    }
}
