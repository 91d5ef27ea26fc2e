use serde::Serialize;
use std::fmt;

/// One screening of a movie: the key seat availability is tracked under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ShowingKey {
    pub movie_code: String,
    pub showtime: String,
}

impl ShowingKey {
    pub fn new(movie_code: impl Into<String>, showtime: impl Into<String>) -> Self {
        Self {
            movie_code: movie_code.into(),
            showtime: showtime.into(),
        }
    }
}

impl fmt::Display for ShowingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.movie_code, self.showtime)
    }
}
