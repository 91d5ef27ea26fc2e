use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub code: String,
    pub title: String,
    // In catalog order; a showtime repeated in the source is repeated here too
    pub showtimes: Vec<String>,
}

impl Movie {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            showtimes: Vec::new(),
        }
    }
}
