//! Startup: loading the catalog named in the configuration.

use movie_reservation::config::Config;
use movie_reservation::AppState;
use std::path::PathBuf;

fn config_for(path: impl Into<PathBuf>) -> Config {
    let mut config = Config::default();
    config.catalog.path = path.into();
    config
}

#[tokio::test]
async fn loads_bundled_dataset() {
    let state = AppState::new(config_for("Movie Reservation Dataset.csv")).await;
    let catalog = state.booking.catalog();

    assert_eq!(catalog.movies().len(), 5);
    assert_eq!(catalog.movie("M1").unwrap().title, "Inception");
    assert_eq!(state.booking.available_seats("M1", "10:00"), Some(5));
    assert_eq!(state.booking.available_seats("M3", "18:00"), Some(0));
}

#[tokio::test]
async fn missing_catalog_file_starts_empty() {
    let state = AppState::new(config_for("no-such-dataset.csv")).await;
    assert!(state.booking.catalog().is_empty());
    assert!(state.booking.book("M1", "10:00", 1).is_err());
}

#[tokio::test]
async fn bad_seat_count_keeps_rows_before_it() {
    let path = std::env::temp_dir().join(format!("movie-reservation-{}.csv", uuid::Uuid::new_v4()));
    std::fs::write(
        &path,
        "code,title,genre,showtime,duration,seats\nM1,Inception,x,10:00,x,5\nM2,Up,x,12:30,x,lots\n",
    )
    .unwrap();

    let state = AppState::new(config_for(&path)).await;
    std::fs::remove_file(&path).ok();

    assert_eq!(state.booking.available_seats("M1", "10:00"), Some(5));
    assert!(state.booking.catalog().movie("M2").is_none());
}
