//! Plain-text rendering for the console shell. Every function returns the
//! full text to print, newline-terminated.

use std::fmt::Write;

use crate::{entities::rating, error::AppError, models::MovieDetails};

pub fn menu() -> String {
    "\n(L)ist movies, (C)reate a movie, (U)pdate a movie, (D)elete a movie, (Q)uit\n> ".to_string()
}

pub fn movie_listing(count: u64, movies: &[MovieDetails]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "There are {count} movies");

    for details in movies {
        match &details.rating {
            Some(rating) => {
                let _ = writeln!(
                    out,
                    "There is a movie named {} and a rating of {}",
                    details.movie.title, rating.description
                );
            },
            None => {
                let _ = writeln!(
                    out,
                    "There is a movie named {} and has not been rated yet",
                    details.movie.title
                );
            },
        }

        for member in &details.cast {
            let _ = writeln!(
                out,
                " - Has a character named {} played by {}",
                member.role.character_name, member.actor.full_name
            );
        }
    }

    out
}

pub fn rating_choices(ratings: &[rating::Model]) -> String {
    if ratings.is_empty() {
        return "No ratings exist yet.\n".to_string();
    }

    let mut out = String::from("Ratings:\n");
    for rating in ratings {
        let _ = writeln!(out, "  {}: {}", rating.id, rating.description);
    }
    out
}

pub fn movie_created(id: i32, title: &str) -> String {
    format!("Created movie '{title}' with id {id}\n")
}

pub fn movie_renamed(old: &str, new: &str) -> String {
    format!("Renamed '{old}' to '{new}'\n")
}

pub fn movie_deleted(title: &str) -> String {
    format!("Deleted '{title}'\n")
}

pub fn movie_not_found(title: &str) -> String {
    format!("No movie titled '{title}'\n")
}

pub fn unknown_command(token: &str) -> String {
    format!("Unknown command '{}'\n", token.trim())
}

pub fn goodbye() -> String {
    "Goodbye!\n".to_string()
}

pub fn error_message(err: &AppError) -> String {
    match err {
        AppError::Validation { .. } => format!("Nothing was saved: {err}\n"),
        AppError::ForeignKey(_) => "Nothing was saved: that rating does not exist\n".to_string(),
        _ => format!("Error: {err}\n"),
    }
}
