use jiff::civil::Date;

use crate::{
    entities::{actor, movie, rating, role},
    error::{AppError, AppResult},
};

/// Movie fields as typed at the prompt, before any parsing.
#[derive(Clone, Debug, Default)]
pub struct MovieForm {
    pub title: String,
    pub primary_director: String,
    pub genre: String,
    pub year_released: String,
    pub rating_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub primary_director: String,
    pub genre: String,
    pub year_released: i32,
    pub rating_id: i32,
}

impl MovieForm {
    pub fn validate(&self) -> AppResult<NewMovie> {
        Ok(NewMovie {
            title: required("title", &self.title)?,
            primary_director: required("primary director", &self.primary_director)?,
            genre: required("genre", &self.genre)?,
            year_released: integer("year", &self.year_released)?,
            rating_id: integer("rating", &self.rating_id)?,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActorForm {
    pub full_name: String,
    pub birthday: String,
    pub screen_actors_guild_member: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewActor {
    pub full_name: String,
    pub birthday: Date,
    pub screen_actors_guild_member: bool,
}

impl ActorForm {
    pub fn validate(&self) -> AppResult<NewActor> {
        let birthday = self.birthday.trim();
        let birthday = birthday.parse::<Date>().map_err(|_| {
            AppError::validation("birthday", format!("`{birthday}` is not a YYYY-MM-DD date"))
        })?;

        Ok(NewActor {
            full_name: required("full name", &self.full_name)?,
            birthday,
            screen_actors_guild_member: self.screen_actors_guild_member,
        })
    }
}

/// A movie with its rating and cast resolved.
#[derive(Clone, Debug)]
pub struct MovieDetails {
    pub movie: movie::Model,
    pub rating: Option<rating::Model>,
    pub cast: Vec<CastMember>,
}

#[derive(Clone, Debug)]
pub struct CastMember {
    pub role: role::Model,
    pub actor: actor::Model,
}

/// Rejects blank input; the value itself is kept exactly as typed.
pub(crate) fn required(field: &'static str, value: &str) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

fn integer(field: &'static str, value: &str) -> AppResult<i32> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    value
        .parse()
        .map_err(|_| AppError::validation(field, format!("`{value}` is not a whole number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MovieForm {
        MovieForm {
            title: " Test Film ".to_string(),
            primary_director: "A. Director".to_string(),
            genre: "Drama".to_string(),
            year_released: "2020".to_string(),
            rating_id: "1".to_string(),
        }
    }

    #[test]
    fn valid_form_keeps_text_verbatim_and_types_numbers() {
        let movie = form().validate().unwrap();
        assert_eq!(movie.title, " Test Film ");
        assert_eq!(movie.year_released, 2020);
        assert_eq!(movie.rating_id, 1);
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let bad = MovieForm { year_released: "not-a-number".to_string(), ..form() };
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "year", .. }));
    }

    #[test]
    fn rating_must_parse_as_integer() {
        let bad = MovieForm { rating_id: "PG".to_string(), ..form() };
        assert!(matches!(bad.validate(), Err(AppError::Validation { field: "rating", .. })));

        let missing = MovieForm { rating_id: "  ".to_string(), ..form() };
        assert!(matches!(missing.validate(), Err(AppError::Validation { field: "rating", .. })));
    }

    #[test]
    fn blank_title_is_rejected() {
        let bad = MovieForm { title: "   ".to_string(), ..form() };
        assert!(matches!(bad.validate(), Err(AppError::Validation { field: "title", .. })));
    }

    #[test]
    fn actor_birthday_must_be_a_calendar_date() {
        let actor = ActorForm {
            full_name: "Jane Doe".to_string(),
            birthday: "1970-02-30".to_string(),
            screen_actors_guild_member: false,
        };
        assert!(matches!(actor.validate(), Err(AppError::Validation { field: "birthday", .. })));

        let actor = ActorForm { birthday: "1970-02-28".to_string(), ..actor };
        let valid = actor.validate().unwrap();
        assert_eq!(valid.birthday, jiff::civil::date(1970, 2, 28));
    }
}
