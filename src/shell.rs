use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::{error::AppResult, models::MovieForm, repository::MovieRepository, templates};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    List,
    Create,
    Update,
    Delete,
    Quit,
}

const COMMANDS: &[(char, Command)] = &[
    ('L', Command::List),
    ('C', Command::Create),
    ('U', Command::Update),
    ('D', Command::Delete),
    ('Q', Command::Quit),
];

impl Command {
    /// Only the first non-blank character counts, case-insensitively.
    pub fn parse(token: &str) -> Option<Self> {
        let first = token.trim().chars().next()?.to_ascii_uppercase();
        COMMANDS.iter().find(|(key, _)| *key == first).map(|(_, command)| *command)
    }
}

/// A command with its arguments already collected from the prompts.
#[derive(Clone, Debug)]
pub enum Request {
    List,
    Create(MovieForm),
    Update { title: String, new_title: String },
    Delete { title: String },
}

pub async fn execute(repo: &MovieRepository, request: Request) -> AppResult<String> {
    match request {
        Request::List => {
            let count = repo.count_movies().await?;
            let movies = repo.list_movies_with_relations().await?;
            Ok(templates::movie_listing(count, &movies))
        },
        Request::Create(form) => {
            let id = repo.create_movie(&form).await?;
            Ok(templates::movie_created(id, &form.title))
        },
        Request::Update { title, new_title } => {
            let Some(movie) = repo.find_movie_by_title(&title).await? else {
                return Ok(templates::movie_not_found(&title));
            };
            let updated = repo.update_movie_title(&movie, &new_title).await?;
            Ok(templates::movie_renamed(&movie.title, &updated.title))
        },
        Request::Delete { title } => {
            let Some(movie) = repo.find_movie_by_title(&title).await? else {
                return Ok(templates::movie_not_found(&title));
            };
            repo.delete_movie(&movie).await?;
            Ok(templates::movie_deleted(&movie.title))
        },
    }
}

/// The interactive menu loop. Runs until `Q` or end of input.
pub struct Shell<R, W> {
    repo: MovieRepository,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(repo: MovieRepository, input: R, output: W) -> Self {
        Self { repo, input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> std::io::Result<()> {
        loop {
            self.write(&templates::menu()).await?;
            let Some(token) = self.read_line().await? else {
                break;
            };

            let Some(command) = Command::parse(&token) else {
                self.write(&templates::unknown_command(&token)).await?;
                continue;
            };

            if command == Command::Quit {
                self.write(&templates::goodbye()).await?;
                break;
            }

            let Some(request) = self.read_request(command).await? else {
                break;
            };

            let text = match execute(&self.repo, request).await {
                Ok(text) => text,
                Err(err) => {
                    warn!(command = ?command, error = %err, "command failed");
                    templates::error_message(&err)
                },
            };
            self.write(&text).await?;
        }

        Ok(())
    }

    /// `None` when input ends part way through the prompts.
    async fn read_request(&mut self, command: Command) -> std::io::Result<Option<Request>> {
        let request = match command {
            Command::List => Request::List,
            Command::Create => {
                let ratings = self.repo.list_ratings().await;
                match ratings {
                    Ok(ratings) => self.write(&templates::rating_choices(&ratings)).await?,
                    Err(err) => warn!(error = %err, "could not load ratings"),
                }

                let Some(title) = self.prompt("Title: ").await? else { return Ok(None) };
                let Some(primary_director) = self.prompt("Primary director: ").await? else {
                    return Ok(None);
                };
                let Some(genre) = self.prompt("Genre: ").await? else { return Ok(None) };
                let Some(year_released) = self.prompt("Year released: ").await? else {
                    return Ok(None);
                };
                let Some(rating_id) = self.prompt("Rating id: ").await? else { return Ok(None) };

                Request::Create(MovieForm { title, primary_director, genre, year_released, rating_id })
            },
            Command::Update => {
                let Some(title) = self.prompt("Title of the movie to update: ").await? else {
                    return Ok(None);
                };
                let Some(new_title) = self.prompt("New title: ").await? else { return Ok(None) };
                Request::Update { title, new_title }
            },
            Command::Delete => {
                let Some(title) = self.prompt("Title of the movie to delete: ").await? else {
                    return Ok(None);
                };
                Request::Delete { title }
            },
            Command::Quit => return Ok(None),
        };

        Ok(Some(request))
    }

    async fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        self.write(label).await?;
        self.read_line().await
    }

    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::connect_in_memory, error::AppError};

    async fn repo() -> MovieRepository {
        MovieRepository::new(connect_in_memory().await)
    }

    async fn session(repo: &MovieRepository, script: &str) -> String {
        let mut shell = Shell::new(repo.clone(), script.as_bytes(), Vec::new());
        shell.run().await.unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn commands_parse_by_first_letter() {
        assert_eq!(Command::parse("l"), Some(Command::List));
        assert_eq!(Command::parse("  Create"), Some(Command::Create));
        assert_eq!(Command::parse("u"), Some(Command::Update));
        assert_eq!(Command::parse("DELETE"), Some(Command::Delete));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("x"), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[tokio::test]
    async fn update_of_unknown_title_reports_not_found() {
        let repo = repo().await;
        let request =
            Request::Update { title: "Nonexistent".to_string(), new_title: "Other".to_string() };
        let text = execute(&repo, request).await.unwrap();
        assert_eq!(text, "No movie titled 'Nonexistent'\n");
    }

    #[tokio::test]
    async fn create_with_bad_year_surfaces_validation_error() {
        let repo = repo().await;
        let rating = repo.create_rating("PG").await.unwrap();
        let form = MovieForm {
            title: "Test Film".to_string(),
            primary_director: "A. Director".to_string(),
            genre: "Drama".to_string(),
            year_released: "not-a-number".to_string(),
            rating_id: rating.to_string(),
        };

        let err = execute(&repo, Request::Create(form)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "year", .. }));
        assert_eq!(repo.count_movies().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn scripted_session_creates_renames_lists_and_deletes() {
        let repo = repo().await;
        repo.create_rating("PG").await.unwrap();

        let script = "c\nTest Film\nA. Director\nDrama\n2020\n1\n\
                      u\nTest Film\nBetter Film\n\
                      l\n\
                      d\nBetter Film\n\
                      l\n\
                      q\n";
        let output = session(&repo, script).await;

        assert!(output.contains("  1: PG\n"));
        assert!(output.contains("Created movie 'Test Film' with id 1\n"));
        assert!(output.contains("Renamed 'Test Film' to 'Better Film'\n"));
        assert!(output.contains("There are 1 movies\nThere is a movie named Better Film and a rating of PG\n"));
        assert!(output.contains("Deleted 'Better Film'\n"));
        assert!(output.contains("There are 0 movies\n"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(repo.count_movies().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn errors_and_unknown_commands_keep_the_loop_alive() {
        let repo = repo().await;

        let script = "z\nc\nOrphan\nNobody\nDrama\n2001\n42\nl\n";
        let output = session(&repo, script).await;

        assert!(output.contains("Unknown command 'z'\n"));
        assert!(output.contains("No ratings exist yet.\n"));
        assert!(output.contains("Nothing was saved: that rating does not exist\n"));
        assert!(output.contains("There are 0 movies\n"));
    }

    #[tokio::test]
    async fn input_ending_mid_prompt_stops_quietly() {
        let repo = repo().await;
        let output = session(&repo, "c\nHalf a Film\n").await;
        assert!(output.ends_with("Primary director: "));
        assert_eq!(repo.count_movies().await.unwrap(), 0);
    }
}
