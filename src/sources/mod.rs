//! Catalog source tables and the title join.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::{CreditRecord, MovieRecord, RawMetadataRecord};

const MOVIE_COLUMNS: &[&str] = &["title", "overview", "genres", "keywords"];
const CREDIT_COLUMNS: &[&str] = &["title", "cast", "crew"];

/// The two source tables, read once at startup
#[derive(Debug, Clone, Default)]
pub struct CatalogSources {
    pub movies: Vec<MovieRecord>,
    pub credits: Vec<CreditRecord>,
}

impl CatalogSources {
    /// Read both tables from CSV readers with header rows
    pub fn from_readers<M: Read, C: Read>(movies: M, credits: C) -> AppResult<Self> {
        Ok(Self {
            movies: read_table(movies, "movies", MOVIE_COLUMNS)?,
            credits: read_table(credits, "credits", CREDIT_COLUMNS)?,
        })
    }
}

/// Deserialize every row after checking the header carries each required column
fn read_table<T: DeserializeOwned, R: Read>(
    reader: R,
    table: &'static str,
    required: &[&'static str],
) -> AppResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers()?;
    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(AppError::MissingColumn { table, column });
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Load the movies and credits tables from CSV files
pub fn load_sources(
    movies_path: impl AsRef<Path>,
    credits_path: impl AsRef<Path>,
) -> AppResult<CatalogSources> {
    let movies_path = movies_path.as_ref();
    let credits_path = credits_path.as_ref();

    let sources = CatalogSources::from_readers(File::open(movies_path)?, File::open(credits_path)?)?;

    tracing::info!(
        movies_path = %movies_path.display(),
        credits_path = %credits_path.display(),
        movies = sources.movies.len(),
        credits = sources.credits.len(),
        "Loaded catalog sources"
    );

    Ok(sources)
}

/// Inner join of movies and credits on exact title.
///
/// Output follows movies order; a title repeated in credits yields one record
/// per credits row, in credits order. Titles missing from either table are
/// dropped.
pub fn join_on_title(sources: &CatalogSources) -> Vec<RawMetadataRecord> {
    let mut credits_by_title: HashMap<&str, Vec<&CreditRecord>> = HashMap::new();
    for credit in &sources.credits {
        credits_by_title
            .entry(credit.title.as_str())
            .or_default()
            .push(credit);
    }

    let mut joined = Vec::with_capacity(sources.movies.len());
    for movie in &sources.movies {
        let Some(credits) = credits_by_title.get(movie.title.as_str()) else {
            tracing::trace!(title = %movie.title, "No credits row for title, dropping");
            continue;
        };
        for credit in credits {
            joined.push(RawMetadataRecord {
                title: movie.title.clone(),
                overview: movie.overview.clone(),
                genres: movie.genres.clone(),
                keywords: movie.keywords.clone(),
                cast: credit.cast.clone(),
                crew: credit.crew.clone(),
            });
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const MOVIES_CSV: &str = "\
budget,genres,id,keywords,overview,title
237000000,\"[{\"\"id\"\": 28, \"\"name\"\": \"\"Action\"\"}]\",19995,[],A marine on Pandora.,Avatar
300000000,[],285,[],,Pirates of the Caribbean
1000,[],1,[],Orphan row.,Uncredited
";

    const CREDITS_CSV: &str = "\
movie_id,title,cast,crew
19995,Avatar,\"[{\"\"name\"\": \"\"Sam Worthington\"\"}]\",\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"James Cameron\"\"}]\"
285,Pirates of the Caribbean,[],[]
285,Pirates of the Caribbean,[],\"[{\"\"job\"\": \"\"Director\"\", \"\"name\"\": \"\"Gore Verbinski\"\"}]\"
9,Credits Only,[],[]
";

    fn sources() -> CatalogSources {
        CatalogSources::from_readers(MOVIES_CSV.as_bytes(), CREDITS_CSV.as_bytes()).unwrap()
    }

    #[test]
    fn test_from_readers_ignores_extra_columns() {
        let sources = sources();
        assert_eq!(sources.movies.len(), 3);
        assert_eq!(sources.credits.len(), 4);
        assert_eq!(sources.movies[0].title, "Avatar");
        assert_eq!(
            sources.movies[0].genres.as_deref(),
            Some(r#"[{"id": 28, "name": "Action"}]"#)
        );
    }

    #[test]
    fn test_empty_cell_reads_as_absent() {
        let sources = sources();
        assert_eq!(sources.movies[1].overview, None);
    }

    #[test]
    fn test_missing_title_column_fails() {
        let movies = "id,overview,genres,keywords\n1,Nothing,[],[]\n";
        let result = CatalogSources::from_readers(movies.as_bytes(), CREDITS_CSV.as_bytes());
        assert!(matches!(
            result,
            Err(AppError::MissingColumn { table: "movies", column: "title" })
        ));
    }

    #[test]
    fn test_missing_genres_column_fails() {
        let movies = "title,overview,keywords\nAvatar,A marine.,[]\n";
        let result = CatalogSources::from_readers(movies.as_bytes(), CREDITS_CSV.as_bytes());
        assert!(matches!(
            result,
            Err(AppError::MissingColumn { table: "movies", column: "genres" })
        ));
    }

    #[test]
    fn test_missing_crew_column_fails() {
        let credits = "title,cast\nAvatar,[]\n";
        let result = CatalogSources::from_readers(MOVIES_CSV.as_bytes(), credits.as_bytes());
        assert!(matches!(
            result,
            Err(AppError::MissingColumn { table: "credits", column: "crew" })
        ));
    }

    #[test]
    fn test_title_only_tables_fail() {
        let result = CatalogSources::from_readers(
            "title\nAvatar\nAlien\n".as_bytes(),
            "title\nAvatar\nAlien\n".as_bytes(),
        );
        assert!(matches!(
            result,
            Err(AppError::MissingColumn { table: "movies", column: "overview" })
        ));
    }

    #[test]
    fn test_load_sources_missing_file_fails() {
        let result = load_sources("/nonexistent/movies.csv", "/nonexistent/credits.csv");
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_join_drops_unmatched_and_duplicates_repeated_titles() {
        let joined = join_on_title(&sources());
        let titles: Vec<_> = joined.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Avatar", "Pirates of the Caribbean", "Pirates of the Caribbean"]
        );
        assert_eq!(joined[0].overview.as_deref(), Some("A marine on Pandora."));
        assert_eq!(joined[2].crew.as_deref(), Some(r#"[{"job": "Director", "name": "Gore Verbinski"}]"#));
    }

    #[test]
    fn test_join_is_case_sensitive() {
        let sources = CatalogSources {
            movies: vec![MovieRecord {
                title: "Avatar".to_string(),
                overview: None,
                genres: None,
                keywords: None,
            }],
            credits: vec![CreditRecord {
                title: "avatar".to_string(),
                cast: None,
                crew: None,
            }],
        };
        assert!(join_on_title(&sources).is_empty());
    }
}
