//! Turns joined raw records into normalized catalog items.
//!
//! Every encoded field either parses cleanly or falls back to an empty value.
//! Failures are classified so the build can report how much of the source
//! data was unusable, but they never abort normalization.

use crate::models::{CatalogItem, RawMetadataRecord};
use crate::services::literal::{parse_literal, Literal, LiteralError};

const CAST_LIMIT: usize = 3;
const DIRECTOR_JOB: &str = "Director";

/// Why an encoded list-of-objects field could not be used
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("field is missing or empty")]
    Empty,

    #[error("field is malformed: {0}")]
    Malformed(#[from] LiteralError),

    #[error("field is not a list")]
    NotAList,

    #[error("list element is not an object")]
    NotAnObject,

    #[error("object has no string `{0}` field")]
    MissingKey(&'static str),
}

/// Counts of field fallbacks taken during normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    pub empty_fields: usize,
    pub malformed_fields: usize,
}

impl NormalizationStats {
    fn record(&mut self, field: &'static str, title: &str, error: &FieldParseError) {
        match error {
            FieldParseError::Empty => self.empty_fields += 1,
            _ => {
                self.malformed_fields += 1;
                tracing::debug!(
                    title = %title,
                    field = field,
                    error = %error,
                    "Falling back to empty value for malformed field"
                );
            }
        }
    }
}

/// Strictly parse an encoded field into its list of objects
fn parse_object_list(raw: Option<&str>) -> Result<Vec<Literal>, FieldParseError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(FieldParseError::Empty);
    }

    match parse_literal(raw)? {
        Literal::List(items) => Ok(items),
        _ => Err(FieldParseError::NotAList),
    }
}

fn string_field(object: &Literal, key: &'static str) -> Result<String, FieldParseError> {
    if !matches!(object, Literal::Dict(_)) {
        return Err(FieldParseError::NotAnObject);
    }
    object
        .get(key)
        .and_then(Literal::as_str)
        .map(str::to_string)
        .ok_or(FieldParseError::MissingKey(key))
}

/// Every object's `name`, in source order
pub fn extract_names(raw: Option<&str>) -> Result<Vec<String>, FieldParseError> {
    parse_object_list(raw)?
        .iter()
        .map(|object| string_field(object, "name"))
        .collect()
}

/// `name` of the first three objects only
pub fn extract_cast(raw: Option<&str>) -> Result<Vec<String>, FieldParseError> {
    parse_object_list(raw)?
        .iter()
        .take(CAST_LIMIT)
        .map(|object| string_field(object, "name"))
        .collect()
}

/// `name` of the first object whose `job` is Director.
///
/// A `job` that is present but not a string (`null`, a number) is simply not
/// a match; a missing `job` key still marks the field malformed.
pub fn extract_director(raw: Option<&str>) -> Result<String, FieldParseError> {
    for object in parse_object_list(raw)? {
        if !matches!(object, Literal::Dict(_)) {
            return Err(FieldParseError::NotAnObject);
        }
        let job = object.get("job").ok_or(FieldParseError::MissingKey("job"))?;
        if job.as_str() == Some(DIRECTOR_JOB) {
            return string_field(&object, "name");
        }
    }
    Ok(String::new())
}

/// Normalize one joined record, falling back per field on parse failure
pub fn normalize_record(record: RawMetadataRecord, stats: &mut NormalizationStats) -> CatalogItem {
    let title = record.title;

    let mut names_or_empty = |field: &'static str, raw: Option<&str>| match extract_names(raw) {
        Ok(names) => names,
        Err(e) => {
            stats.record(field, &title, &e);
            Vec::new()
        }
    };
    let genres = names_or_empty("genres", record.genres.as_deref());
    let keywords = names_or_empty("keywords", record.keywords.as_deref());

    let cast = match extract_cast(record.cast.as_deref()) {
        Ok(cast) => cast,
        Err(e) => {
            stats.record("cast", &title, &e);
            Vec::new()
        }
    };

    let director = match extract_director(record.crew.as_deref()) {
        Ok(director) => director,
        Err(e) => {
            stats.record("crew", &title, &e);
            String::new()
        }
    };

    CatalogItem {
        overview: record.overview.unwrap_or_default(),
        title,
        genres,
        keywords,
        cast,
        director,
    }
}

/// Normalize every joined record, preserving order
pub fn normalize_records(records: Vec<RawMetadataRecord>) -> (Vec<CatalogItem>, NormalizationStats) {
    let mut stats = NormalizationStats::default();
    let items = records
        .into_iter()
        .map(|record| normalize_record(record, &mut stats))
        .collect();
    (items, stats)
}
