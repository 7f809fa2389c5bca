use regex::Regex;

use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_title_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title name cannot be empty".to_string(),
            ));
        }
        if name.len() > 255 {
            return Err(AppError::ValidationError(
                "Title name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_genre_name(name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Genre name cannot be empty".to_string(),
            ));
        }
        if name.len() > 100 {
            return Err(AppError::ValidationError(
                "Genre name too long (max 100 characters)".to_string(),
            ));
        }

        // Letters, digits, spaces and a few separators ("Science Fiction", "Sci-Fi & Fantasy")
        let re = Regex::new(r"^[\p{L}\p{N}\s\-&'.]+$").unwrap();
        if !re.is_match(name) {
            return Err(AppError::ValidationError(
                "Genre name contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_person_name(full_name: &str) -> Result<(), AppError> {
        if full_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Person name cannot be empty".to_string(),
            ));
        }
        if full_name.len() > 255 {
            return Err(AppError::ValidationError(
                "Person name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_release_year(year: i32) -> Result<(), AppError> {
        if !(1870..=2100).contains(&year) {
            return Err(AppError::ValidationError(
                "Release year must be between 1870 and 2100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_external_id(id: i64) -> Result<(), AppError> {
        if id <= 0 {
            return Err(AppError::ValidationError(
                "External id must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
