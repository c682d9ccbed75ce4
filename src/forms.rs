use serde::Deserialize;

use crate::entities::movie;

/// Per-field validation messages, in field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
}

impl AddForm {
    /// Returns the trimmed title to search for.
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let title = self.title.trim();
        if title.is_empty() {
            let mut errors = FieldErrors::default();
            errors.push("title", "Title is required.");
            return Err(errors);
        }
        Ok(title.to_string())
    }
}

/// Rating is kept as submitted text so a malformed number re-renders the form
/// instead of failing extraction.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rating {
    pub rating: f64,
    pub review: String,
}

impl RateForm {
    pub fn from_movie(movie: &movie::Model) -> Self {
        Self { rating: movie.rating.to_string(), review: movie.review.clone().unwrap_or_default() }
    }

    pub fn validate(&self) -> Result<Rating, FieldErrors> {
        let mut errors = FieldErrors::default();

        let rating = match self.rating.trim() {
            "" => {
                errors.push("rating", "Rating is required.");
                None
            },
            raw => match raw.parse::<f64>() {
                Ok(r) if r.is_finite() && (0.0..=10.0).contains(&r) => Some(r),
                Ok(_) => {
                    errors.push("rating", "Rating must be between 0 and 10.");
                    None
                },
                Err(_) => {
                    errors.push("rating", "Rating must be a number, e.g. 7.5.");
                    None
                },
            },
        };

        let review = self.review.trim();
        if review.is_empty() {
            errors.push("review", "Review is required.");
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok(Rating { rating, review: review.to_string() }),
            _ => Err(errors),
        }
    }
}
