//! Validation for citizen reports.
//!
//! A [`ReportForm`] holds raw user input. Validation collects every
//! problem at once and returns structured errors without touching the
//! store; only a clean form becomes an [`IssueDraft`].

use once_cell::sync::Lazy;
use regex::Regex;

use civic_core::{
    Category, CivicError, IssueDraft, Location, Priority, Reporter, Result, ValidationError,
};

/// Photos accepted per report.
pub const MAX_IMAGES: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

/// Raw report input, as typed by the citizen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
    pub reporter_name: String,
    pub reporter_email: String,
    pub images: Vec<String>,
}

impl ReportForm {
    /// Attach photos, keeping at most [`MAX_IMAGES`] in total.
    ///
    /// Returns how many were dropped.
    pub fn add_images<I, S>(&mut self, images: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dropped = 0;
        for image in images {
            if self.images.len() < MAX_IMAGES {
                self.images.push(image.into());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, "only {MAX_IMAGES} photos are kept per report");
        }
        dropped
    }

    /// The picked location, if both coordinates are present.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        let (lat, lng) = (self.lat?, self.lng?);
        let mut location = Location::from_coordinates(lat, lng);
        if let Some(address) = self.address.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            location.address = address.to_string();
        }
        Some(location)
    }

    /// Validate and convert into a draft ready for submission.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors, or `MissingLocation` when the
    /// fields are fine but no location was picked.
    pub fn into_draft(self) -> Result<IssueDraft> {
        ReportValidator::validate(&self).map_err(CivicError::from_validation_errors)?;
        let location = self.location().ok_or(CivicError::MissingLocation)?;

        let category: Category = self.category.trim().parse()?;
        let priority = match self.priority.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.parse()?,
            _ => Priority::default(),
        };
        let email = self.reporter_email.trim().to_string();
        let reporter = Reporter {
            id: email.to_lowercase(),
            name: self.reporter_name.trim().to_string(),
            email,
        };

        let mut draft = IssueDraft::new(
            self.title.trim(),
            self.description.trim(),
            category,
            location,
            reporter,
        );
        draft.priority = priority;
        draft.images = self.images;
        Ok(draft)
    }
}

/// Validates report forms.
pub struct ReportValidator;

impl ReportValidator {
    /// Validate a report form and return all validation errors found.
    ///
    /// A missing location is not a field error; see [`ReportForm::into_draft`].
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(form: &ReportForm) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }

        if form.description.trim().is_empty() {
            errors.push(ValidationError::new("description", "cannot be empty"));
        }

        let category = form.category.trim();
        if category.is_empty() {
            errors.push(ValidationError::new("category", "cannot be empty"));
        } else if category.parse::<Category>().is_err() {
            errors.push(ValidationError::new(
                "category",
                format!("unknown category '{category}'"),
            ));
        }

        if let Some(priority) = form.priority.as_deref().map(str::trim) {
            if !priority.is_empty() && priority.parse::<Priority>().is_err() {
                errors.push(ValidationError::new(
                    "priority",
                    format!("unknown priority '{priority}'"),
                ));
            }
        }

        if let Some(lat) = form.lat {
            if !(-90.0..=90.0).contains(&lat) {
                errors.push(ValidationError::new("location.lat", "must be between -90 and 90"));
            }
        }
        if let Some(lng) = form.lng {
            if !(-180.0..=180.0).contains(&lng) {
                errors.push(ValidationError::new(
                    "location.lng",
                    "must be between -180 and 180",
                ));
            }
        }

        if form.reporter_name.trim().is_empty() {
            errors.push(ValidationError::new("reporter.name", "cannot be empty"));
        }

        let email = form.reporter_email.trim();
        if email.is_empty() {
            errors.push(ValidationError::new("reporter.email", "cannot be empty"));
        } else if !is_valid_email(email) {
            errors.push(ValidationError::new("reporter.email", "is not a valid email address"));
        }

        if form.images.len() > MAX_IMAGES {
            errors.push(ValidationError::new(
                "images",
                format!("at most {MAX_IMAGES} photos allowed"),
            ));
        }
        if form.images.iter().any(|url| url.trim().is_empty()) {
            errors.push(ValidationError::new("images", "photo URL cannot be empty"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
