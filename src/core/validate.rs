//! Reusable field validators
//!
//! Small checks applied to input payloads before any storage round trip.
//! Messages are localized; callers wrap the failing field name into a
//! [`FeriaError::Validation`].

use crate::core::error::{FeriaError, FeriaResult};

/// Non-empty after trimming
pub fn required(field: &str, value: &str) -> FeriaResult<()> {
    if value.trim().is_empty() {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: "el campo es requerido".to_string(),
        })
    } else {
        Ok(())
    }
}

/// String length within range (in characters)
pub fn string_length(field: &str, value: &str, min: usize, max: usize) -> FeriaResult<()> {
    let len = value.chars().count();
    if len < min {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("debe tener al menos {} caracteres (actualmente: {})", min, len),
        })
    } else if len > max {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("no debe superar {} caracteres (actualmente: {})", max, len),
        })
    } else {
        Ok(())
    }
}

/// Number must not be negative (prices, stock)
pub fn non_negative(field: &str, value: f64) -> FeriaResult<()> {
    if value < 0.0 {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("debe ser positivo (valor: {})", value),
        })
    } else {
        Ok(())
    }
}

/// Latitude in [-90, 90]
pub fn latitude(field: &str, value: f64) -> FeriaResult<()> {
    if !(-90.0..=90.0).contains(&value) {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("latitud fuera de rango (valor: {})", value),
        })
    } else {
        Ok(())
    }
}

/// Longitude in [-180, 180]
pub fn longitude(field: &str, value: f64) -> FeriaResult<()> {
    if !(-180.0..=180.0).contains(&value) {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("longitud fuera de rango (valor: {})", value),
        })
    } else {
        Ok(())
    }
}

/// Slug matches the URL-safe format
pub fn slug_format(field: &str, value: &str) -> FeriaResult<()> {
    if crate::core::slug::is_valid_slug(value) {
        Ok(())
    } else {
        Err(FeriaError::Validation {
            field: field.to_string(),
            message: format!("slug inválido: '{}'", value),
        })
    }
}
