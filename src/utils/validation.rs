use crate::utils::error::{Result, StormError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> StormError {
    StormError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("nhc.index_url", "https://ftp.nhc.noaa.gov/atcf").is_ok());
        assert!(validate_url("nhc.index_url", "http://localhost:8080/index").is_ok());
        assert!(validate_url("nhc.index_url", "").is_err());
        assert!(validate_url("nhc.index_url", "invalid-url").is_err());
        assert!(validate_url("nhc.index_url", "ftp://ftp.nhc.noaa.gov/atcf").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("http.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("http.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_reports_field() {
        let err = validate_range("spc.era_boundary_year", 1900, 1950, 2100).unwrap_err();
        match err {
            StormError::InvalidConfigValue { field, value, .. } => {
                assert_eq!(field, "spc.era_boundary_year");
                assert_eq!(value, "1900");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(validate_range("spc.era_boundary_year", 2017, 1950, 2100).is_ok());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("http.user_agent", "stormfetch").is_ok());
        assert!(validate_non_empty_string("http.user_agent", "   ").is_err());
    }
}
