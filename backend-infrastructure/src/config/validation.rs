use anyhow::{anyhow, Result};
use chrono::NaiveDate;

pub fn validate_radius_km(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(anyhow!("geofence_radius_km must be a positive number"));
    }
    Ok(())
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_must_be_positive_and_finite() {
        assert!(validate_radius_km(0.1).is_ok());
        assert!(validate_radius_km(1.0).is_ok());
        assert!(validate_radius_km(0.0).is_err());
        assert!(validate_radius_km(-0.5).is_err());
        assert!(validate_radius_km(f64::NAN).is_err());
        assert!(validate_radius_km(f64::INFINITY).is_err());
    }

    #[test]
    fn parse_date_expects_iso_calendar_date() {
        assert_eq!(
            parse_date(" 2026-10-19 ").expect("date"),
            NaiveDate::from_ymd_opt(2026, 10, 19).expect("date")
        );
        assert!(parse_date("19/10/2026").is_err());
    }
}
