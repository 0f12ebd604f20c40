//! Presence, type and size checks shared by the decoders.

use crate::ecl::EclType;
use crate::error::RestartError;
use crate::source::{KeywordData, KeywordSource};

/// Fails with the first name in `names` the source does not hold.
pub fn require<S: KeywordSource + ?Sized>(src: &S, names: &[&str]) -> Result<(), RestartError> {
    match names.iter().find(|name| !src.contains(name)) {
        Some(name) => Err(RestartError::missing(name)),
        None => Ok(()),
    }
}

pub fn validate_count(
    data: &KeywordData,
    expected: usize,
    name: &str,
) -> Result<(), RestartError> {
    let actual = data.len();
    if actual != expected {
        return Err(RestartError::CellCountMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// First occurrence of `name`, which must exist.
pub fn fetch<S: KeywordSource + ?Sized>(
    src: &mut S,
    name: &str,
) -> Result<KeywordData, RestartError> {
    src.first(name)?.ok_or_else(|| RestartError::missing(name))
}

/// Widens a `REAL` keyword to `f64`; exact for every `f32`.
pub fn into_real(data: KeywordData, name: &str) -> Result<Vec<f64>, RestartError> {
    match data {
        KeywordData::Real(v) => Ok(v.into_iter().map(f64::from).collect()),
        other => Err(type_error(name, EclType::Real, &other)),
    }
}

pub fn into_doub(data: KeywordData, name: &str) -> Result<Vec<f64>, RestartError> {
    match data {
        KeywordData::Doub(v) => Ok(v),
        other => Err(type_error(name, EclType::Doub, &other)),
    }
}

fn type_error(name: &str, expected: EclType, actual: &KeywordData) -> RestartError {
    RestartError::KeywordType {
        name: name.to_string(),
        expected,
        actual: actual.ecl_type(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemContainer;

    #[test]
    fn require_names_the_first_absent_keyword() {
        let c = MemContainer::new()
            .with("PRESSURE", KeywordData::Real(vec![]))
            .with("SWAT", KeywordData::Real(vec![]));
        assert!(require(&c, &["PRESSURE", "SWAT"]).is_ok());
        assert_eq!(
            require(&c, &["PRESSURE", "TEMP", "SGAS"]).unwrap_err(),
            RestartError::MissingKeyword {
                name: "TEMP".to_string()
            }
        );
    }

    #[test]
    fn validate_count_reports_expected_and_actual() {
        let data = KeywordData::Real(vec![1.0, 2.0]);
        assert!(validate_count(&data, 2, "SGAS").is_ok());
        assert_eq!(
            validate_count(&data, 3, "SGAS").unwrap_err(),
            RestartError::CellCountMismatch {
                name: "SGAS".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn typed_extraction_rejects_other_types() {
        let err = into_real(KeywordData::Doub(vec![1.0]), "PRESSURE").unwrap_err();
        assert_eq!(
            err,
            RestartError::KeywordType {
                name: "PRESSURE".to_string(),
                expected: EclType::Real,
                actual: EclType::Doub,
            }
        );
        assert!(into_doub(KeywordData::Real(vec![1.0]), "OPM_XWEL").is_err());
        assert_eq!(
            into_real(KeywordData::Real(vec![0.25]), "SWAT").unwrap(),
            vec![0.25]
        );
    }

    #[test]
    fn fetch_missing_is_an_error() {
        let mut c = MemContainer::new();
        assert_eq!(
            fetch(&mut c, "OPM_XWEL").unwrap_err(),
            RestartError::missing("OPM_XWEL")
        );
    }
}
