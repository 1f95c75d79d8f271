//! Static catalogue of coaching certificates recognised per sport.

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct CertificateRecord {
    pub sport: String,
    pub authority: String,
    pub certificates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificateError {
    #[error("Invalid sport")]
    UnknownSport,

    #[error("Invalid certificate for {sport}. Expected one of: {expected}.")]
    UnknownCertificate { sport: String, expected: String },
}

static CATALOGUE: Lazy<Vec<CertificateRecord>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/valid_certificates.json")).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Certificate catalogue failed to parse, verification disabled");
        Vec::new()
    })
});

pub fn catalogue() -> &'static [CertificateRecord] {
    &CATALOGUE
}

/// Looks up `certificate_name` for `sport` (both case-insensitive) and returns
/// the issuing authority.
pub fn verify_certificate(sport: &str, certificate_name: &str) -> Result<&'static str, CertificateError> {
    verify_in(catalogue(), sport, certificate_name)
}

fn verify_in<'a>(
    records: &'a [CertificateRecord],
    sport: &str,
    certificate_name: &str,
) -> Result<&'a str, CertificateError> {
    let record = records
        .iter()
        .find(|r| r.sport.eq_ignore_ascii_case(sport.trim()))
        .ok_or(CertificateError::UnknownSport)?;

    let known = record
        .certificates
        .iter()
        .any(|c| c.eq_ignore_ascii_case(certificate_name.trim()));

    if !known {
        return Err(CertificateError::UnknownCertificate {
            sport: sport.to_string(),
            expected: record.certificates.join(", "),
        });
    }

    Ok(&record.authority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalogue_parses() {
        assert!(!catalogue().is_empty());
        assert!(catalogue().iter().all(|r| !r.certificates.is_empty()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(verify_certificate("basketball", "fiba level 1 coach"), Ok("FIBA"));
    }

    #[test]
    fn test_unknown_sport() {
        assert_eq!(
            verify_certificate("Curling", "Anything"),
            Err(CertificateError::UnknownSport)
        );
    }

    #[test]
    fn test_unknown_certificate_lists_expected() {
        let records = vec![CertificateRecord {
            sport: "Chess".into(),
            authority: "FIDE".into(),
            certificates: vec!["Trainer".into(), "Instructor".into()],
        }];
        let err = verify_in(&records, "Chess", "Grandmaster").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid certificate for Chess. Expected one of: Trainer, Instructor."
        );
    }
}
