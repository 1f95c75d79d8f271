use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Achievement, AchievementKind, AthleteLevel, AthleteProfile};

/// Request payload for saving the athlete profile form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAthleteProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name and sport are required fields"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name and sport are required fields"))]
    pub sport: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub level: Option<AthleteLevel>,

    #[validate(length(max = 1000, message = "Bio cannot exceed 1000 characters"))]
    pub bio: Option<String>,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(custom(function = "validate_measurement"))]
    pub height: Option<Decimal>,

    #[validate(custom(function = "validate_measurement"))]
    pub weight: Option<Decimal>,

    #[validate(url)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    #[serde(default)]
    #[validate(url(message = "A valid imageUrl is required"))]
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAchievementRequest {
    #[serde(rename = "type")]
    pub kind: AchievementKind,

    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Type, file name and file URL are required"))]
    pub file_name: String,

    #[serde(default)]
    #[validate(url(message = "Type, file name and file URL are required"))]
    pub file_url: String,

    #[validate(length(max = 50))]
    pub file_size: Option<String>,
}

/// Athlete profile together with its achievement documents.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteProfileResponse {
    #[serde(flatten)]
    pub profile: AthleteProfile,
    pub achievements: Vec<Achievement>,
}

fn validate_measurement(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(validator::ValidationError::new("must_be_positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_requires_name_and_sport() {
        let req: UpdateAthleteProfileRequest = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let sport = &errors.field_errors()["sport"][0];
        assert_eq!(
            sport.message.as_deref(),
            Some("Name and sport are required fields")
        );
    }

    #[test]
    fn test_bio_length_capped() {
        let req: UpdateAthleteProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "Asha",
            "sport": "Tennis",
            "bio": "x".repeat(1001),
        }))
        .unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("bio"));
    }

    #[test]
    fn test_negative_height_rejected() {
        let req: UpdateAthleteProfileRequest = serde_json::from_value(serde_json::json!({
            "name": "Asha",
            "sport": "Tennis",
            "height": "-170",
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_achievement_uses_type_key() {
        let req: AddAchievementRequest = serde_json::from_value(serde_json::json!({
            "type": "participation",
            "fileName": "state-finals.pdf",
            "fileUrl": "https://cdn.example.com/state-finals.pdf",
        }))
        .unwrap();
        assert_eq!(req.kind, AchievementKind::Participation);
        assert!(req.validate().is_ok());
    }
}
