use utoipa::OpenApi;

use crate::features::{
    admin_athletes, admin_coaches, admin_profile, athlete_profile, auth, coach_profile,
    coach_requests, find_coaches, tournaments,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::athlete_signup,
        auth::handlers::athlete_login,
        auth::handlers::athlete_me,
        auth::handlers::update_athlete_me,
        auth::handlers::delete_athlete_me,
        auth::handlers::athlete_forgot_password,
        auth::handlers::athlete_reset_password,
        auth::handlers::coach_signup,
        auth::handlers::coach_login,
        auth::handlers::coach_me,
        auth::handlers::coach_forgot_password,
        auth::handlers::coach_reset_password,
        auth::handlers::admin_signup,
        auth::handlers::admin_login,
        auth::handlers::admin_me,
        athlete_profile::handlers::get_profile,
        athlete_profile::handlers::update_profile,
        athlete_profile::handlers::upload_image,
        athlete_profile::handlers::add_achievement,
        athlete_profile::handlers::delete_achievement,
        coach_profile::handlers::get_profile,
        coach_profile::handlers::update_profile,
        admin_profile::handlers::get_profile,
        admin_profile::handlers::update_profile,
        find_coaches::handlers::list_coaches,
        find_coaches::handlers::send_request,
        find_coaches::handlers::my_requests,
        coach_requests::handlers::list_requests,
        coach_requests::handlers::update_request,
        coach_requests::handlers::accepted_athletes,
        tournaments::athlete_handlers::list_tournaments,
        tournaments::athlete_handlers::my_registrations,
        tournaments::athlete_handlers::get_tournament,
        tournaments::athlete_handlers::register,
        tournaments::athlete_handlers::withdraw,
        tournaments::coach_handlers::list_tournaments,
        tournaments::coach_handlers::create_tournament,
        tournaments::coach_handlers::my_tournaments,
        tournaments::coach_handlers::register,
        tournaments::admin_handlers::list_tournaments,
        tournaments::admin_handlers::create_tournament,
        tournaments::admin_handlers::stats,
        tournaments::admin_handlers::get_tournament,
        tournaments::admin_handlers::update_tournament,
        tournaments::admin_handlers::delete_tournament,
        tournaments::admin_handlers::tournament_registrations,
        tournaments::admin_handlers::review_registration,
        admin_athletes::handlers::list_athletes,
        admin_athletes::handlers::stats,
        admin_athletes::handlers::filters,
        admin_athletes::handlers::get_athlete,
        admin_athletes::handlers::update_status,
        admin_athletes::handlers::verify_athlete,
        admin_athletes::handlers::delete_athlete,
        admin_coaches::handlers::list_coaches,
        admin_coaches::handlers::stats,
        admin_coaches::handlers::search_coaches,
        admin_coaches::handlers::pending_coaches,
        admin_coaches::handlers::get_coach,
        admin_coaches::handlers::verify_coach,
        admin_coaches::handlers::reject_coach,
        admin_coaches::handlers::verify_certificate,
    ),
    components(
        schemas(
            storage::dto::auth::AthleteSignupRequest,
            storage::dto::auth::CoachSignupRequest,
            storage::dto::auth::AdminSignupRequest,
            storage::dto::auth::LoginRequest,
            storage::dto::auth::ForgotPasswordRequest,
            storage::dto::auth::ResetPasswordRequest,
            storage::dto::auth::UpdateAccountRequest,
            storage::dto::auth::UpdateAdminProfileRequest,
            storage::dto::auth::AccountResponse,
            storage::dto::auth::AuthResponse,
            storage::dto::athlete_profile::UpdateAthleteProfileRequest,
            storage::dto::athlete_profile::UploadImageRequest,
            storage::dto::athlete_profile::AddAchievementRequest,
            storage::dto::athlete_profile::AthleteProfileResponse,
            storage::dto::coach_profile::UpdateCoachProfileRequest,
            storage::dto::coach_profile::RequestState,
            storage::dto::coach_profile::CoachListing,
            storage::dto::coach_request::SendCoachRequest,
            storage::dto::coach_request::UpdateRequestStatus,
            storage::dto::coach_request::RequestWithAthlete,
            storage::dto::coach_request::RequestWithCoach,
            storage::dto::tournament::CreateTournamentRequest,
            storage::dto::tournament::UpdateTournamentRequest,
            storage::dto::tournament::RegisterTournamentRequest,
            storage::dto::tournament::UpdateRegistrationStatus,
            storage::dto::tournament::TournamentWithRegistration,
            storage::dto::tournament::RegistrationWithTournament,
            storage::dto::tournament::RegistrationWithAccount,
            storage::dto::tournament::TournamentStats,
            storage::dto::admin::AthleteSummary,
            storage::dto::admin::AthleteDetail,
            storage::dto::admin::AthleteStats,
            storage::dto::admin::AthleteFilterOptions,
            storage::dto::admin::UpdateAccountStatusRequest,
            storage::dto::admin::CoachSort,
            storage::dto::admin::CoachSummary,
            storage::dto::admin::CoachDetail,
            storage::dto::admin::CoachStats,
            storage::dto::admin::RejectCoachRequest,
            storage::dto::admin::VerifyCertificateRequest,
            storage::dto::common::PaginationMeta,
            storage::dto::common::MessageResponse,
            storage::dto::common::CountBucket,
            storage::models::Role,
            storage::models::AccountStatus,
            storage::models::VerificationStatus,
            storage::models::AthleteLevel,
            storage::models::AchievementKind,
            storage::models::AthleteProfile,
            storage::models::Achievement,
            storage::models::CoachProfile,
            storage::models::CoachRequest,
            storage::models::RequestStatus,
            storage::models::Tournament,
            storage::models::Sport,
            storage::models::TournamentStatus,
            storage::models::Visibility,
            storage::models::Registration,
            storage::models::RegistrationStatus,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and password reset for every role"),
        (name = "athlete-profile", description = "Athlete profile and achievements"),
        (name = "coach-profile", description = "Coach profile"),
        (name = "admin-profile", description = "Admin profile"),
        (name = "find-coaches", description = "Coach discovery and training requests"),
        (name = "coach-requests", description = "Incoming training requests"),
        (name = "athlete-tournaments", description = "Tournament browsing and registration for athletes"),
        (name = "coach-tournaments", description = "Tournament browsing, creation and registration for coaches"),
        (name = "admin-tournaments", description = "Tournament administration"),
        (name = "admin-athletes", description = "Athlete administration"),
        (name = "admin-coaches", description = "Coach administration and verification"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_group_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/auth/athlete/signup",
            "/api/athlete/profile",
            "/api/athlete/find-coaches/send-request",
            "/api/coach/requests/{request_id}",
            "/api/athlete/tournaments/{id}/register",
            "/api/admin/tournaments/registrations/{registration_id}",
            "/api/admin/coaches/{id}/verify-certificate",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
