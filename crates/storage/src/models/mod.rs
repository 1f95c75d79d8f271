pub mod account;
pub mod athlete_profile;
pub mod coach_profile;
pub mod coach_request;
pub mod registration;
pub mod role;
pub mod tournament;

pub use account::Account;
pub use athlete_profile::{Achievement, AchievementKind, AthleteLevel, AthleteProfile};
pub use coach_profile::CoachProfile;
pub use coach_request::{CoachRequest, RequestStatus};
pub use registration::{Registration, RegistrationStatus};
pub use role::{AccountStatus, Role, VerificationStatus};
pub use tournament::{Sport, Tournament, TournamentStatus, Visibility};
