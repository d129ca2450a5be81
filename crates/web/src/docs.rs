use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::features::{health, profile, races, registrations, results, runners};
use crate::middleware::auth::API_KEY_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        races::handlers::list_races,
        races::handlers::get_race,
        races::handlers::get_distance,
        races::handlers::create_race,
        races::handlers::add_distance,
        races::handlers::update_race_status,
        runners::handlers::create_runner,
        runners::handlers::issue_token,
        registrations::handlers::register,
        registrations::handlers::list_registrations,
        registrations::handlers::get_registration,
        registrations::handlers::confirm_payment,
        registrations::handlers::cancel_registration,
        results::handlers::record_result,
        results::handlers::get_result,
        results::handlers::list_results,
        profile::handlers::get_profile,
    ),
    components(
        schemas(
            storage::dto::race::CreateRaceRequest,
            storage::dto::race::CreateDistanceCategoryRequest,
            storage::dto::race::UpdateRaceStatusRequest,
            storage::dto::race::RaceResponse,
            storage::dto::race::RaceDetailResponse,
            storage::dto::race::DistanceCategoryResponse,
            storage::dto::race::DistanceContextResponse,
            storage::dto::runner::CreateRunnerRequest,
            storage::dto::runner::RunnerResponse,
            storage::dto::registration::RegisterRequest,
            storage::dto::registration::RegistrationSummary,
            storage::dto::registration::RaceInfo,
            storage::dto::registration::DistanceInfo,
            storage::dto::result::RecordResultRequest,
            storage::dto::result::ResultSummary,
            storage::dto::profile::ProfileResponse,
            storage::dto::profile::RunnerStatistics,
            storage::dto::profile::BestTimes,
            storage::dto::profile::PersonalRecord,
            storage::dto::profile::ActivityItem,
            storage::dto::profile::ActivityKind,
            storage::models::RaceStatus,
            storage::models::PaymentStatus,
            storage::models::ResultStatus,
            storage::models::FinishTime,
            runners::handlers::TokenResponse,
            health::handlers::HealthResponse,
        )
    ),
    tags(
        (name = "races", description = "Race catalog and moderation"),
        (name = "runners", description = "Runner accounts and tokens"),
        (name = "registrations", description = "Registration ledger"),
        (name = "results", description = "Race results"),
        (name = "profile", description = "Runner statistics"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
            components.add_security_scheme(
                "runner_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
