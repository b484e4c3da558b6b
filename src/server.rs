use std::sync::Arc;

use poem::endpoint::StaticFilesEndpoint;
use poem::middleware::Tracing;
use poem::{Endpoint, EndpointExt, IntoEndpoint, Route};
use poem_openapi::OpenApiService;
use poem_openapi::error::AuthorizationError;

use crate::api::{AccessGate, AdminApi, AuthApi, HealthApi, ReservationApi};
use crate::app_data::AppData;
use crate::config::BootstrapSettings;
use crate::errors::api::AuthError;
use crate::errors::internal::{AccessError, InternalError};
use crate::services::{IdentityService, ReservationService};

/// Compose the route tree
///
/// `/api` carries the OpenAPI service, `/swagger` its UI and `/files` serves
/// uploaded documents from the upload directory. Requests rejected by the
/// bearer scheme itself (no Authorization header) get the same 401 envelope
/// as a bad token.
pub fn build_app(app_data: Arc<AppData>, settings: &BootstrapSettings) -> impl Endpoint + use<> {
    let identity = Arc::new(IdentityService::new(app_data.clone()));
    let reservations = Arc::new(ReservationService::new(app_data.clone()));
    let gate = Arc::new(AccessGate::new(app_data.token_service.clone()));

    let apis = (
        HealthApi,
        AuthApi::new(identity.clone(), gate.clone()),
        AdminApi::new(identity, gate.clone()),
        ReservationApi::new(reservations, gate),
    );

    let api_service = OpenApiService::new(apis, "Reservation Platform API", env!("CARGO_PKG_VERSION"))
        .server(format!("http://{}/api", settings.server_address()));
    let ui = api_service.swagger_ui();

    Route::new()
        .nest(
            "/api",
            api_service.into_endpoint().catch_error(|_: AuthorizationError| async {
                AuthError::from(InternalError::from(AccessError::Unauthenticated))
            }),
        )
        .nest("/swagger", ui)
        .nest("/files", StaticFilesEndpoint::new(settings.upload_dir()))
        .with(Tracing)
}
