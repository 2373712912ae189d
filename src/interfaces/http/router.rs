//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, PaymentService};
use crate::auth::JwtConfig;
use crate::interfaces::http::modules::appointments::{self, AppointmentAppState};
use crate::interfaces::http::modules::catalog::{self, CatalogAppState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::payments::{self, PaymentAppState};
use crate::interfaces::http::modules::slots::{self, SlotAppState};

/// Unified state for all booking routes. Axum extracts each handler's
/// specific state via `FromRef`.
#[derive(Clone)]
pub struct BookingUnifiedState {
    pub booking: Arc<BookingService>,
    pub payments: Arc<PaymentService>,
    pub jwt: JwtConfig,
    pub started_at: Arc<Instant>,
}

impl FromRef<BookingUnifiedState> for AppointmentAppState {
    fn from_ref(s: &BookingUnifiedState) -> Self {
        AppointmentAppState {
            booking: Arc::clone(&s.booking),
            jwt: s.jwt.clone(),
        }
    }
}

impl FromRef<BookingUnifiedState> for SlotAppState {
    fn from_ref(s: &BookingUnifiedState) -> Self {
        SlotAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<BookingUnifiedState> for CatalogAppState {
    fn from_ref(s: &BookingUnifiedState) -> Self {
        CatalogAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<BookingUnifiedState> for PaymentAppState {
    fn from_ref(s: &BookingUnifiedState) -> Self {
        PaymentAppState {
            payments: Arc::clone(&s.payments),
        }
    }
}

impl FromRef<BookingUnifiedState> for HealthState {
    fn from_ref(s: &BookingUnifiedState) -> Self {
        HealthState {
            started_at: Arc::clone(&s.started_at),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
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

#[derive(OpenApi)]
#[openapi(
    paths(
        appointments::handlers::create_appointment,
        appointments::handlers::list_appointments,
        appointments::handlers::get_appointment,
        appointments::handlers::appointments_by_customer,
        appointments::handlers::appointments_by_range,
        appointments::handlers::update_status,
        appointments::handlers::assign_employees,
        appointments::handlers::cancel_appointment,
        appointments::handlers::validate_booking,
        slots::handlers::slots_for_date,
        slots::handlers::get_slot,
        catalog::handlers::list_modifications,
        payments::handlers::create_payment_intent,
        health::handlers::health_check,
    ),
    components(schemas(
        appointments::dto::CreateAppointmentRequest,
        appointments::dto::AppointmentDto,
        appointments::dto::UpdateStatusRequest,
        appointments::dto::AssignEmployeesRequest,
        appointments::dto::ValidateBookingRequest,
        appointments::dto::BookingCheckDto,
        slots::dto::TimeSlotDto,
        catalog::dto::ModificationItemDto,
        payments::dto::PaymentIntentRequest,
        payments::dto::PaymentIntentResponse,
        health::handlers::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Appointments", description = "Appointment lifecycle"),
        (name = "Slots", description = "Time slot availability"),
        (name = "Catalog", description = "Modification catalog"),
        (name = "Payments", description = "Payment intents"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

/// Build the complete application router.
pub fn create_router(state: BookingUnifiedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/bookings/appointments",
            post(appointments::handlers::create_appointment)
                .get(appointments::handlers::list_appointments),
        )
        .route(
            "/api/bookings/appointments/range",
            get(appointments::handlers::appointments_by_range),
        )
        .route(
            "/api/bookings/appointments/customer/{customer_id}",
            get(appointments::handlers::appointments_by_customer),
        )
        .route(
            "/api/bookings/appointments/{id}",
            get(appointments::handlers::get_appointment)
                .delete(appointments::handlers::cancel_appointment),
        )
        .route(
            "/api/bookings/appointments/{id}/status",
            put(appointments::handlers::update_status),
        )
        .route(
            "/api/bookings/appointments/{id}/assign-employees",
            put(appointments::handlers::assign_employees),
        )
        .route(
            "/api/bookings/validate",
            post(appointments::handlers::validate_booking),
        )
        .route("/api/bookings/slots", get(slots::handlers::slots_for_date))
        .route("/api/bookings/slots/{id}", get(slots::handlers::get_slot))
        .route(
            "/api/modifications",
            get(catalog::handlers::list_modifications),
        )
        .route(
            "/api/bookings/{id}/payment-intent",
            post(payments::handlers::create_payment_intent),
        )
        .route("/health", get(health::handlers::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
