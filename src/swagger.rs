use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::BookStatus;
use crate::handlers;
use crate::lottery::{FreshBookStart, OnlineFigures, Reconciliation, SequenceAnomaly};
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::game::create_game,
        handlers::game::list_games,
        handlers::game::get_game,
        handlers::book::add_book,
        handlers::book::activate_book,
        handlers::book::return_book,
        handlers::book::mark_book_sold,
        handlers::book::list_books,
        handlers::report::upsert_report,
        handlers::report::get_report,
        handlers::report::recalculate_report,
        handlers::report::scan_ticket,
        handlers::report::list_scans,
        handlers::reconcile::reconcile_figures,
        handlers::audit::list_audit_logs,
    ),
    components(
        schemas(
            CreateGameRequest,
            GameResponse,
            BookStatus,
            BookLifecycleRequest,
            BookListQuery,
            BookResponse,
            BookPage,
            UpsertDailyReportRequest,
            DailyReportResponse,
            OnlineFigures,
            ScanTicketRequest,
            ScannedTicketResponse,
            ReconcileRequest,
            Reconciliation,
            SequenceAnomaly,
            FreshBookStart,
            AuditLogQuery,
            AuditLogResponse,
            AuditLogPage,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "lottery_game", description = "Lottery game catalogue API"),
        (name = "lottery_book", description = "Book lifecycle API"),
        (name = "lottery_report", description = "Daily report, ticket scan and reconciliation API"),
        (name = "lottery_audit", description = "Book lifecycle audit log API"),
    ),
    info(
        title = "Lottery Backend API",
        version = "1.0.0",
        description = "Lottery book inventory, ticket scan and daily reconciliation REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
