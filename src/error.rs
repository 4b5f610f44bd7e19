use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;

use crate::lottery::LotteryError;
use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error(transparent)]
    Lottery(#[from] LotteryError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    fn lottery_status(err: &LotteryError) -> StatusCode {
        match err {
            LotteryError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,
            LotteryError::GameNotFound(_)
            | LotteryError::ReportNotFound(_)
            | LotteryError::BookNotFound { .. } => StatusCode::NOT_FOUND,
            LotteryError::AlreadyActivated { .. }
            | LotteryError::BookAlreadyExists { .. }
            | LotteryError::GameAlreadyExists(_)
            | LotteryError::InvalidTransition { .. }
            | LotteryError::DuplicateScan { .. }
            | LotteryError::SequenceAnomaly(_) => StatusCode::CONFLICT,
            LotteryError::InvalidSequence { .. }
            | LotteryError::ExceedsBookCapacity { .. }
            | LotteryError::MissingReferenceNumber { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LotteryError::ScanLookupTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Lottery(err) => Self::lottery_status(err),
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let (error_code, message, details) = match self {
            AppError::Lottery(err) => {
                // 业务拒绝属于正常流程，按 warn 记录
                log::warn!("Lottery operation rejected: {err}");
                (err.code(), err.to_string(), err.details())
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                ("VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                ("AUTH_ERROR", msg.clone(), None)
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                ("AUTH_ERROR", "Invalid access token".to_string(), None)
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ("DATABASE_ERROR", "Database error".to_string(), None)
            }
            _ => {
                log::error!("Internal error: {self}");
                ("INTERNAL_ERROR", "Internal server error".to_string(), None)
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::error(error_code, message, details))
    }
}
