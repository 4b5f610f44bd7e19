use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// 票号倒序异常的详细信息，交由操作员确认后重新扫描
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SequenceAnomaly {
    pub book_number: String,
    pub game_name: String,
    pub prior_ticket: i32,
    pub current_ticket: i32,
}

impl fmt::Display for SequenceAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket {} is higher than the last scanned ticket {} for book {}",
            self.current_ticket, self.prior_ticket, self.book_number
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LotteryError {
    #[error("Invalid format '{input}', expected {expected}")]
    InvalidFormat {
        input: String,
        expected: &'static str,
    },

    #[error("Game {0} not found")]
    GameNotFound(String),

    #[error("Game {0} already exists")]
    GameAlreadyExists(String),

    #[error("Daily report {0} not found")]
    ReportNotFound(i64),

    #[error("Book {game_number}-{book_number} not found")]
    BookNotFound {
        game_number: String,
        book_number: String,
    },

    #[error("Book {game_number}-{book_number} already exists in inventory")]
    BookAlreadyExists {
        game_number: String,
        book_number: String,
    },

    #[error("Book {game_number}-{book_number} is already activated")]
    AlreadyActivated {
        game_number: String,
        book_number: String,
    },

    #[error("Book {game_number}-{book_number} cannot move from {from} to {to}")]
    InvalidTransition {
        game_number: String,
        book_number: String,
        from: String,
        to: String,
    },

    #[error("Book {game_number}-{book_number} was already scanned today")]
    DuplicateScan {
        game_number: String,
        book_number: String,
    },

    #[error("{0}")]
    SequenceAnomaly(SequenceAnomaly),

    #[error("Invalid ticket sequence: start {start}, current {current}")]
    InvalidSequence { start: i32, current: i32 },

    #[error("Quantity {quantity} exceeds book capacity of {tickets_per_book}")]
    ExceedsBookCapacity { quantity: i32, tickets_per_book: i32 },

    #[error("Book {book_number} has no reference number and no prior scan")]
    MissingReferenceNumber { book_number: String },

    #[error("Timed out while looking up previous scans")]
    ScanLookupTimeout,
}

impl LotteryError {
    pub fn invalid_format(input: &str, expected: &'static str) -> Self {
        LotteryError::InvalidFormat {
            input: input.to_string(),
            expected,
        }
    }

    /// 对外稳定的错误码
    pub fn code(&self) -> &'static str {
        match self {
            LotteryError::InvalidFormat { .. } => "INVALID_FORMAT",
            LotteryError::GameNotFound(_) => "GAME_NOT_FOUND",
            LotteryError::GameAlreadyExists(_) => "GAME_ALREADY_EXISTS",
            LotteryError::ReportNotFound(_) => "REPORT_NOT_FOUND",
            LotteryError::BookNotFound { .. } => "BOOK_NOT_FOUND",
            LotteryError::BookAlreadyExists { .. } => "BOOK_ALREADY_EXISTS",
            LotteryError::AlreadyActivated { .. } => "ALREADY_ACTIVATED",
            LotteryError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LotteryError::DuplicateScan { .. } => "DUPLICATE_SCAN",
            LotteryError::SequenceAnomaly(_) => "SEQUENCE_ANOMALY",
            LotteryError::InvalidSequence { .. } => "INVALID_SEQUENCE",
            LotteryError::ExceedsBookCapacity { .. } => "EXCEEDS_BOOK_CAPACITY",
            LotteryError::MissingReferenceNumber { .. } => "MISSING_REFERENCE_NUMBER",
            LotteryError::ScanLookupTimeout => "SCAN_LOOKUP_TIMEOUT",
        }
    }

    /// 需要随错误一起返回给调用方的结构化信息
    pub fn details(&self) -> Option<Value> {
        match self {
            LotteryError::SequenceAnomaly(anomaly) => serde_json::to_value(anomaly).ok(),
            _ => None,
        }
    }
}
