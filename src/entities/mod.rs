pub mod audit_logs;
pub mod daily_lottery_reports;
pub mod inventory_books;
pub mod lottery_games;
pub mod scanned_tickets;

pub use audit_logs as audit_log_entity;
pub use daily_lottery_reports as daily_report_entity;
pub use inventory_books as inventory_book_entity;
pub use lottery_games as game_entity;
pub use scanned_tickets as scanned_ticket_entity;

pub use inventory_books::BookStatus;
