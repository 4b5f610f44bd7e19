//! 服务层测试用的实体构造器

use crate::entities::{
    BookStatus, daily_report_entity as reports, game_entity as games,
    inventory_book_entity as books, scanned_ticket_entity as scans,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()
}

pub fn game(id: i64, game_number: &str, price_cents: i64, tickets_per_book: i32) -> games::Model {
    games::Model {
        id,
        game_number: game_number.to_string(),
        game_name: format!("Game {game_number}"),
        price_cents,
        tickets_per_book,
        is_active: true,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn book(
    id: i64,
    game_id: i64,
    book_number: &str,
    reference_number: Option<&str>,
    status: BookStatus,
) -> books::Model {
    let activated_at = (status == BookStatus::Activated).then(ts);
    books::Model {
        id,
        store_id: 1,
        game_id,
        book_number: book_number.to_string(),
        reference_number: reference_number.map(str::to_string),
        status,
        activated_at,
        returned_at: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn report(id: i64, store_id: i64, report_date: NaiveDate) -> reports::Model {
    reports::Model {
        id,
        store_id,
        report_date,
        today_online_net_sales: 0,
        yesterday_online_net_sales: 0,
        today_online_cashing: 0,
        yesterday_online_cashing: 0,
        today_instant_cashing: 0,
        yesterday_instant_cashing: 0,
        credit_sales: 0,
        debit_sales: 0,
        register_cash: 0,
        instant_sale_sr34: 0,
        total_online_balance: 0,
        over_short: 0,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn scan(
    id: i64,
    daily_report_id: i64,
    inventory_book_id: i64,
    scanned_on: NaiveDate,
    ticket_number: &str,
) -> scans::Model {
    scans::Model {
        id,
        daily_report_id,
        inventory_book_id,
        game_number: "123".to_string(),
        book_number: "456789".to_string(),
        ticket_number: ticket_number.to_string(),
        scanned_on,
        quantity_sold: 0,
        total_cents: 0,
        created_at: ts(),
    }
}
