use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::{LotteryError, SequenceAnomaly, parse_ticket_number};

/// 没有历史扫描记录时，起始票号的取法
///
/// - `ReferenceNumber`: 使用票本的参考号（现有业务数据的实际行为）
/// - `FullBook`: 视为整本未售，起始票号为 `tickets_per_book - 1`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FreshBookStart {
    #[default]
    ReferenceNumber,
    FullBook,
}

impl fmt::Display for FreshBookStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreshBookStart::ReferenceNumber => write!(f, "reference_number"),
            FreshBookStart::FullBook => write!(f, "full_book"),
        }
    }
}

impl FromStr for FreshBookStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference_number" => Ok(FreshBookStart::ReferenceNumber),
            "full_book" => Ok(FreshBookStart::FullBook),
            other => Err(format!("unknown fresh book start mode: {other}")),
        }
    }
}

/// 一次扫描计算所需的全部输入
#[derive(Debug, Clone)]
pub struct ScanInput<'a> {
    pub game_name: &'a str,
    pub book_number: &'a str,
    pub price_cents: i64,
    pub tickets_per_book: i32,
    pub reference_number: Option<&'a str>,
    /// 最近一次扫描的票号（向前按天查找得到）
    pub prior_ticket: Option<i32>,
    pub current_ticket: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanComputation {
    pub start_number: i32,
    pub quantity_sold: i32,
    pub total_cents: i64,
}

/// 起始票号：优先使用上次扫描票号，否则按配置从票本推导
pub fn resolve_start_number(
    prior_ticket: Option<i32>,
    reference_number: Option<&str>,
    tickets_per_book: i32,
    mode: FreshBookStart,
    book_number: &str,
) -> Result<i32, LotteryError> {
    if let Some(prior) = prior_ticket {
        return Ok(prior);
    }
    match mode {
        FreshBookStart::ReferenceNumber => reference_number
            .and_then(parse_ticket_number)
            .ok_or_else(|| LotteryError::MissingReferenceNumber {
                book_number: book_number.to_string(),
            }),
        FreshBookStart::FullBook => Ok(tickets_per_book - 1),
    }
}

/// 票号随售出递减；本次票号大于上次票号说明录入顺序有误
pub fn check_sequence(
    prior_ticket: Option<i32>,
    current_ticket: i32,
    book_number: &str,
    game_name: &str,
) -> Result<(), LotteryError> {
    match prior_ticket {
        Some(prior) if current_ticket > prior => {
            Err(LotteryError::SequenceAnomaly(SequenceAnomaly {
                book_number: book_number.to_string(),
                game_name: game_name.to_string(),
                prior_ticket: prior,
                current_ticket,
            }))
        }
        _ => Ok(()),
    }
}

/// `start - current + 1`，必须落在 `[0, tickets_per_book]` 内
pub fn quantity_sold(
    start_number: i32,
    current_ticket: i32,
    tickets_per_book: i32,
) -> Result<i32, LotteryError> {
    let quantity = start_number - current_ticket + 1;
    if quantity < 0 {
        return Err(LotteryError::InvalidSequence {
            start: start_number,
            current: current_ticket,
        });
    }
    if quantity > tickets_per_book {
        return Err(LotteryError::ExceedsBookCapacity {
            quantity,
            tickets_per_book,
        });
    }
    Ok(quantity)
}

pub fn compute_scan(
    input: &ScanInput<'_>,
    mode: FreshBookStart,
) -> Result<ScanComputation, LotteryError> {
    let start_number = resolve_start_number(
        input.prior_ticket,
        input.reference_number,
        input.tickets_per_book,
        mode,
        input.book_number,
    )?;
    check_sequence(
        input.prior_ticket,
        input.current_ticket,
        input.book_number,
        input.game_name,
    )?;
    let quantity = quantity_sold(start_number, input.current_ticket, input.tickets_per_book)?;

    Ok(ScanComputation {
        start_number,
        quantity_sold: quantity,
        total_cents: i64::from(quantity) * input.price_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        prior: Option<i32>,
        reference: Option<&'static str>,
        current: i32,
    ) -> ScanInput<'static> {
        ScanInput {
            game_name: "Lucky 7s",
            book_number: "456789",
            price_cents: 100,
            tickets_per_book: 150,
            reference_number: reference,
            prior_ticket: prior,
            current_ticket: current,
        }
    }

    #[test]
    fn test_prior_scan_drives_quantity() {
        let result =
            compute_scan(&input(Some(120), Some("0"), 100), FreshBookStart::default()).unwrap();
        assert_eq!(
            result,
            ScanComputation {
                start_number: 120,
                quantity_sold: 21,
                total_cents: 2100,
            }
        );
    }

    #[test]
    fn test_same_ticket_as_prior_counts_one() {
        let result = compute_scan(&input(Some(80), None, 80), FreshBookStart::default()).unwrap();
        assert_eq!(result.quantity_sold, 1);
    }

    #[test]
    fn test_fresh_book_with_reference_start_is_invalid_sequence() {
        // 参考号 "0" 作为起始票号，0 - 149 + 1 = -148
        let err = compute_scan(&input(None, Some("0"), 149), FreshBookStart::ReferenceNumber)
            .unwrap_err();
        assert_eq!(
            err,
            LotteryError::InvalidSequence {
                start: 0,
                current: 149
            }
        );
    }

    #[test]
    fn test_fresh_book_with_reference_start_zero_ticket() {
        let result =
            compute_scan(&input(None, Some("5"), 0), FreshBookStart::ReferenceNumber).unwrap();
        assert_eq!(result.quantity_sold, 6);
        assert_eq!(result.total_cents, 600);
    }

    #[test]
    fn test_fresh_book_full_book_start() {
        let result = compute_scan(&input(None, None, 149), FreshBookStart::FullBook).unwrap();
        assert_eq!(result.start_number, 149);
        assert_eq!(result.quantity_sold, 1);

        let result = compute_scan(&input(None, None, 0), FreshBookStart::FullBook).unwrap();
        assert_eq!(result.quantity_sold, 150);
    }

    #[test]
    fn test_missing_reference_without_prior() {
        for reference in [None, Some(""), Some("x")] {
            let err = compute_scan(&input(None, reference, 3), FreshBookStart::ReferenceNumber)
                .unwrap_err();
            assert!(matches!(err, LotteryError::MissingReferenceNumber { .. }));
        }
    }

    #[test]
    fn test_higher_ticket_than_prior_is_anomaly() {
        let err = compute_scan(&input(Some(40), Some("0"), 55), FreshBookStart::default())
            .unwrap_err();
        assert_eq!(
            err,
            LotteryError::SequenceAnomaly(SequenceAnomaly {
                book_number: "456789".into(),
                game_name: "Lucky 7s".into(),
                prior_ticket: 40,
                current_ticket: 55,
            })
        );
    }

    #[test]
    fn test_quantity_bounds() {
        assert_eq!(quantity_sold(149, 0, 150), Ok(150));
        assert_eq!(
            quantity_sold(150, 0, 150),
            Err(LotteryError::ExceedsBookCapacity {
                quantity: 151,
                tickets_per_book: 150
            })
        );
        // start - current + 1 == 0 仍然合法
        assert_eq!(quantity_sold(4, 5, 150), Ok(0));
        assert!(matches!(
            quantity_sold(4, 6, 150),
            Err(LotteryError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn test_fresh_book_start_parse() {
        assert_eq!(
            "full_book".parse::<FreshBookStart>(),
            Ok(FreshBookStart::FullBook)
        );
        assert_eq!(
            "reference_number".parse::<FreshBookStart>(),
            Ok(FreshBookStart::ReferenceNumber)
        );
        assert!("fresh".parse::<FreshBookStart>().is_err());
        assert_eq!(FreshBookStart::FullBook.to_string(), "full_book");
    }
}
