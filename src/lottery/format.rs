use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use super::LotteryError;

// \d 在 Rust regex 中会匹配 Unicode 数字，这里只接受 ASCII
static BOOK_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3})-([0-9]{6})-([0-9])$").unwrap());
static BOOK_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3})-([0-9]{6})$").unwrap());
static TICKET_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3})-([0-9]{6})-([0-9]{3})$").unwrap());
static GAME_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{3}$").unwrap());

pub const BOOK_CODE_FORMAT: &str = "GGG-BBBBBB-R";
pub const BOOK_KEY_FORMAT: &str = "GGG-BBBBBB";
pub const TICKET_CODE_FORMAT: &str = "GGG-BBBBBB-TTT";

/// 激活 / 入库使用的票本号: `GGG-BBBBBB-R`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCode {
    pub game_number: String,
    pub book_number: String,
    pub reference_number: String,
}

/// 退回 / 售罄使用的票本号: `GGG-BBBBBB`（不带参考号）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookKey {
    pub game_number: String,
    pub book_number: String,
}

/// 扫描票号: `GGG-BBBBBB-TTT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCode {
    pub game_number: String,
    pub book_number: String,
    pub ticket_number: String,
}

impl FromStr for BookCode {
    type Err = LotteryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = BOOK_CODE_RE
            .captures(s)
            .ok_or_else(|| LotteryError::invalid_format(s, BOOK_CODE_FORMAT))?;
        Ok(BookCode {
            game_number: caps[1].to_string(),
            book_number: caps[2].to_string(),
            reference_number: caps[3].to_string(),
        })
    }
}

impl BookCode {
    pub fn key(&self) -> BookKey {
        BookKey {
            game_number: self.game_number.clone(),
            book_number: self.book_number.clone(),
        }
    }
}

impl FromStr for BookKey {
    type Err = LotteryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = BOOK_KEY_RE
            .captures(s)
            .ok_or_else(|| LotteryError::invalid_format(s, BOOK_KEY_FORMAT))?;
        Ok(BookKey {
            game_number: caps[1].to_string(),
            book_number: caps[2].to_string(),
        })
    }
}

impl FromStr for TicketCode {
    type Err = LotteryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = TICKET_CODE_RE
            .captures(s)
            .ok_or_else(|| LotteryError::invalid_format(s, TICKET_CODE_FORMAT))?;
        Ok(TicketCode {
            game_number: caps[1].to_string(),
            book_number: caps[2].to_string(),
            ticket_number: caps[3].to_string(),
        })
    }
}

impl TicketCode {
    /// 票号数值（三位数字，格式已保证可解析）
    pub fn ticket_value(&self) -> i32 {
        parse_ticket_number(&self.ticket_number).unwrap_or_default()
    }
}

/// 解析已存储的票号 / 参考号
pub fn parse_ticket_number(s: &str) -> Option<i32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn validate_game_number(game_number: &str) -> Result<(), LotteryError> {
    if GAME_NUMBER_RE.is_match(game_number) {
        Ok(())
    } else {
        Err(LotteryError::invalid_format(game_number, "GGG"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_book_code() {
        let code: BookCode = "123-456789-0".parse().unwrap();
        assert_eq!(code.game_number, "123");
        assert_eq!(code.book_number, "456789");
        assert_eq!(code.reference_number, "0");
        assert_eq!(
            code.key(),
            BookKey {
                game_number: "123".into(),
                book_number: "456789".into()
            }
        );
    }

    #[test]
    fn test_book_code_rejects_malformed() {
        for input in [
            "",
            "123-456789",
            "123-456789-01",
            "12-456789-0",
            "123-45678-0",
            "123_456789_0",
            " 123-456789-0",
            "abc-456789-0",
            "١٢٣-456789-0",
        ] {
            let err = input.parse::<BookCode>().unwrap_err();
            let expected_format = match err {
                LotteryError::InvalidFormat { expected, .. } => expected,
                other => panic!("{input:?}: unexpected error {other:?}"),
            };
            assert_eq!(expected_format, BOOK_CODE_FORMAT, "{input:?}");
        }
    }

    #[test]
    fn test_book_key_requires_two_segments() {
        let key: BookKey = "123-456789".parse().unwrap();
        assert_eq!(key.book_number, "456789");
        assert!("123-456789-0".parse::<BookKey>().is_err());
        assert!("123456789".parse::<BookKey>().is_err());
    }

    #[test]
    fn test_parse_ticket_code() {
        let code: TicketCode = "123-456789-149".parse().unwrap();
        assert_eq!(code.ticket_number, "149");
        assert_eq!(code.ticket_value(), 149);

        let code: TicketCode = "123-456789-007".parse().unwrap();
        assert_eq!(code.ticket_value(), 7);

        assert!("123-456789-14".parse::<TicketCode>().is_err());
        assert!("123-456789-1490".parse::<TicketCode>().is_err());
    }

    #[test]
    fn test_parse_ticket_number() {
        assert_eq!(parse_ticket_number("0"), Some(0));
        assert_eq!(parse_ticket_number("099"), Some(99));
        assert_eq!(parse_ticket_number(""), None);
        assert_eq!(parse_ticket_number("-1"), None);
        assert_eq!(parse_ticket_number("x"), None);
    }

    #[test]
    fn test_validate_game_number() {
        assert!(validate_game_number("001").is_ok());
        assert!(validate_game_number("01").is_err());
        assert!(validate_game_number("1000").is_err());
    }
}
