use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;

/// 向前逐日查找的游标
///
/// 从扫描日期的前一天开始，最多回溯 `max_days` 天；
/// 游标早于票本激活日期时立即停止。
#[derive(Debug, Clone)]
pub struct DaySearch {
    cursor: NaiveDate,
    remaining: u32,
    not_before: Option<NaiveDate>,
}

impl DaySearch {
    pub fn new(scan_date: NaiveDate, not_before: Option<NaiveDate>, max_days: u32) -> Self {
        Self {
            cursor: scan_date,
            remaining: max_days,
            not_before,
        }
    }
}

impl Iterator for DaySearch {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let day = self.cursor.pred_opt()?;
        if let Some(floor) = self.not_before
            && day < floor
        {
            self.remaining = 0;
            return None;
        }
        self.cursor = day;
        self.remaining -= 1;
        Some(day)
    }
}

/// 回溯下限
///
/// 激活时间为 UTC，报表日期为门店本地营业日。任何时区的本地激活日期
/// 都不早于 UTC 日期的前一天，因此以该日为下限。
pub fn search_floor(activated_at: DateTime<Utc>) -> Option<NaiveDate> {
    activated_at.date_naive().pred_opt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorScan {
    pub scanned_on: NaiveDate,
    pub ticket_number: i32,
}

/// 逐日调用 `lookup`，返回最近一次扫描；每一天是一次独立读取
pub async fn find_last_scanned<F, Fut, E>(
    search: DaySearch,
    mut lookup: F,
) -> Result<Option<PriorScan>, E>
where
    F: FnMut(NaiveDate) -> Fut,
    Fut: Future<Output = Result<Option<i32>, E>>,
{
    for day in search {
        if let Some(ticket_number) = lookup(day).await? {
            return Ok(Some(PriorScan {
                scanned_on: day,
                ticket_number,
            }));
        }
    }
    Ok(None)
}
