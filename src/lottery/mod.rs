//! 彩票票本/扫描核心业务逻辑（纯函数，无 I/O）
//!
//! 服务层负责读写数据库，这里只负责:
//! - 票本号 / 票号格式校验
//! - 错误分类 (`LotteryError`)
//! - 售出张数与金额计算、票号顺序检查
//! - 按天向前查找上次扫描记录
//! - 每日对账计算

pub mod day_search;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod sequence;

pub use day_search::*;
pub use error::*;
pub use format::*;
pub use reconcile::*;
pub use sequence::*;
