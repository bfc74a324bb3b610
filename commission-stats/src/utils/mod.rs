//! 工具模块 - 日志、金额、时间

pub mod logger;
pub mod money;
pub mod time;

pub use money::{delta_percent, percent_of, round_money};
