//! Commission Stats - 保险销售佣金统计与目标追踪引擎
//!
//! # 架构概述
//!
//! 纯函数式、同步的统计管线，输入为调用方已加载的销售行、目标与奖金规则：
//!
//! - **销售导入** (`sales`): 两种原始销售行统一为 `SaleRecord`，按时间段过滤
//! - **统计** (`stats`): 汇总、排行榜、环比趋势
//! - **目标** (`objectives`): 目标进度计算与奖金档位匹配
//! - **引擎** (`engine`): 报表级门面，使用 `Config` 中的时区与显示上限
//!
//! # 模块结构
//!
//! ```text
//! commission-stats/src/
//! ├── core/          # 配置、错误
//! ├── sales/         # 规范化、时间段、险种条目
//! ├── stats/         # 汇总、排名、趋势
//! ├── objectives/    # 进度、奖金
//! ├── engine.rs      # 门面
//! └── utils/         # 日志、金额、时间
//! ```

pub mod core;
pub mod engine;
pub mod objectives;
pub mod sales;
pub mod stats;
pub mod utils;

// Re-export 公共类型
pub use self::core::{Config, StatsError, StatsResult, setup_environment};
pub use engine::{CommissionEngine, EmployeeSummary, PeriodReport};
pub use objectives::{
    ObjectiveCalculator, ObjectiveEvaluation, ProgressResult, compute_objective_progress,
    evaluate_objectives, resolve_bonus,
};
pub use sales::{DateRange, Normalizer, PeriodPreset, filter_period, normalize};
pub use stats::{
    AggregateResult, GroupBy, RankedEntry, Totals, TrendResult, aggregate, compare_trend,
    rank_employees,
};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
