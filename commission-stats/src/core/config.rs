use chrono_tz::Tz;

use super::error::{StatsError, StatsResult};

/// 默认进度显示上限 (百分比)
pub const DEFAULT_PROGRESS_DISPLAY_CAP: f64 = 150.0;
/// 默认排行榜条目数
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// 统计引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | REPORT_TIMEZONE | UTC | 报表时区 (销售时间戳在导入时转换到该时区) |
/// | PROGRESS_DISPLAY_CAP | 150 | 目标进度显示上限 (%) |
/// | LEADERBOARD_SIZE | 10 | 报表排行榜条目数 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 滚动日志目录 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// REPORT_TIMEZONE=Europe/Paris PROGRESS_DISPLAY_CAP=200 cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 报表时区
    pub timezone: Tz,
    /// 进度百分比显示上限，奖金计算始终使用未截断的值
    pub progress_display_cap: f64,
    /// 排行榜条目数
    pub leaderboard_size: usize,
    /// 日志级别
    pub log_level: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timezone: std::env::var("REPORT_TIMEZONE")
                .ok()
                .and_then(|tz| match tz.parse::<Tz>() {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::warn!("Invalid REPORT_TIMEZONE '{}': {}, falling back to UTC", tz, e);
                        None
                    }
                })
                .unwrap_or(defaults.timezone),
            progress_display_cap: std::env::var("PROGRESS_DISPLAY_CAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.progress_display_cap),
            leaderboard_size: std::env::var("LEADERBOARD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.leaderboard_size),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(timezone: Tz, progress_display_cap: f64) -> Self {
        Self {
            timezone,
            progress_display_cap,
            ..Self::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> StatsResult<()> {
        if !self.progress_display_cap.is_finite() || self.progress_display_cap < 100.0 {
            return Err(StatsError::Config(format!(
                "PROGRESS_DISPLAY_CAP must be a finite value >= 100, got {}",
                self.progress_display_cap
            )));
        }
        if self.leaderboard_size == 0 {
            return Err(StatsError::Config(
                "LEADERBOARD_SIZE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    /// 内置默认值 (不读取环境变量)
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            progress_display_cap: DEFAULT_PROGRESS_DISPLAY_CAP,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            log_level: "info".to_string(),
            log_dir: None,
            environment: "development".to_string(),
        }
    }
}
