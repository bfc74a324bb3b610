//! 核心模块 - 配置与错误

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{MalformedReason, ObjectiveIssue, StatsError, StatsResult};

/// 设置运行环境 (dotenv + 日志)
///
/// 供宿主程序在启动时调用一次；库本身不会安装日志订阅器。
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // .env 文件是可选的
        eprintln!("No .env file loaded: {}", e);
    }

    let config = Config::from_env();
    crate::utils::logger::init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
    config
}
