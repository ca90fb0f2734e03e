// ==========================================
// 志愿者值班排班系统 - 命令行入口
// ==========================================
// 用法: duty-roster <config.json>
// 输出: 排班结果 JSON（stdout）; 日志写入 stderr
// ==========================================

use anyhow::{Context, Result};
use duty_roster::config::AppConfig;
use duty_roster::domain::{DayRecordView, HistoryTable};
use duty_roster::engine::{RosterScheduler, RosterSummary};
use duty_roster::importer::{RosterImporter, RosterSource};
use duty_roster::logging;
use serde::Serialize;
use std::path::PathBuf;

/// stdout 输出结构
#[derive(Serialize)]
struct RunOutput<'a> {
    day_records: Vec<DayRecordView<'a>>,

    /// 已提交本周期圣餐服事增量的历史计数
    history: HistoryTable,

    summary: &'a RosterSummary,
}

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", duty_roster::APP_NAME, duty_roster::VERSION);
    tracing::info!("==================================================");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("缺少参数: duty-roster <config.json>")?;

    let config = AppConfig::load(&config_path)
        .with_context(|| format!("无法加载配置文件: {}", config_path.display()))?;

    let input = RosterImporter::new()
        .load(&config.sources)
        .context("名册导入失败")?;

    let scheduler = RosterScheduler::new(config.run).context("运行配置非法")?;
    let result = scheduler.run(&input).context("排班失败")?;

    let output = RunOutput {
        day_records: result.day_records.iter().map(|r| r.view()).collect(),
        history: result.updated_history(&input.history),
        summary: &result.summary,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("结果序列化失败")?
    );

    if result.vacancy_count() > 0 {
        tracing::warn!(
            vacancies = result.vacancy_count(),
            "排班结果存在空缺岗位，请人工补位"
        );
    }

    Ok(())
}
