// ==========================================
// 志愿者值班排班系统 - 应用配置文件
// ==========================================
// 职责: 从 JSON 文件加载运行配置与名册数据源路径
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::run_config::RunConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// ==========================================
// SourcePaths - 名册数据源
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePaths {
    /// 成员名册（必填）
    pub members: PathBuf,

    #[serde(default)]
    pub pairs: Option<PathBuf>,

    #[serde(default)]
    pub restrictions: Option<PathBuf>,

    #[serde(default)]
    pub absences: Option<PathBuf>,

    /// 历史计数表（可多个，按姓名累加）
    #[serde(default)]
    pub history: Vec<PathBuf>,
}

// ==========================================
// AppConfig - 配置文件根对象
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub run: RunConfig,
    pub sources: SourcePaths,
}

impl AppConfig {
    /// 加载并校验配置文件
    ///
    /// 数据源中的相对路径按配置文件所在目录解析
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;
        config.run.validate()?;

        if let Some(base_dir) = path.parent() {
            config.sources.resolve_relative_to(base_dir);
        }

        info!(
            config_path = %path.display(),
            period_start = %config.run.period_start,
            period_end = %config.run.period_end,
            "配置文件加载完成"
        );
        Ok(config)
    }
}

impl SourcePaths {
    fn resolve_relative_to(&mut self, base_dir: &Path) {
        let resolve = |p: &PathBuf| -> PathBuf {
            if p.is_relative() {
                base_dir.join(p)
            } else {
                p.clone()
            }
        };

        self.members = resolve(&self.members);
        self.pairs = self.pairs.as_ref().map(resolve);
        self.restrictions = self.restrictions.as_ref().map(resolve);
        self.absences = self.absences.as_ref().map(resolve);
        self.history = self.history.iter().map(resolve).collect();
    }
}
