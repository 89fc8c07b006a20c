use crate::core::constants::classpath::{BOOTSTRAP_MARKER, RUNNER_MARKER};
use crate::core::constants::config::{CONFIG_DIR, CONFIG_FILE, DEFAULT_LOG_LEVEL};
use crate::error::{LaunchError, LaunchResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// 日志级别（tracing 过滤器语法）
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 追加到每个运行时环境的 JVM 参数
    #[serde(default)]
    pub vm_args: Vec<String>,
    /// 临时文件目录，默认为系统临时目录
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    #[serde(default)]
    pub markers: RunnerMarkers,
}

/// 用于在类路径中定位 bootstrap 与 runner 构件的标记类
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunnerMarkers {
    #[serde(default = "default_bootstrap_marker")]
    pub bootstrap: String,
    #[serde(default = "default_runner_marker")]
    pub runner: String,
}

impl Default for RunnerMarkers {
    fn default() -> Self {
        Self {
            bootstrap: default_bootstrap_marker(),
            runner: default_runner_marker(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_bootstrap_marker() -> String {
    BOOTSTRAP_MARKER.to_string()
}

fn default_runner_marker() -> String {
    RUNNER_MARKER.to_string()
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            vm_args: Vec::new(),
            temp_dir: None,
            markers: RunnerMarkers::default(),
        }
    }
}

impl LaunchConfig {
    /// 从默认位置加载配置；文件不存在时使用默认配置
    pub fn load() -> LaunchResult<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// 从指定文件加载配置；文件不存在时使用默认配置
    pub fn load_from(path: &Path) -> LaunchResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| LaunchError::io(&format!("无法读取配置文件 {}", path.display()), e))?;
        Self::from_toml(&content)
            .map_err(|e| LaunchError::config(format!("解析配置文件 {} 失败: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 保存配置到文件
    pub fn save_to(&self, path: &Path) -> LaunchResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LaunchError::io("无法创建配置目录", e))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .map_err(|e| LaunchError::config(format!("序列化配置失败: {}", e)))?;

        fs::write(path, toml_content).map_err(|e| LaunchError::io("写入配置文件失败", e))
    }
}

/// 获取配置文件路径
pub fn get_config_path() -> LaunchResult<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// 获取配置目录
pub fn get_config_dir() -> LaunchResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| LaunchError::config("无法获取用户主目录"))?;
    Ok(home_dir.join(CONFIG_DIR))
}
