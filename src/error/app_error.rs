use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 启动环境错误类型
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Could not find java executable at {}", path.display())]
    JavaHome { path: PathBuf },

    #[error("Could not find test runner in classpath:\n{classpath}")]
    MissingRunner { classpath: String },

    #[error("Could not find runner class loader in classpath:\n{classpath}")]
    MissingClassLoader { classpath: String },

    #[error("{operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("版本解析错误: {version}")]
    VersionParse { version: String },

    #[error("配置错误: {message}")]
    Config { message: String },

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LaunchError {
    /// 包装 I/O 错误并附带操作描述
    pub fn io(operation: &str, source: io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn java_home(path: &Path) -> Self {
        Self::JavaHome {
            path: path.to_path_buf(),
        }
    }

    pub fn version_parse_failed(version: &str) -> Self {
        Self::VersionParse {
            version: version.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 是否为无法恢复的配置错误（本次启动必须放弃）
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::VersionParse { .. })
    }

    /// 面向用户的修复建议
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::JavaHome { .. } => vec![
                "检查模块配置中的 JDK 路径",
                "确认 JDK 目录下存在 bin/java 或 bin/java.exe",
            ],
            Self::MissingRunner { .. } => vec![
                "确认 runner 类路径包含测试运行器 jar",
                "检查配置中的 markers.runner 类名",
            ],
            Self::MissingClassLoader { .. } => vec![
                "确认 bootstrap 类路径包含类加载器 jar",
                "检查配置中的 markers.bootstrap 类名",
            ],
            Self::Io { .. } => vec!["检查临时目录是否可写以及磁盘空间"],
            Self::Config { .. } => vec!["检查配置文件格式 (TOML)"],
            Self::VersionParse { .. } | Self::Serialization(_) => Vec::new(),
        }
    }

    /// 获取用户友好的错误消息
    pub fn user_message(&self) -> String {
        let mut msg = format!("{}\n", self);
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            msg.push_str("建议:\n");
            for suggestion in suggestions {
                msg.push_str(&format!("  • {}\n", suggestion));
            }
        }
        msg
    }
}

/// 启动环境 Result 类型
pub type LaunchResult<T> = Result<T, LaunchError>;
