use crate::core::constants::jvm::{ARGUMENT_FILE_PREFIX, CLASSPATH_FLAG};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 类路径参数策略
///
/// 每个环境只选择一次：Java 9 以下（或版本未知）内联类路径，Java 9 及以上改用参数文件以绕过命令行长度限制。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ClasspathArgumentBuilder {
    /// 完整类路径直接作为参数值
    Inline { classpath: String },
    /// 参数值引用已写好的参数文件
    ArgumentFile { path: PathBuf },
}

impl ClasspathArgumentBuilder {
    pub fn inline(classpath: impl Into<String>) -> Self {
        Self::Inline {
            classpath: classpath.into(),
        }
    }

    pub fn argument_file(path: impl Into<PathBuf>) -> Self {
        Self::ArgumentFile { path: path.into() }
    }

    /// 生成类路径参数：`-classpath <类路径>` 或 `-classpath @<参数文件>`
    pub fn build_arguments(&self) -> Vec<String> {
        let value = match self {
            Self::Inline { classpath } => classpath.clone(),
            Self::ArgumentFile { path } => {
                format!("{}{}", ARGUMENT_FILE_PREFIX, path.to_string_lossy())
            }
        };
        vec![CLASSPATH_FLAG.to_string(), value]
    }

    pub fn is_argument_file(&self) -> bool {
        matches!(self, Self::ArgumentFile { .. })
    }

    pub fn argument_file_path(&self) -> Option<&Path> {
        match self {
            Self::ArgumentFile { path } => Some(path),
            Self::Inline { .. } => None,
        }
    }
}

/// 参数文件内容转义：反斜杠加倍，整体包一对双引号
///
/// 参数文件读取器会把未转义的反斜杠当作转义符，Windows 路径必须这样处理。
pub fn escape_class_path_file_content(classpath: &str) -> String {
    format!("\"{}\"", classpath.replace('\\', "\\\\"))
}
