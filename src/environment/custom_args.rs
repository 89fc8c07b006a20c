use crate::core::constants::files::CUSTOM_ARGUMENTS_FILE;
use crate::core::diagnostics::DiagnosticsSink;
use std::fs;
use std::path::{Path, PathBuf};

/// 工作目录下的自定义 JVM 参数文件（`infinitest.args`）
///
/// 每个非空、非 `#` 开头的行按空白拆分为参数，追加在所有内置参数之后。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomArgumentsFile {
    path: PathBuf,
}

impl CustomArgumentsFile {
    pub fn in_directory(directory: &Path) -> Self {
        Self {
            path: directory.join(CUSTOM_ARGUMENTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取参数；文件不存在时为空，无法读取时记录警告并返回空
    pub fn read_arguments(&self, sink: &dyn DiagnosticsSink) -> Vec<String> {
        if !self.path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let arguments = parse_arguments(&content);
                sink.debug(&format!(
                    "Read {} custom JVM arguments from {}",
                    arguments.len(),
                    self.path.display()
                ));
                arguments
            }
            Err(e) => {
                sink.warning(&format!(
                    "Could not read custom JVM arguments from {}: {}",
                    self.path.display(),
                    e
                ));
                Vec::new()
            }
        }
    }
}

fn parse_arguments(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}
