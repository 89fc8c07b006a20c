use crate::core::constants::jdk::{BIN_DIR, JAVA_EXECUTABLE, JAVA_EXECUTABLE_WINDOWS};
use crate::error::{LaunchError, LaunchResult};
use crate::utils::PathUtils;
use std::env;
use std::path::{Path, PathBuf};
use which::which;

/// 定位 JDK 中的 java 可执行文件
///
/// 依次检查 `bin/java` 与 `bin/java.exe`，返回绝对路径；两者都不存在时报告最后检查的路径。
pub fn java_executable(java_home: &Path) -> LaunchResult<PathBuf> {
    let java_home = PathUtils::absolute(java_home);
    let bin_dir = java_home.join(BIN_DIR);

    let unix = bin_dir.join(JAVA_EXECUTABLE);
    if unix.exists() {
        return Ok(unix);
    }

    let windows = bin_dir.join(JAVA_EXECUTABLE_WINDOWS);
    if windows.exists() {
        return Ok(windows);
    }

    Err(LaunchError::java_home(&windows))
}

/// 检测当前系统的 JAVA_HOME
///
/// 优先使用 `JAVA_HOME` 环境变量，其次从 PATH 中的 java 命令反推。
pub fn detect_java_home() -> Option<PathBuf> {
    if let Some(home) = env::var_os("JAVA_HOME") {
        let home = PathBuf::from(home);
        if !home.as_os_str().is_empty() {
            return Some(home);
        }
    }

    let java_path = which(JAVA_EXECUTABLE).ok()?;
    // PATH 中的 java 经常是符号链接（例如 /usr/bin/java -> /usr/lib/jvm/.../bin/java）
    let java_path = PathUtils::canonical(&java_path).unwrap_or(java_path);
    java_home_from_executable(&java_path)
}

/// 从 java 可执行文件路径找到 JAVA_HOME（`$JAVA_HOME/bin/java`）
pub fn java_home_from_executable(java_path: &Path) -> Option<PathBuf> {
    let bin_dir = java_path.parent()?;
    if bin_dir.file_name().and_then(|n| n.to_str()) != Some(BIN_DIR) {
        return None;
    }
    bin_dir.parent().map(Path::to_path_buf)
}
