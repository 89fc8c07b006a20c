//! 启动相关常量定义
//!
//! 本模块包含全局使用的常量，避免魔数并提供统一的配置值。

/// JVM 相关常量
pub mod jvm {
    /// 测试进程的堆大小（MB），构造时固定，不可配置
    pub const HEAP_SIZE_MB: u32 = 256;
    /// 支持参数文件（@argfile）的最低 Java 主版本
    pub const MIN_ARGUMENT_FILE_VERSION: u32 = 9;
    /// 类路径参数
    pub const CLASSPATH_FLAG: &str = "-classpath";
    /// 参数文件引用前缀
    pub const ARGUMENT_FILE_PREFIX: &str = "@";
    /// 子进程中只包含 bootstrap 类加载器的环境变量
    pub const CLASSPATH_ENV: &str = "CLASSPATH";

    /// 堆大小参数，例如 `-mx256m`
    pub fn heap_flag(size_mb: u32) -> String {
        format!("-mx{size_mb}m")
    }
}

/// JDK 安装目录相关常量
pub mod jdk {
    /// 安装元数据文件
    pub const RELEASE_FILE: &str = "release";
    /// 版本属性
    pub const JAVA_VERSION_KEY: &str = "JAVA_VERSION";
    /// 供应商属性
    pub const IMPLEMENTOR_KEY: &str = "IMPLEMENTOR";
    pub const BIN_DIR: &str = "bin";
    pub const JAVA_EXECUTABLE: &str = "java";
    pub const JAVA_EXECUTABLE_WINDOWS: &str = "java.exe";
}

/// 类路径相关常量
pub mod classpath {
    /// 平台类路径分隔符
    pub const PATH_SEPARATOR: char = if cfg!(target_os = "windows") { ';' } else { ':' };
    /// 默认 bootstrap 类加载器标记类
    pub const BOOTSTRAP_MARKER: &str = "org.infinitest.classloader.ClassPathFileClassLoader";
    /// 默认测试运行器标记类
    pub const RUNNER_MARKER: &str = "org.infinitest.testrunner.TestRunnerProcess";
}

/// 临时文件相关常量
pub mod files {
    pub const TEMP_PREFIX: &str = "infinitest-";
    /// 仅用于诊断的类路径文件后缀
    pub const CLASSPATH_SUFFIX: &str = ".classpath";
    /// 类路径参数文件后缀
    pub const ARGUMENT_SUFFIX: &str = ".cp-argument";
    /// 工作目录下的自定义 JVM 参数文件
    pub const CUSTOM_ARGUMENTS_FILE: &str = "infinitest.args";
    /// 行分隔符
    pub const LINE_SEPARATOR: &str = if cfg!(target_os = "windows") { "\r\n" } else { "\n" };
}

/// 配置相关常量
pub mod config {
    /// 配置目录名（位于用户主目录下）
    pub const CONFIG_DIR: &str = ".ctlaunch";
    pub const CONFIG_FILE: &str = "config.toml";
    /// 默认日志级别
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    /// tracing 目标名
    pub const LOG_TARGET: &str = "ctlaunch";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_flag() {
        assert_eq!(jvm::heap_flag(jvm::HEAP_SIZE_MB), "-mx256m");
    }

    #[test]
    fn test_path_separator_matches_platform() {
        let joined = std::env::join_paths(["a", "b"]).unwrap();
        assert_eq!(
            joined.to_string_lossy(),
            format!("a{}b", classpath::PATH_SEPARATOR)
        );
    }
}
