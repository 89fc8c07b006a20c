use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ctlaunch CLI 应用程序
#[derive(Parser, Debug)]
#[command(name = "ctlaunch")]
#[command(about = "为持续测试运行器构建测试进程的启动参数", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 配置文件路径（默认 ~/.ctlaunch/config.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 顶级命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 读取 JDK 的 release 元数据并探测主版本
    Probe {
        /// JDK 安装目录，默认使用 JAVA_HOME 或 PATH 中的 java
        #[arg(long)]
        java_home: Option<PathBuf>,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 根据模块描述生成测试进程启动规格
    Plan {
        /// 模块描述文件（TOML）
        #[arg(short, long)]
        module: PathBuf,
        /// 额外的 JVM 参数，可重复
        #[arg(long = "vm-arg", allow_hyphen_values = true)]
        vm_args: Vec<String>,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
        /// 退出时保留生成的临时文件
        #[arg(long)]
        keep_files: bool,
    },
    /// 列出类路径中当前存在的类目录
    ClassDirs {
        /// 模块描述文件（TOML）
        #[arg(short, long)]
        module: PathBuf,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 检查完整类路径中缺失的条目
    Validate {
        /// 模块描述文件（TOML）
        #[arg(short, long)]
        module: PathBuf,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
}
