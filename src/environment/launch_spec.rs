use crate::infrastructure::TempFileRegistry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

/// 测试进程启动规格
///
/// 每次启动请求都重新创建，创建后不再修改。规格持有生成它的临时文件登记表，
/// 参数中引用的参数文件至少与规格存活得一样久。
#[derive(Debug, Clone, Serialize)]
pub struct ProcessLaunchSpec {
    pub executable: PathBuf,
    /// 不含可执行文件本身的参数列表
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub working_directory: PathBuf,
    #[serde(skip)]
    temp_files: Option<Arc<TempFileRegistry>>,
}

impl ProcessLaunchSpec {
    pub fn new(
        executable: PathBuf,
        arguments: Vec<String>,
        environment: BTreeMap<String, String>,
        working_directory: PathBuf,
    ) -> Self {
        Self {
            executable,
            arguments,
            environment,
            working_directory,
            temp_files: None,
        }
    }

    /// 绑定参数文件所在的登记表
    pub fn with_temp_files(mut self, temp_files: Arc<TempFileRegistry>) -> Self {
        self.temp_files = Some(temp_files);
        self
    }

    pub fn temp_files(&self) -> Option<&Arc<TempFileRegistry>> {
        self.temp_files.as_ref()
    }

    /// 完整命令行（可执行文件 + 参数）
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.executable.to_string_lossy().to_string())
            .chain(self.arguments.iter().cloned())
            .collect()
    }

    /// 交给进程启动方的 `Command`；环境变量在继承的基础上覆盖
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(&self.arguments)
            .envs(&self.environment)
            .current_dir(&self.working_directory);
        command
    }
}

// 登记表只负责文件生命周期，不参与相等性
impl PartialEq for ProcessLaunchSpec {
    fn eq(&self, other: &Self) -> bool {
        self.executable == other.executable
            && self.arguments == other.arguments
            && self.environment == other.environment
            && self.working_directory == other.working_directory
    }
}

impl Eq for ProcessLaunchSpec {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProcessLaunchSpec {
        let mut environment = BTreeMap::new();
        environment.insert("CLASSPATH".to_string(), "/plugin/bootstrap.jar".to_string());
        ProcessLaunchSpec::new(
            PathBuf::from("/jdk/bin/java"),
            vec!["-mx256m".to_string(), "-classpath".to_string(), "cp".to_string()],
            environment,
            PathBuf::from("/work"),
        )
    }

    #[test]
    fn test_command_line_starts_with_executable() {
        assert_eq!(
            sample().command_line(),
            vec!["/jdk/bin/java", "-mx256m", "-classpath", "cp"]
        );
    }

    #[test]
    fn test_to_command_carries_everything() {
        let command = sample().to_command();
        assert_eq!(command.get_program(), "/jdk/bin/java");
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec!["-mx256m", "-classpath", "cp"]
        );
        assert_eq!(command.get_current_dir(), Some(std::path::Path::new("/work")));
        let envs: Vec<_> = command.get_envs().collect();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].0, "CLASSPATH");
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["executable"], "/jdk/bin/java");
        assert_eq!(json["environment"]["CLASSPATH"], "/plugin/bootstrap.jar");
        assert!(json.get("temp_files").is_none());
    }

    #[test]
    fn test_equality_ignores_registry() {
        let bound = sample().with_temp_files(Arc::new(TempFileRegistry::new()));
        assert!(bound.temp_files().is_some());
        assert!(sample().temp_files().is_none());
        assert_eq!(bound, sample());
    }
}
