use crate::core::constants::classpath::PATH_SEPARATOR;
use crate::core::diagnostics::DiagnosticsSink;
use crate::environment::RuntimeEnvironment;
use crate::error::{LaunchError, LaunchResult};
use crate::utils::PathUtils;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 模块描述：构建系统/IDE 提供的运行时环境输入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSettings {
    #[serde(default)]
    pub name: String,
    pub java_home: PathBuf,
    #[serde(default = "default_working_directory")]
    pub working_directory: PathBuf,
    /// 包含 bootstrap 类加载器构件的类路径
    pub bootstrap_classpath: String,
    /// 包含测试运行器构件的类路径
    pub runner_classpath: String,
    /// 测试与主代码的编译输出目录
    #[serde(default)]
    pub output_directories: Vec<PathBuf>,
    /// 类路径条目，顺序有意义
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
}

fn default_working_directory() -> PathBuf {
    PathBuf::from(".")
}

impl ModuleSettings {
    /// 从 TOML 文件加载模块描述
    pub fn load(path: &Path) -> LaunchResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LaunchError::io(&format!("无法读取模块描述 {}", path.display()), e))?;
        toml::from_str(&content).map_err(|e| {
            LaunchError::config(format!("解析模块描述 {} 失败: {}", path.display(), e))
        })
    }

    /// 拼接类路径字符串：绝对路径、去掉 `!`、平台分隔符连接
    pub fn classpath_string(&self) -> String {
        self.classpath
            .iter()
            .map(|entry| {
                PathUtils::strip_archive_marker(&PathUtils::absolute(entry).to_string_lossy())
            })
            .collect::<Vec<_>>()
            .join(&PATH_SEPARATOR.to_string())
    }

    /// 规范化后的输出目录；无法规范化时保留原路径
    pub fn list_output_directories(&self, sink: &dyn DiagnosticsSink) -> Vec<PathBuf> {
        self.output_directories
            .iter()
            .map(|dir| {
                sink.debug(&format!("Adding output directory: {}", dir.display()));
                PathUtils::canonical(dir).unwrap_or_else(|| {
                    sink.warning(&format!(
                        "Error while getting canonical file for: {}",
                        dir.display()
                    ));
                    dir.clone()
                })
            })
            .collect()
    }

    /// 构造运行时环境；诊断输出会一并注入环境
    pub fn runtime_environment(&self, sink: Arc<dyn DiagnosticsSink>) -> RuntimeEnvironment {
        let output_directories = self.list_output_directories(sink.as_ref());
        RuntimeEnvironment::new(
            PathUtils::absolute(&self.java_home),
            self.working_directory.clone(),
            self.bootstrap_classpath.clone(),
            self.runner_classpath.clone(),
            output_directories,
            self.classpath_string(),
        )
        .with_diagnostics(sink)
    }

    /// 输出模块的目录与类路径，便于排查配置问题
    pub fn write_to_log(&self, sink: &dyn DiagnosticsSink) {
        sink.info("Output Directories:");
        for dir in self.list_output_directories(sink) {
            sink.info(&dir.display().to_string());
        }
        sink.info("Classpath:");
        sink.info(&self.classpath_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::{DiagnosticLevel, MemorySink};
    use tempfile::TempDir;

    fn sample(root: &Path) -> ModuleSettings {
        ModuleSettings {
            name: "core".to_string(),
            java_home: root.join("jdk"),
            working_directory: root.to_path_buf(),
            bootstrap_classpath: "boot.jar".to_string(),
            runner_classpath: "runner.jar".to_string(),
            output_directories: vec![root.join("out/classes"), root.join("out/missing")],
            classpath: vec![root.join("out/classes"), root.join("libs/app.jar!")],
        }
    }

    #[test]
    fn test_parse_module_description() {
        let module: ModuleSettings = toml::from_str(
            r#"
name = "web"
java_home = "/usr/lib/jvm/java-17"
bootstrap_classpath = "/plugin/lib/bootstrap.jar"
runner_classpath = "/plugin/lib/runner.jar"
output_directories = ["target/test-classes", "target/classes"]
classpath = ["target/test-classes", "target/classes", "/m2/junit.jar"]
"#,
        )
        .unwrap();

        assert_eq!(module.name, "web");
        assert_eq!(module.working_directory, PathBuf::from("."));
        assert_eq!(module.classpath.len(), 3);
        assert_eq!(module.output_directories[0], PathBuf::from("target/test-classes"));
    }

    #[test]
    fn test_classpath_string_is_absolute_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        let module = sample(temp_dir.path());

        let classpath = module.classpath_string();
        let entries: Vec<&str> = classpath.split(PATH_SEPARATOR).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], temp_dir.path().join("out/classes").to_string_lossy());
        assert!(entries[1].ends_with("app.jar"));
        assert!(!classpath.contains('!'));
    }

    #[test]
    fn test_output_directories_fall_back_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("out/classes")).unwrap();
        let module = sample(temp_dir.path());
        let sink = MemorySink::new();

        let dirs = module.list_output_directories(&sink);
        assert_eq!(
            dirs[0],
            temp_dir.path().join("out/classes").canonicalize().unwrap()
        );
        assert_eq!(dirs[1], temp_dir.path().join("out/missing"));
        assert_eq!(sink.messages_at(DiagnosticLevel::Warning).len(), 1);
    }

    #[test]
    fn test_runtime_environment_from_module() {
        let temp_dir = TempDir::new().unwrap();
        let module = sample(temp_dir.path());
        let sink = MemorySink::new();

        let environment = module.runtime_environment(Arc::new(sink));
        assert_eq!(environment.project_under_test_class_path(), module.classpath_string());
        assert_eq!(environment.working_directory(), temp_dir.path());
        assert_eq!(environment.class_output_dirs().len(), 2);
    }

    #[test]
    fn test_write_to_log() {
        let temp_dir = TempDir::new().unwrap();
        let module = sample(temp_dir.path());
        let sink = MemorySink::new();

        module.write_to_log(&sink);
        let info = sink.messages_at(DiagnosticLevel::Info);
        assert_eq!(info[0], "Output Directories:");
        assert_eq!(info[3], "Classpath:");
        assert_eq!(info[4], module.classpath_string());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let error = ModuleSettings::load(&temp_dir.path().join("module.toml")).unwrap_err();
        assert!(matches!(error, LaunchError::Io { .. }));
    }
}
