use crate::environment::ProcessLaunchSpec;
use crate::error::LaunchResult;
use crate::jdk::JdkRelease;
use std::path::{Path, PathBuf};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// 输出格式化器
pub struct OutputFormatter;

impl OutputFormatter {
    /// 格式化 JDK 探测结果
    pub fn format_release(
        &self,
        java_home: &Path,
        release: Option<&JdkRelease>,
        format: OutputFormat,
    ) -> LaunchResult<String> {
        match format {
            OutputFormat::Text => {
                let mut output = format!("JDK: {}\n", java_home.display());
                match release {
                    Some(release) => {
                        output.push_str(&format!(
                            "JAVA_VERSION: {}\n",
                            release.java_version.as_deref().unwrap_or("unknown")
                        ));
                        if let Some(implementor) = &release.implementor {
                            output.push_str(&format!("IMPLEMENTOR: {}\n", implementor));
                        }
                        output.push_str(&format!(
                            "Major version: {}\n",
                            release
                                .major_version
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| "unknown".to_string())
                        ));
                    }
                    None => output.push_str("Major version: unknown\n"),
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let json_output = serde_json::json!({
                    "java_home": java_home,
                    "release": release,
                    "major_version": release.and_then(|r| r.major_version),
                });
                Ok(serde_json::to_string_pretty(&json_output)?)
            }
        }
    }

    /// 格式化启动规格
    pub fn format_launch_spec(
        &self,
        spec: &ProcessLaunchSpec,
        kept_files: &[PathBuf],
        format: OutputFormat,
    ) -> LaunchResult<String> {
        match format {
            OutputFormat::Text => {
                let mut output = format!("Executable: {}\n", spec.executable.display());
                output.push_str(&format!(
                    "Working directory: {}\n",
                    spec.working_directory.display()
                ));
                output.push_str("Arguments:\n");
                for argument in &spec.arguments {
                    output.push_str(&format!("  {}\n", argument));
                }
                output.push_str("Environment:\n");
                for (key, value) in &spec.environment {
                    output.push_str(&format!("  {}={}\n", key, value));
                }
                if !kept_files.is_empty() {
                    output.push_str("Kept files:\n");
                    for file in kept_files {
                        output.push_str(&format!("  {}\n", file.display()));
                    }
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let json_output = serde_json::json!({
                    "launch": spec,
                    "command_line": spec.command_line(),
                    "kept_files": kept_files,
                });
                Ok(serde_json::to_string_pretty(&json_output)?)
            }
        }
    }

    /// 格式化路径列表
    pub fn format_paths<P: AsRef<Path>>(
        &self,
        title: &str,
        paths: &[P],
        format: OutputFormat,
    ) -> LaunchResult<String> {
        match format {
            OutputFormat::Text => {
                let mut output = String::new();
                if paths.is_empty() {
                    output.push_str(&format!("No {}\n", title));
                } else {
                    output.push_str(&format!("{}:\n", title));
                    for path in paths {
                        output.push_str(&format!("  {}\n", path.as_ref().display()));
                    }
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let paths: Vec<&Path> = paths.iter().map(AsRef::as_ref).collect();
                let json_output = serde_json::json!({
                    "title": title,
                    "paths": paths,
                });
                Ok(serde_json::to_string_pretty(&json_output)?)
            }
        }
    }

    /// 格式化错误信息
    pub fn format_error(&self, error: &crate::error::LaunchError, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!("Error: {}", error.user_message()),
            OutputFormat::Json => {
                let json_output = serde_json::json!({
                    "error": error.to_string(),
                    "suggestions": error.suggestions(),
                    "success": false
                });
                serde_json::to_string_pretty(&json_output)
                    .unwrap_or_else(|_| format!("Error: {}", error))
            }
        }
    }
}

/// 默认输出格式化器实例
pub static FORMATTER: OutputFormatter = OutputFormatter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchError;
    use std::collections::BTreeMap;

    fn spec() -> ProcessLaunchSpec {
        let mut environment = BTreeMap::new();
        environment.insert("CLASSPATH".to_string(), "/p/boot.jar".to_string());
        ProcessLaunchSpec::new(
            PathBuf::from("/jdk/bin/java"),
            vec!["-mx256m".to_string()],
            environment,
            PathBuf::from("/work"),
        )
    }

    #[test]
    fn test_format_launch_spec_text() {
        let output = FORMATTER
            .format_launch_spec(&spec(), &[], OutputFormat::Text)
            .unwrap();
        assert!(output.contains("Executable: /jdk/bin/java"));
        assert!(output.contains("  -mx256m\n"));
        assert!(output.contains("  CLASSPATH=/p/boot.jar\n"));
        assert!(!output.contains("Kept files"));
    }

    #[test]
    fn test_format_launch_spec_json() {
        let output = FORMATTER
            .format_launch_spec(&spec(), &[PathBuf::from("/tmp/a.cp-argument")], OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["command_line"][0], "/jdk/bin/java");
        assert_eq!(value["kept_files"][0], "/tmp/a.cp-argument");
    }

    #[test]
    fn test_format_release_unknown() {
        let output = FORMATTER
            .format_release(Path::new("/jdk"), None, OutputFormat::Text)
            .unwrap();
        assert!(output.contains("Major version: unknown"));
    }

    #[test]
    fn test_format_release_json() {
        let release = JdkRelease {
            java_version: Some("\"18.0.2\"".to_string()),
            implementor: None,
            major_version: Some(18),
        };
        let output = FORMATTER
            .format_release(Path::new("/jdk"), Some(&release), OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["major_version"], 18);
    }

    #[test]
    fn test_format_empty_paths() {
        let output = FORMATTER
            .format_paths::<PathBuf>("class directories", &[], OutputFormat::Text)
            .unwrap();
        assert_eq!(output, "No class directories\n");
    }

    #[test]
    fn test_format_error_json_has_suggestions() {
        let error = LaunchError::MissingRunner {
            classpath: "cp".to_string(),
        };
        let output = FORMATTER.format_error(&error, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["suggestions"].as_array().unwrap().len() > 0);
    }
}
