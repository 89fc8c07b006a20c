use crate::core::constants::jdk::{IMPLEMENTOR_KEY, JAVA_VERSION_KEY, RELEASE_FILE};
use crate::core::diagnostics::DiagnosticsSink;
use crate::error::{LaunchError, LaunchResult};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// JDK 安装目录下 `release` 文件的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JdkRelease {
    /// `JAVA_VERSION` 原始值（包含引号）
    pub java_version: Option<String>,
    pub implementor: Option<String>,
    /// 解析出的主版本号，无法解析时为 None
    pub major_version: Option<u32>,
}

/// JDK 版本探测器
///
/// 只读取 `<jdk>/release`，任何失败都只记录诊断并返回“版本未知”，不会阻止测试运行。
pub struct JdkVersionProbe;

impl JdkVersionProbe {
    /// 元数据文件路径
    pub fn release_file(java_home: &Path) -> PathBuf {
        java_home.join(RELEASE_FILE)
    }

    /// 探测主版本号
    pub fn probe(java_home: &Path, sink: &dyn DiagnosticsSink) -> Option<u32> {
        Self::read_release(java_home, sink).and_then(|release| release.major_version)
    }

    /// 读取完整的 release 信息；文件缺失或不可读时返回 None
    pub fn read_release(java_home: &Path, sink: &dyn DiagnosticsSink) -> Option<JdkRelease> {
        let release_file = Self::release_file(java_home);
        let content = match fs::read_to_string(&release_file) {
            Ok(content) => content,
            Err(e) => {
                sink.warning(&format!(
                    "Could not get java version (None): cannot read {}: {}",
                    release_file.display(),
                    e
                ));
                return None;
            }
        };

        let properties = parse_properties(&content);
        let java_version = properties.get(JAVA_VERSION_KEY).cloned();
        let major_version = match java_version.as_deref() {
            Some(version) => match parse_major_version(version) {
                Ok(major) => {
                    sink.debug(&format!("Detected java major version {} ({})", major, version));
                    Some(major)
                }
                Err(e) => {
                    sink.warning(&format!("Could not get java version ({}): {}", version, e));
                    None
                }
            },
            None => {
                sink.warning(&format!(
                    "Could not get java version (None): {} has no {} entry",
                    release_file.display(),
                    JAVA_VERSION_KEY
                ));
                None
            }
        };

        Some(JdkRelease {
            java_version,
            implementor: properties.get(IMPLEMENTOR_KEY).cloned(),
            major_version,
        })
    }
}

/// 解析 `JAVA_VERSION` 的主版本号
///
/// 支持带点格式（`"18.0.2"` → 18）和不带点格式（`"18"` → 18），首尾引号可选。
pub fn parse_major_version(raw: &str) -> LaunchResult<u32> {
    let unquoted = raw.trim();
    let unquoted = unquoted.strip_prefix('"').unwrap_or(unquoted);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);

    let major = match unquoted.find('.') {
        Some(index) => &unquoted[..index],
        None => unquoted,
    };

    major
        .parse::<u32>()
        .map_err(|_| LaunchError::version_parse_failed(raw))
}

/// 解析 properties 风格的 `KEY=VALUE` 内容
///
/// `#` 与 `!` 开头的行为注释，分隔符可以是 `=` 或 `:`，重复的键以最后一次为准。
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    static PROPERTY_LINE: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PROPERTY_LINE
        .get_or_init(|| Regex::new(r"^\s*([^=:\s]+)\s*[=:]\s*(.*?)\s*$").ok())
        .as_ref();

    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with('!')
        })
        .filter_map(|line| match pattern {
            Some(pattern) => pattern
                .captures(line)
                .map(|caps| (caps[1].to_string(), caps[2].to_string())),
            None => split_property(line),
        })
        .collect()
}

/// 不依赖正则的 `KEY=VALUE` 拆分
fn split_property(line: &str) -> Option<(String, String)> {
    let index = line.find(['=', ':'])?;
    let key = line[..index].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), line[index + 1..].trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::{DiagnosticLevel, MemorySink};
    use tempfile::TempDir;

    fn jdk_with_release(content: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("release"), content).unwrap();
        temp_dir
    }

    #[test]
    fn test_parse_dotted_version() {
        assert_eq!(parse_major_version("\"18.0.2\"").unwrap(), 18);
        assert_eq!(parse_major_version("\"11.0.21\"").unwrap(), 11);
    }

    #[test]
    fn test_parse_plain_version() {
        assert_eq!(parse_major_version("\"18\"").unwrap(), 18);
        assert_eq!(parse_major_version("21").unwrap(), 21);
    }

    #[test]
    fn test_parse_legacy_version_reports_one() {
        // 1.8 以前的版本号格式，主版本解析为 1，按低于 9 处理
        assert_eq!(parse_major_version("\"1.8.0_292\"").unwrap(), 1);
    }

    #[test]
    fn test_parse_invalid_version() {
        assert!(parse_major_version("\"abc\"").is_err());
        assert!(parse_major_version("\"\"").is_err());
    }

    #[test]
    fn test_parse_properties() {
        let props = parse_properties(
            "# comment\nIMPLEMENTOR=\"Eclipse Adoptium\"\nJAVA_VERSION=\"17.0.9\"\n\nOS_ARCH : \"x86_64\"\n",
        );
        assert_eq!(props.get("JAVA_VERSION").map(String::as_str), Some("\"17.0.9\""));
        assert_eq!(
            props.get("IMPLEMENTOR").map(String::as_str),
            Some("\"Eclipse Adoptium\"")
        );
        assert_eq!(props.get("OS_ARCH").map(String::as_str), Some("\"x86_64\""));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn test_split_property_matches_line_pattern() {
        assert_eq!(
            split_property("JAVA_VERSION=\"18.0.2\""),
            Some(("JAVA_VERSION".to_string(), "\"18.0.2\"".to_string()))
        );
        assert_eq!(
            split_property("  OS_ARCH : \"x86_64\"  "),
            Some(("OS_ARCH".to_string(), "\"x86_64\"".to_string()))
        );
        assert_eq!(split_property("no separator here"), None);
        assert_eq!(split_property("BAD KEY=1"), None);
        assert_eq!(split_property("=value"), None);
    }

    #[test]
    fn test_probe_temurin_release() {
        let jdk = jdk_with_release("JAVA_VERSION=\"18.0.2\"\n");
        let sink = MemorySink::new();
        assert_eq!(JdkVersionProbe::probe(jdk.path(), &sink), Some(18));
        assert!(sink.messages_at(DiagnosticLevel::Warning).is_empty());
    }

    #[test]
    fn test_probe_reference_openjdk_release() {
        let jdk = jdk_with_release("IMPLEMENTOR=\"Oracle Corporation\"\nJAVA_VERSION=\"18\"\n");
        let release = JdkVersionProbe::read_release(jdk.path(), &MemorySink::new()).unwrap();
        assert_eq!(release.major_version, Some(18));
        assert_eq!(release.implementor.as_deref(), Some("\"Oracle Corporation\""));
    }

    #[test]
    fn test_probe_missing_release_file_is_unknown() {
        let temp_dir = TempDir::new().unwrap();
        let sink = MemorySink::new();
        assert_eq!(JdkVersionProbe::probe(temp_dir.path(), &sink), None);
        assert_eq!(sink.messages_at(DiagnosticLevel::Warning).len(), 1);
    }

    #[test]
    fn test_probe_malformed_version_is_unknown() {
        let jdk = jdk_with_release("JAVA_VERSION=\"ea-build\"\n");
        let sink = MemorySink::new();
        assert_eq!(JdkVersionProbe::probe(jdk.path(), &sink), None);
        let warnings = sink.messages_at(DiagnosticLevel::Warning);
        assert!(warnings[0].contains("ea-build"));
    }

    #[test]
    fn test_probe_without_version_key_is_unknown() {
        let jdk = jdk_with_release("IMPLEMENTOR=\"Azul Systems, Inc.\"\n");
        let release = JdkVersionProbe::read_release(jdk.path(), &MemorySink::new()).unwrap();
        assert_eq!(release.java_version, None);
        assert_eq!(release.major_version, None);
    }
}
