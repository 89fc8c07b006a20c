use std::path::{Path, PathBuf};

/// 路径工具
pub struct PathUtils;

impl PathUtils {
    /// 转换为绝对路径（不解析符号链接，路径不存在也可以）
    pub fn absolute(path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
        }
    }

    /// 规范化路径；失败时返回 None（例如路径尚不存在）
    pub fn canonical(path: &Path) -> Option<PathBuf> {
        path.canonicalize().ok()
    }

    /// 路径本身存在，或相对于工作目录存在
    pub fn exists_absolute_or_relative(entry: &str, working_directory: &Path) -> bool {
        working_directory.join(entry).exists() || Path::new(entry).exists()
    }

    /// 类路径条目中的 `!` 是 jar 内部路径标记，拼接类路径时需要移除
    pub fn strip_archive_marker(path: &str) -> String {
        path.replace('!', "")
    }

    /// 将全限定类名转换为类文件在归档或目录中的相对路径
    pub fn class_resource_path(class_name: &str) -> String {
        format!("{}.class", class_name.replace('.', "/"))
    }
}
