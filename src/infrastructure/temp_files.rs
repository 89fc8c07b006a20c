use crate::core::constants::files::LINE_SEPARATOR;
use crate::error::{LaunchError, LaunchResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::{Builder, TempPath};

/// 临时文件登记表
///
/// 由宿主进程持有；登记表被释放（通常是宿主退出）时删除其中的所有文件。
/// 宿主被强制终止时文件会遗留在临时目录中，由操作系统的清理策略兜底。
#[derive(Debug, Default)]
pub struct TempFileRegistry {
    directory: Option<PathBuf>,
    files: Mutex<Vec<TempPath>>,
}

impl TempFileRegistry {
    /// 在系统临时目录中创建文件
    pub fn new() -> Self {
        Self::default()
    }

    /// 在指定目录中创建文件
    pub fn in_dir(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            files: Mutex::new(Vec::new()),
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// 创建新的临时文件，逐行写入 UTF-8 内容（每行以平台换行符结尾）
    pub fn create_with_lines<S: AsRef<str>>(
        &self,
        prefix: &str,
        suffix: &str,
        lines: &[S],
    ) -> LaunchResult<PathBuf> {
        let mut builder = Builder::new();
        builder.prefix(prefix).suffix(suffix);
        let mut file = match &self.directory {
            Some(directory) => builder.tempfile_in(directory),
            None => builder.tempfile(),
        }
        .map_err(|e| LaunchError::io("Error creating temporary file", e))?;

        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push_str(LINE_SEPARATOR);
        }
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| LaunchError::io("Error writing temporary file", e))?;

        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        self.lock().push(temp_path);
        Ok(path)
    }

    /// 已登记的文件路径
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().iter().map(|p| p.to_path_buf()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 保留所有文件，不再在释放时删除
    pub fn persist_all(&self) -> Vec<PathBuf> {
        let files = std::mem::take(&mut *self.lock());
        files
            .into_iter()
            .map(|temp_path| match temp_path.keep() {
                Ok(path) => path,
                Err(e) => e.path.to_path_buf(),
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TempPath>> {
        match self.files.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_lines_with_prefix_and_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TempFileRegistry::in_dir(temp_dir.path());

        let path = registry
            .create_with_lines("infinitest-", ".classpath", &["a.jar", "b.jar"])
            .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("infinitest-"));
        assert!(name.ends_with(".classpath"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("a.jar{LINE_SEPARATOR}b.jar{LINE_SEPARATOR}")
        );
        assert_eq!(registry.paths(), vec![path]);
    }

    #[test]
    fn test_dropping_registry_deletes_files() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TempFileRegistry::in_dir(temp_dir.path());
        let path = registry.create_with_lines("x-", ".tmp", &["line"]).unwrap();
        assert!(path.exists());

        drop(registry);
        assert!(!path.exists());
    }

    #[test]
    fn test_persist_all_keeps_files() {
        let temp_dir = TempDir::new().unwrap();
        let registry = TempFileRegistry::in_dir(temp_dir.path());
        let path = registry.create_with_lines("x-", ".tmp", &["line"]).unwrap();

        let kept = registry.persist_all();
        assert_eq!(kept, vec![path.clone()]);
        assert!(registry.is_empty());

        drop(registry);
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let registry = TempFileRegistry::in_dir("/nonexistent/ctlaunch/tmp");
        let error = registry
            .create_with_lines("x-", ".tmp", &["line"])
            .unwrap_err();
        assert!(matches!(error, LaunchError::Io { .. }));
    }
}
