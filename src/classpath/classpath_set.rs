use crate::core::constants::classpath::PATH_SEPARATOR;
use std::path::{Path, PathBuf};

/// 有序、按路径去重的类路径条目集合
///
/// 只用于遍历与检查条目；传给子进程的类路径字符串始终原样保留，不会由本结构重新拼接。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClasspathSet {
    entries: Vec<String>,
}

impl ClasspathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按平台分隔符解析类路径字符串，空条目被忽略，重复条目保留第一次出现的位置
    pub fn parse(classpath: &str) -> Self {
        let mut set = Self::new();
        for entry in classpath.split(PATH_SEPARATOR) {
            set.push(entry);
        }
        set
    }

    /// 追加条目；已存在或为空时返回 false
    pub fn push(&mut self, entry: &str) -> bool {
        if entry.is_empty() || self.contains(entry) {
            return false;
        }
        self.entries.push(entry.to_string());
        true
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(Path::new)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 当前磁盘上确实是目录的条目，保持原有顺序
    pub fn directories(&self) -> Vec<PathBuf> {
        self.paths()
            .filter(|path| path.is_dir())
            .map(Path::to_path_buf)
            .collect()
    }

    /// 用平台分隔符拼接所有条目
    pub fn to_classpath_string(&self) -> String {
        self.entries.join(&PATH_SEPARATOR.to_string())
    }
}

impl<'a> FromIterator<&'a str> for ClasspathSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.push(entry);
        }
        set
    }
}
