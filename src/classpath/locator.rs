use crate::classpath::ClasspathSet;
use crate::utils::PathUtils;
use std::fs;
use std::path::Path;

/// 标记类所在的类路径条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLookup {
    Found(String),
    NotFound,
}

impl ArtifactLookup {
    pub fn found(self) -> Option<String> {
        match self {
            ArtifactLookup::Found(entry) => Some(entry),
            ArtifactLookup::NotFound => None,
        }
    }
}

/// 在类路径条目中查找包含指定标记类的条目
///
/// 目录条目检查 `<dir>/<类名路径>.class` 是否存在；文件条目按 jar/zip 打开后检查同名条目。
/// 返回第一个匹配的条目（原样），无法读取的归档会被跳过。
pub fn locate_artifact(entries: &ClasspathSet, marker_class: &str) -> ArtifactLookup {
    let resource = PathUtils::class_resource_path(marker_class);

    entries
        .entries()
        .iter()
        .find(|entry| entry_contains(Path::new(entry.as_str()), &resource))
        .map(|entry| ArtifactLookup::Found(entry.clone()))
        .unwrap_or(ArtifactLookup::NotFound)
}

fn entry_contains(entry: &Path, resource: &str) -> bool {
    if entry.is_dir() {
        entry.join(resource).is_file()
    } else if entry.is_file() {
        archive_contains(entry, resource)
    } else {
        false
    }
}

fn archive_contains(archive_path: &Path, resource: &str) -> bool {
    let Ok(file) = fs::File::open(archive_path) else {
        return false;
    };
    let Ok(mut archive) = zip::ZipArchive::new(file) else {
        return false;
    };
    let found = archive.by_name(resource).is_ok();
    found
}
