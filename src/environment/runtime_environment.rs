use crate::classpath::{locate_artifact, ClasspathSet};
use crate::core::constants::classpath::PATH_SEPARATOR;
use crate::core::constants::files::{ARGUMENT_SUFFIX, CLASSPATH_SUFFIX, TEMP_PREFIX};
use crate::core::constants::jvm::{self, CLASSPATH_ENV, HEAP_SIZE_MB, MIN_ARGUMENT_FILE_VERSION};
use crate::core::diagnostics::{DiagnosticsSink, TracingSink};
use crate::environment::argument_builder::{escape_class_path_file_content, ClasspathArgumentBuilder};
use crate::environment::custom_args::CustomArgumentsFile;
use crate::environment::launch_spec::ProcessLaunchSpec;
use crate::error::{LaunchError, LaunchResult};
use crate::infrastructure::{RunnerMarkers, TempFileRegistry};
use crate::jdk::{java_executable, JdkVersionProbe};
use crate::utils::PathUtils;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// 测试执行的运行时环境
///
/// 每个项目/模块配置构造一次，在多次测试运行之间复用。除追加 JVM 参数与惰性缓存外不可变。
/// 调用方需保证同一实例同时最多只有一个启动流程在进行。
#[derive(Clone)]
pub struct RuntimeEnvironment {
    java_home: PathBuf,
    working_directory: PathBuf,
    runner_bootstrap_class_path: String,
    runner_process_class_path: String,
    class_output_dirs: Vec<PathBuf>,
    project_under_test_class_path: String,
    additional_args: Vec<String>,
    heap_size: u32,
    markers: RunnerMarkers,
    custom_arguments: CustomArgumentsFile,
    class_dirs: OnceLock<Vec<PathBuf>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    temp_files: Arc<TempFileRegistry>,
}

impl RuntimeEnvironment {
    /// 创建新的测试执行环境
    ///
    /// * `java_home` - JDK 安装目录，类似 JAVA_HOME
    /// * `working_directory` - 测试进程的当前目录，也用于解析相对类路径条目
    /// * `runner_bootstrap_class_path` - 用于定位 bootstrap 类加载器构件的类路径
    /// * `runner_process_class_path` - 用于定位测试运行器构件的类路径
    /// * `class_output_dirs` - 需要监视变化的编译输出目录
    /// * `project_under_test_class_path` - 被测项目的类路径（顺序有意义，不含运行器自身）
    pub fn new(
        java_home: impl Into<PathBuf>,
        working_directory: impl Into<PathBuf>,
        runner_bootstrap_class_path: impl Into<String>,
        runner_process_class_path: impl Into<String>,
        class_output_dirs: Vec<PathBuf>,
        project_under_test_class_path: impl Into<String>,
    ) -> Self {
        let working_directory = working_directory.into();
        Self {
            java_home: java_home.into(),
            custom_arguments: CustomArgumentsFile::in_directory(&working_directory),
            working_directory,
            runner_bootstrap_class_path: runner_bootstrap_class_path.into(),
            runner_process_class_path: runner_process_class_path.into(),
            class_output_dirs,
            project_under_test_class_path: project_under_test_class_path.into(),
            additional_args: Vec::new(),
            heap_size: HEAP_SIZE_MB,
            markers: RunnerMarkers::default(),
            class_dirs: OnceLock::new(),
            diagnostics: Arc::new(TracingSink),
            temp_files: Arc::new(TempFileRegistry::new()),
        }
    }

    /// 注入诊断输出
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// 注入宿主持有的临时文件登记表
    pub fn with_temp_files(mut self, temp_files: Arc<TempFileRegistry>) -> Self {
        self.temp_files = temp_files;
        self
    }

    pub fn with_markers(mut self, markers: RunnerMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// 构建完整的启动规格
    pub fn create_launch_spec(&self) -> LaunchResult<ProcessLaunchSpec> {
        // 先确认 java 可执行文件存在，避免为注定失败的启动写参数文件
        java_executable(&self.java_home)?;

        let builder = self.create_classpath_argument_builder()?;
        let mut arguments = self.create_process_arguments(&builder)?;
        let executable = PathBuf::from(arguments.remove(0));
        let environment = self.create_process_environment()?;

        Ok(ProcessLaunchSpec::new(
            executable,
            arguments,
            environment,
            self.working_directory.clone(),
        )
        .with_temp_files(Arc::clone(&self.temp_files)))
    }

    /// 进程参数：java、堆大小、附加参数、类路径参数、自定义参数文件中的参数
    pub fn create_process_arguments(
        &self,
        classpath_argument_builder: &ClasspathArgumentBuilder,
    ) -> LaunchResult<Vec<String>> {
        let java = java_executable(&self.java_home)?;

        let mut args = vec![
            java.to_string_lossy().to_string(),
            jvm::heap_flag(self.heap_size),
        ];
        args.extend(self.additional_args.iter().cloned());
        args.extend(classpath_argument_builder.build_arguments());
        args.extend(self.custom_arguments.read_arguments(self.diagnostics.as_ref()));
        Ok(args)
    }

    /// 进程环境变量：CLASSPATH 只包含 bootstrap 构件
    pub fn create_process_environment(&self) -> LaunchResult<BTreeMap<String, String>> {
        let mut environment = BTreeMap::new();
        environment.insert(CLASSPATH_ENV.to_string(), self.runner_bootstrap_class_path()?);
        Ok(environment)
    }

    /// 被测项目类路径 + 运行器构件，项目条目在前
    pub fn runner_full_class_path(&self) -> LaunchResult<String> {
        let runner_full_class_path = self.compose_runner_full_class_path()?;
        self.validate_classpath(&runner_full_class_path);
        Ok(runner_full_class_path)
    }

    /// 完整类路径中缺失的条目，每个条目只检查并警告一次
    pub fn missing_runner_class_path_entries(&self) -> LaunchResult<Vec<String>> {
        let runner_full_class_path = self.compose_runner_full_class_path()?;
        Ok(self.validate_classpath(&runner_full_class_path))
    }

    fn compose_runner_full_class_path(&self) -> LaunchResult<String> {
        let runner_jar = self.find_runner_jar()?;
        self.diagnostics
            .debug(&format!("Found runner classpath entry at {}", runner_jar));

        Ok(format!(
            "{}{}{}",
            self.project_under_test_class_path, PATH_SEPARATOR, runner_jar
        ))
    }

    pub fn runner_full_class_path_entries(&self) -> LaunchResult<Vec<String>> {
        Ok(self
            .runner_full_class_path()?
            .split(PATH_SEPARATOR)
            .map(str::to_string)
            .collect())
    }

    /// bootstrap 类加载器构件所在的类路径条目
    pub fn runner_bootstrap_class_path(&self) -> LaunchResult<String> {
        let entries = ClasspathSet::parse(&self.runner_bootstrap_class_path);
        locate_artifact(&entries, &self.markers.bootstrap)
            .found()
            .ok_or_else(|| LaunchError::MissingClassLoader {
                classpath: self.runner_bootstrap_class_path.clone(),
            })
    }

    /// 测试运行器构件所在的类路径条目
    pub fn find_runner_jar(&self) -> LaunchResult<String> {
        let entries = ClasspathSet::parse(&self.runner_process_class_path);
        locate_artifact(&entries, &self.markers.runner)
            .found()
            .ok_or_else(|| LaunchError::MissingRunner {
                classpath: self.runner_process_class_path.clone(),
            })
    }

    /// 检查类路径条目是否存在（绝对路径或相对工作目录）
    ///
    /// 缺失的条目只记录警告，可能只是尚未编译；返回缺失的条目。
    pub fn validate_classpath(&self, complete_classpath: &str) -> Vec<String> {
        let mut missing = Vec::new();
        for entry in ClasspathSet::parse(complete_classpath).entries() {
            if !PathUtils::exists_absolute_or_relative(entry, &self.working_directory) {
                self.diagnostics.warning(&format!(
                    "Could not find classpath entry [{}] at file system root or relative to working directory [{}].",
                    entry,
                    self.working_directory.display()
                ));
                missing.push(entry.clone());
            }
        }
        missing
    }

    /// 被测项目类路径中当前确实是目录的条目
    ///
    /// 首次计算后缓存，之后不再访问磁盘。
    pub fn class_directories_in_classpath(&self) -> &[PathBuf] {
        self.class_dirs
            .get_or_init(|| ClasspathSet::parse(&self.project_under_test_class_path).directories())
    }

    /// 根据 JDK 版本选择类路径参数策略
    ///
    /// 版本 >= 9 时写参数文件；版本更低或无法探测时内联类路径。
    pub fn create_classpath_argument_builder(&self) -> LaunchResult<ClasspathArgumentBuilder> {
        match self.java_version() {
            Some(version) if version >= MIN_ARGUMENT_FILE_VERSION => {
                let argument_file = self.create_classpath_argument_file()?;
                self.diagnostics.debug(&format!(
                    "Using classpath argument file {} for java {}",
                    argument_file.display(),
                    version
                ));
                Ok(ClasspathArgumentBuilder::argument_file(argument_file))
            }
            _ => Ok(ClasspathArgumentBuilder::inline(self.runner_full_class_path()?)),
        }
    }

    /// Java 主版本号，无法获取时为 None
    pub fn java_version(&self) -> Option<u32> {
        JdkVersionProbe::probe(&self.java_home, self.diagnostics.as_ref())
    }

    /// 写入每行一个条目的类路径文件（仅用于诊断）
    pub fn create_classpath_file(&self) -> LaunchResult<PathBuf> {
        let entries = self.runner_full_class_path_entries()?;
        self.temp_files
            .create_with_lines(TEMP_PREFIX, CLASSPATH_SUFFIX, &entries)
            .map_err(|e| rewrap_io(e, "Error writing classpath file"))
    }

    /// 写入单行、转义后的类路径参数文件
    pub fn create_classpath_argument_file(&self) -> LaunchResult<PathBuf> {
        let escaped = escape_class_path_file_content(&self.runner_full_class_path()?);
        self.temp_files
            .create_with_lines(TEMP_PREFIX, ARGUMENT_SUFFIX, &[escaped])
            .map_err(|e| rewrap_io(e, "Error writing argument file"))
    }

    pub fn add_vm_args<I, S>(&mut self, new_args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_args
            .extend(new_args.into_iter().map(Into::into));
    }

    /// 启动测试进程时使用的堆大小（MB）
    pub fn heap_size(&self) -> u32 {
        self.heap_size
    }

    /// 测试进程的当前目录；测试中 `new File(".")` 即为此目录
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn java_home(&self) -> &Path {
        &self.java_home
    }

    pub fn class_output_dirs(&self) -> &[PathBuf] {
        &self.class_output_dirs
    }

    pub fn project_under_test_class_path(&self) -> &str {
        &self.project_under_test_class_path
    }

    pub fn additional_args(&self) -> &[String] {
        &self.additional_args
    }

    pub fn temp_files(&self) -> &Arc<TempFileRegistry> {
        &self.temp_files
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticsSink> {
        &self.diagnostics
    }
}

fn rewrap_io(error: LaunchError, operation: &str) -> LaunchError {
    match error {
        LaunchError::Io { source, .. } => LaunchError::io(operation, source),
        other => other,
    }
}

// 定位器类路径不参与相等性：它们只是插件构件的位置
impl PartialEq for RuntimeEnvironment {
    fn eq(&self, other: &Self) -> bool {
        self.class_output_dirs == other.class_output_dirs
            && self.working_directory == other.working_directory
            && self.project_under_test_class_path == other.project_under_test_class_path
            && self.java_home == other.java_home
            && self.additional_args == other.additional_args
    }
}

impl Eq for RuntimeEnvironment {}

impl Hash for RuntimeEnvironment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_output_dirs.hash(state);
        self.working_directory.hash(state);
        self.project_under_test_class_path.hash(state);
        self.java_home.hash(state);
        self.additional_args.hash(state);
    }
}

impl fmt::Debug for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeEnvironment")
            .field("java_home", &self.java_home)
            .field("working_directory", &self.working_directory)
            .field("runner_bootstrap_class_path", &self.runner_bootstrap_class_path)
            .field("runner_process_class_path", &self.runner_process_class_path)
            .field("class_output_dirs", &self.class_output_dirs)
            .field("project_under_test_class_path", &self.project_under_test_class_path)
            .field("additional_args", &self.additional_args)
            .field("heap_size", &self.heap_size)
            .finish_non_exhaustive()
    }
}
