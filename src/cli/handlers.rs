use crate::cli::commands::*;
use crate::cli::output::{OutputFormat, FORMATTER};
use crate::core::diagnostics::{DiagnosticsSink, TracingSink};
use crate::core::events::{EventQueue, NamedTask, SerialEventQueue};
use crate::environment::{ModuleSettings, ProcessLaunchSpec, RuntimeEnvironment};
use crate::error::{LaunchError, LaunchResult};
use crate::infrastructure::{LaunchConfig, TempFileRegistry};
use crate::jdk::{detect_java_home, JdkVersionProbe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 命令处理器
///
/// 持有临时文件登记表；处理器被释放时未保留的临时文件随之删除。
pub struct CommandHandler {
    config: LaunchConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
    temp_files: Arc<TempFileRegistry>,
    queue: SerialEventQueue,
}

impl CommandHandler {
    /// 创建新的命令处理器
    pub fn new(config: LaunchConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingSink))
    }

    pub fn with_diagnostics(config: LaunchConfig, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        let temp_files = match &config.temp_dir {
            Some(dir) => TempFileRegistry::in_dir(dir.clone()),
            None => TempFileRegistry::new(),
        };
        Self {
            config,
            diagnostics,
            temp_files: Arc::new(temp_files),
            queue: SerialEventQueue::new(),
        }
    }

    pub fn temp_files(&self) -> &Arc<TempFileRegistry> {
        &self.temp_files
    }

    /// 处理命令，返回要打印的输出
    pub fn handle_command(&self, command: Commands) -> LaunchResult<String> {
        match command {
            Commands::Probe { java_home, json } => {
                self.handle_probe(java_home, OutputFormat::from_json_flag(json))
            }
            Commands::Plan {
                module,
                vm_args,
                json,
                keep_files,
            } => self.handle_plan(
                &module,
                vm_args,
                keep_files,
                OutputFormat::from_json_flag(json),
            ),
            Commands::ClassDirs { module, json } => {
                self.handle_class_dirs(&module, OutputFormat::from_json_flag(json))
            }
            Commands::Validate { module, json } => {
                self.handle_validate(&module, OutputFormat::from_json_flag(json))
            }
        }
    }

    fn handle_probe(&self, java_home: Option<PathBuf>, format: OutputFormat) -> LaunchResult<String> {
        let java_home = java_home.or_else(detect_java_home).ok_or_else(|| {
            LaunchError::config("未找到 JDK：请使用 --java-home 或设置 JAVA_HOME")
        })?;

        let release = JdkVersionProbe::read_release(&java_home, self.diagnostics.as_ref());
        FORMATTER.format_release(&java_home, release.as_ref(), format)
    }

    fn handle_plan(
        &self,
        module: &Path,
        vm_args: Vec<String>,
        keep_files: bool,
        format: OutputFormat,
    ) -> LaunchResult<String> {
        let settings = ModuleSettings::load(module)?;
        settings.write_to_log(self.diagnostics.as_ref());

        let mut environment = self.environment_for(&settings);
        environment.add_vm_args(self.config.vm_args.iter().cloned());
        environment.add_vm_args(vm_args);

        // 启动规格在事件队列的工作单元中构建
        let result: Arc<Mutex<Option<LaunchResult<ProcessLaunchSpec>>>> =
            Arc::new(Mutex::new(None));
        let slot = Arc::clone(&result);
        let task_name = format!("Launch tests for {}", display_name(&settings, module));
        self.queue.push_named(NamedTask::new(task_name, move || {
            let spec = environment.create_launch_spec();
            if let Ok(mut slot) = slot.lock() {
                *slot = Some(spec);
            }
        }));
        self.queue.drain();

        let spec = result
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .ok_or_else(|| LaunchError::config("启动任务未产生结果"))??;

        let kept_files = if keep_files {
            self.temp_files.persist_all()
        } else {
            Vec::new()
        };

        FORMATTER.format_launch_spec(&spec, &kept_files, format)
    }

    fn handle_class_dirs(&self, module: &Path, format: OutputFormat) -> LaunchResult<String> {
        let settings = ModuleSettings::load(module)?;
        let environment = self.environment_for(&settings);
        FORMATTER.format_paths(
            "class directories",
            environment.class_directories_in_classpath(),
            format,
        )
    }

    fn handle_validate(&self, module: &Path, format: OutputFormat) -> LaunchResult<String> {
        let settings = ModuleSettings::load(module)?;
        let environment = self.environment_for(&settings);
        let missing = environment.missing_runner_class_path_entries()?;
        FORMATTER.format_paths("missing classpath entries", &missing, format)
    }

    fn environment_for(&self, settings: &ModuleSettings) -> RuntimeEnvironment {
        settings
            .runtime_environment(Arc::clone(&self.diagnostics))
            .with_temp_files(Arc::clone(&self.temp_files))
            .with_markers(self.config.markers.clone())
    }
}

fn display_name(settings: &ModuleSettings, module: &Path) -> String {
    if settings.name.is_empty() {
        module.display().to_string()
    } else {
        settings.name.clone()
    }
}
