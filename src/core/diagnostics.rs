use crate::core::constants::config::LOG_TARGET;
use std::fmt;
use std::sync::{Arc, Mutex};

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Debug => write!(f, "debug"),
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// 诊断输出接口
///
/// 启动核心不直接调用全局日志，而是通过调用方注入的 sink 输出非致命信息。
pub trait DiagnosticsSink: Send + Sync {
    fn log(&self, level: DiagnosticLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(DiagnosticLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(DiagnosticLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(DiagnosticLevel::Warning, message);
    }
}

/// 转发到 tracing 的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!(target: LOG_TARGET, "{}", message),
            DiagnosticLevel::Info => tracing::info!(target: LOG_TARGET, "{}", message),
            DiagnosticLevel::Warning => tracing::warn!(target: LOG_TARGET, "{}", message),
        }
    }
}

/// 在内存中记录诊断信息，供宿主展示或测试断言
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(DiagnosticLevel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的全部诊断
    pub fn records(&self) -> Vec<(DiagnosticLevel, String)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 指定级别的消息
    pub fn messages_at(&self, level: DiagnosticLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.warning("first");
        sink.debug("second");
        sink.warning("third");

        assert_eq!(sink.records().len(), 3);
        assert_eq!(
            sink.messages_at(DiagnosticLevel::Warning),
            vec!["first".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn test_memory_sink_clones_share_records() {
        let sink = MemorySink::new();
        let shared: Arc<dyn DiagnosticsSink> = Arc::new(sink.clone());
        shared.info("via trait object");
        assert_eq!(sink.messages_at(DiagnosticLevel::Info), vec!["via trait object"]);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.warning("no subscriber installed");
    }
}
