use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

/// 带名称的工作单元
pub struct NamedTask {
    name: String,
    work: Box<dyn FnOnce() + Send>,
}

impl NamedTask {
    pub fn new(name: impl Into<String>, work: impl FnOnce() + Send + 'static) -> Self {
        Self {
            name: name.into(),
            work: Box::new(work),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(self) {
        (self.work)()
    }
}

impl fmt::Debug for NamedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedTask").field("name", &self.name).finish()
    }
}

/// 变更事件链使用的串行执行队列
///
/// 环境构建与进程启动都在某个工作单元内同步执行，同一环境不会有两个并发的启动。
pub trait EventQueue: Send + Sync {
    fn push_named(&self, task: NamedTask);
}

/// 在调用线程上严格按入队顺序执行的队列
#[derive(Debug, Default)]
pub struct SerialEventQueue {
    pending: Mutex<VecDeque<NamedTask>>,
}

impl SerialEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 依次执行所有待处理任务，返回执行过的任务名称
    pub fn drain(&self) -> Vec<String> {
        let mut executed = Vec::new();
        // 任务执行期间不持有锁，任务内部可以继续入队
        while let Some(task) = self.next_task() {
            executed.push(task.name().to_string());
            task.run();
        }
        executed
    }

    fn next_task(&self) -> Option<NamedTask> {
        self.lock().pop_front()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<NamedTask>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl EventQueue for SerialEventQueue {
    fn push_named(&self, task: NamedTask) {
        self.lock().push_back(task);
    }
}
