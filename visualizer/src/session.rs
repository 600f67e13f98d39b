//! # Session 模块
//!
//! 一个演示会话：一个数据结构、一个动画序列器、一个消息框和操作历史。
//!
//! ## 设计原则
//!
//! - 动画播放期间拒绝新的操作（对应界面上按钮被禁用）
//! - 每次操作都会给出反馈消息，文案与交互界面一致
//! - 结构在 `perform` 返回时已是最终状态，动画只负责展示过程

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::animation::Visualizer;
use crate::config::AppConfig;
use crate::export::{ExportError, SceneSnapshot, default_file_name, resolve_in};
use crate::layout::Layout;
use crate::message::{MessageBox, MessageKind};
use ds_core::{
    Action, ActionKind, History, InputError, Outcome, Structure, StructureError, StructureKind,
    parse_value,
};

/// `run_until_idle` 和脚本 `wait` 的最大帧数
pub const MAX_IDLE_FRAMES: usize = 1_000_000;

/// 会话错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("动画播放中，请稍候")]
    Busy,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// 演示会话
#[derive(Debug)]
pub struct Session {
    structure: Structure,
    visualizer: Visualizer,
    messages: MessageBox,
    history: History,
    config: AppConfig,
}

impl Session {
    pub fn new(kind: StructureKind, config: AppConfig) -> Self {
        let visualizer = Visualizer::new(kind, config.theme.clone(), config.animation.clone());
        info!(structure = %kind, "创建演示会话");
        Self {
            structure: Structure::new(kind),
            visualizer,
            messages: MessageBox::new(config.messages.fade_time),
            history: History::new(),
            config,
        }
    }

    /// 使用配置中指定的结构创建会话
    pub fn from_config(config: AppConfig) -> Self {
        Self::new(config.structure, config)
    }

    /// 切换到另一种结构（清空当前内容和历史）
    pub fn switch_structure(&mut self, kind: StructureKind) {
        let speed = self.visualizer.speed();
        self.structure = Structure::new(kind);
        self.visualizer = Visualizer::new(
            kind,
            self.config.theme.clone(),
            self.config.animation.clone(),
        );
        self.visualizer.set_speed(speed);
        self.messages.clear();
        self.history.clear();
        info!(structure = %kind, "切换数据结构");
    }

    pub fn kind(&self) -> StructureKind {
        self.structure.kind()
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn messages(&self) -> &MessageBox {
        &self.messages
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 内容字符串（树为中序遍历）
    pub fn contents(&self) -> String {
        self.structure.contents()
    }

    /// 是否可以接受新操作
    pub fn can_interact(&self) -> bool {
        !self.visualizer.is_animating()
    }

    pub fn speed(&self) -> f32 {
        self.visualizer.speed()
    }

    /// 设置动画速度，返回实际生效的速度
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        self.visualizer.set_speed(speed)
    }

    /// 执行一个操作
    pub fn perform(&mut self, action: Action) -> Result<Outcome, SessionError> {
        if !self.can_interact() {
            debug!(action = %action, "动画播放中，忽略操作");
            return Err(SessionError::Busy);
        }

        let outcome = self.structure.apply(&action).inspect_err(|e| {
            warn!(action = %action, error = %e, "操作不被支持");
        })?;

        let layout = Layout::compute(&self.structure, &self.config.layout);
        self.visualizer.play(&action, &outcome, layout);

        let (text, kind) = self.feedback(&action, &outcome);
        let duration = self.duration_for(kind);
        self.messages.show(text, kind, duration);

        self.history.record(action, &outcome);
        info!(action = %action, outcome = %outcome.summary(), "执行操作");
        Ok(outcome)
    }

    /// 以文本输入执行操作
    ///
    /// 需要数值的操作先校验输入，失败时给出与界面一致的错误提示。
    pub fn perform_text(&mut self, kind: ActionKind, input: &str) -> Result<Outcome, SessionError> {
        if !self.can_interact() {
            return Err(SessionError::Busy);
        }

        let value = if kind.needs_value() {
            match parse_value(input) {
                Ok(value) => Some(value),
                Err(err) => {
                    let text = self.input_error_text(kind, &err);
                    let duration = self.duration_for(MessageKind::Error);
                    self.messages.show(text, MessageKind::Error, duration);
                    debug!(input = input, error = %err, "输入无效");
                    return Err(err.into());
                }
            }
        } else {
            None
        };

        let action = kind.with_value(value)?;
        self.perform(action)
    }

    /// 推进一帧
    pub fn tick(&mut self, dt: f32) {
        self.visualizer.update(dt);
        self.messages.update(dt);
    }

    /// 以固定帧间隔推进，直到动画播完，返回经过的帧数
    pub fn run_until_idle(&mut self, dt: f32) -> usize {
        let mut frames = 0;
        while self.visualizer.is_animating() && frames < MAX_IDLE_FRAMES {
            self.tick(dt);
            frames += 1;
        }
        if self.visualizer.is_animating() {
            warn!(frames, "动画未在帧数上限内结束，直接跳过");
            self.visualizer.skip_all();
        }
        frames
    }

    /// 当前场景快照
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.structure, self.visualizer.scene())
    }

    /// 导出到配置的输出目录，文件名为 `<结构>_export.json`
    pub fn export(&mut self) -> Result<PathBuf, SessionError> {
        let path = self
            .config
            .export
            .output_dir
            .join(default_file_name(self.kind()));
        self.export_to(&path)?;
        Ok(path)
    }

    /// 以给定文件名导出到输出目录
    ///
    /// 文件名只能是输出目录下的相对路径，绝对路径或含 `..` 的路径会被拒绝。
    pub fn export_named(&mut self, file: &str) -> Result<PathBuf, SessionError> {
        match resolve_in(&self.config.export.output_dir, file) {
            Ok(path) => {
                self.export_to(&path)?;
                Ok(path)
            }
            Err(err) => {
                warn!(file, error = %err, "导出路径无效");
                self.messages.show(
                    "Export failed!",
                    MessageKind::Error,
                    self.config.messages.export_duration,
                );
                Err(err.into())
            }
        }
    }

    /// 导出到指定路径
    pub fn export_to(&mut self, path: &Path) -> Result<(), SessionError> {
        let error_duration = self.config.messages.duration;
        let export_duration = self.config.messages.export_duration;

        if !self.can_interact() {
            return Err(SessionError::Busy);
        }
        if self.structure.is_empty() {
            let noun = self.kind().noun();
            self.messages.show(
                format!("Cannot export empty {noun}!"),
                MessageKind::Error,
                error_duration,
            );
            return Err(ExportError::Empty { noun }.into());
        }

        match self.snapshot().write(path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.messages.show(
                    format!("Exported to {name}"),
                    MessageKind::Success,
                    export_duration,
                );
                Ok(())
            }
            Err(err) => {
                warn!(path = ?path, error = %err, "导出失败");
                self.messages
                    .show("Export failed!", MessageKind::Error, export_duration);
                Err(err.into())
            }
        }
    }

    /// 消息显示时长：树结构的错误消息更长
    fn duration_for(&self, kind: MessageKind) -> f32 {
        let messages = &self.config.messages;
        match kind {
            MessageKind::Error if self.kind().is_tree() => messages.error_duration,
            _ => messages.duration,
        }
    }

    fn input_error_text(&self, kind: ActionKind, err: &InputError) -> String {
        if !self.kind().is_tree() {
            return "Error: Enter a valid integer!".to_string();
        }
        match (err, kind) {
            (InputError::Empty, ActionKind::Delete) => "Error: Enter value to delete!".to_string(),
            (InputError::Empty, ActionKind::Search) => "Error: Enter value to search!".to_string(),
            (InputError::Empty, _) => "Error: Please enter a value!".to_string(),
            _ => "Error: Invalid integer!".to_string(),
        }
    }

    /// 操作结果对应的反馈消息
    fn feedback(&self, action: &Action, outcome: &Outcome) -> (String, MessageKind) {
        let kind = self.kind();
        match outcome {
            Outcome::Inserted { node, .. } => {
                let text = match action {
                    Action::InsertHead(_) => format!("Inserted at head: {}", node.value),
                    Action::InsertTail(_) => format!("Inserted at tail: {}", node.value),
                    Action::Push(_) => format!("Pushed: {}", node.value),
                    Action::Enqueue(_) => format!("Enqueued: {}", node.value),
                    _ => format!("Inserted: {}", node.value),
                };
                (text, MessageKind::Success)
            }
            Outcome::HeapInserted { node, .. } => {
                (format!("Inserted: {}", node.value), MessageKind::Success)
            }
            Outcome::Duplicate { .. } => (
                format!("Error: {} already exists!", action.value().unwrap_or_default()),
                MessageKind::Error,
            ),
            Outcome::Removed { removed, .. } => {
                let text = match action {
                    Action::Pop => format!("Popped: {}", removed.value),
                    Action::Dequeue => format!("Dequeued: {}", removed.value),
                    _ => format!("Deleted: {}", removed.value),
                };
                (text, MessageKind::Success)
            }
            Outcome::HeapRemoved { removed, .. } => {
                let text = match action {
                    Action::ExtractMin => format!("Extracted min: {}", removed.value),
                    _ => format!("Deleted: {}", removed.value),
                };
                (text, MessageKind::Success)
            }
            Outcome::NotFound { .. } => {
                let value = action.value().unwrap_or_default();
                match (action.kind(), kind.is_tree()) {
                    (ActionKind::Search, true) => {
                        (format!("{value} not found."), MessageKind::Info)
                    }
                    (ActionKind::Search, false) => ("Value not found.".to_string(), MessageKind::Info),
                    (_, true) => (format!("Error: {value} not found!"), MessageKind::Error),
                    (_, false) => ("Error: Value not found!".to_string(), MessageKind::Error),
                }
            }
            Outcome::Found { node, .. } => {
                let text = match &self.structure {
                    Structure::Stack(stack) => match stack.position_from_top(node.id) {
                        Some(pos) => format!("Found at position {pos} from top"),
                        None => format!("Found: {}", node.value),
                    },
                    Structure::Queue(queue) => match queue.position_from_front(node.id) {
                        Some(pos) => format!("Found at position {pos} from front"),
                        None => format!("Found: {}", node.value),
                    },
                    _ => format!("Found: {}", node.value),
                };
                (text, MessageKind::Success)
            }
            Outcome::Peeked { node } => {
                let text = match (kind, action) {
                    (StructureKind::Stack, _) => format!("Top element: {}", node.value),
                    (StructureKind::Queue, Action::PeekRear) => {
                        format!("Rear element: {}", node.value)
                    }
                    (StructureKind::Queue, _) => format!("Front element: {}", node.value),
                    _ => format!("Min element: {}", node.value),
                };
                (text, MessageKind::Info)
            }
            Outcome::Empty => {
                let name = match kind {
                    StructureKind::Stack => "Stack",
                    StructureKind::Queue => "Queue",
                    StructureKind::MinHeap => "Heap",
                    StructureKind::LinkedList => "List",
                    StructureKind::Bst | StructureKind::Avl => "Tree",
                };
                (format!("Error: {name} is empty!"), MessageKind::Error)
            }
            Outcome::Cleared { removed } => {
                let text = match kind {
                    StructureKind::Bst | StructureKind::Avl if removed.is_empty() => {
                        "Tree is already empty.".to_string()
                    }
                    StructureKind::Bst | StructureKind::Avl => "Tree cleared!".to_string(),
                    StructureKind::MinHeap if removed.is_empty() => {
                        "Heap is already empty.".to_string()
                    }
                    StructureKind::MinHeap => "Heap cleared!".to_string(),
                    StructureKind::LinkedList => "List cleared!".to_string(),
                    StructureKind::Stack => "Stack cleared!".to_string(),
                    StructureKind::Queue => "Queue cleared!".to_string(),
                };
                (text, MessageKind::Info)
            }
        }
    }
}
