//! # Visualizer 层
//!
//! 数据结构可视化的展示层：把 `ds-core` 的操作结果变成布局、动画与反馈消息。
//!
//! ## 架构说明
//!
//! Visualizer 层负责：
//! - 布局计算（树形 / 线性）
//! - 动画规划与逐帧播放
//! - 反馈消息与导出
//! - 配置与主题
//!
//! 结构语义全部在 `ds-core` 中，这一层只读取结构状态和操作结果。

pub mod animation;
pub mod config;
pub mod export;
pub mod layout;
pub mod message;
pub mod runner;
pub mod scene;
pub mod session;
pub mod theme;

pub use animation::{AnimationStep, EasingFunction, Planner, SequencerState, StepKind, Visualizer};
pub use config::{
    AnimationConfig, AppConfig, ConfigError, DrawArea, ExportConfig, LayoutConfig, MessageConfig,
};
pub use export::{ExportError, SceneSnapshot, SnapshotNode};
pub use layout::{Layout, Vec2};
pub use message::{Message, MessageBox, MessageKind};
pub use runner::{FeedbackLine, RunReport, ScriptRunner};
pub use scene::{EdgeVisual, NodeVisual, Scene};
pub use session::{Session, SessionError};
pub use theme::{Color, NodeColors, Theme};
