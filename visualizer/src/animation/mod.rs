//! # Animation 模块
//!
//! 把数据结构操作的结果变成一串定时的视觉步骤并逐帧播放。
//!
//! ## 组成
//!
//! - [`step`]：步骤类型与时长
//! - [`plan`]：`Outcome` -> 步骤序列
//! - [`sequencer`]：步骤队列与逐帧推进（[`Visualizer`]）
//! - [`easing`]：淡入淡出的缓动函数

pub mod easing;
pub mod plan;
pub mod sequencer;
pub mod step;

pub use easing::EasingFunction;
pub use plan::Planner;
pub use sequencer::{SequencerState, Visualizer};
pub use step::{AnimationStep, StepKind};
