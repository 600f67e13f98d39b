//! # Sequencer 模块
//!
//! 动画步骤队列。
//!
//! ## 状态
//!
//! ```text
//!        enqueue            step 结束且队列为空
//! Idle ─────────► Playing ─────────────────────► Idle
//!                   │  ▲
//!                   └──┘ step 结束，开始下一个
//! ```
//!
//! 任意时刻最多只有一个步骤处于活跃状态。每次 `update` 最多完成一个步骤，
//! 完成时执行该步骤的收尾效果（淡出的节点被移除、颜色复位等）。

use std::collections::VecDeque;
use std::f32::consts::PI;
use tracing::{debug, trace};

use crate::animation::easing::EasingFunction;
use crate::animation::plan::Planner;
use crate::animation::step::{AnimationStep, StepKind};
use crate::config::AnimationConfig;
use crate::layout::Layout;
use crate::scene::Scene;
use crate::theme::Theme;
use ds_core::{Action, Outcome, StructureKind};

/// 队列状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// 没有活跃步骤
    Idle,
    /// 有步骤正在播放
    Playing,
}

/// 正在播放的步骤
#[derive(Debug, Clone)]
struct ActiveStep {
    step: AnimationStep,
    /// 已经过的时间（已乘速度）
    elapsed: f32,
}

/// 动画序列器
#[derive(Debug, Clone)]
pub struct Visualizer {
    scene: Scene,
    queue: VecDeque<AnimationStep>,
    current: Option<ActiveStep>,
    speed: f32,
    config: AnimationConfig,
    theme: Theme,
}

impl Visualizer {
    pub fn new(kind: StructureKind, theme: Theme, config: AnimationConfig) -> Self {
        let scene = Scene::new(theme.base_colors(kind));
        let speed = config.clamp_speed(config.default_speed);
        Self {
            scene,
            queue: VecDeque::new(),
            current: None,
            speed,
            config,
            theme,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn state(&self) -> SequencerState {
        if self.current.is_some() {
            SequencerState::Playing
        } else {
            SequencerState::Idle
        }
    }

    /// 是否有动画正在播放
    pub fn is_animating(&self) -> bool {
        self.state() == SequencerState::Playing
    }

    /// 正在播放的步骤
    pub fn current_step(&self) -> Option<&AnimationStep> {
        self.current.as_ref().map(|active| &active.step)
    }

    /// 等待播放的步骤数（不含当前步骤）
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// 设置播放速度，返回限制到允许范围后的实际速度
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        self.speed = self.config.clamp_speed(speed);
        debug!(speed = self.speed, "设置动画速度");
        self.speed
    }

    /// 不经动画直接把场景同步到布局
    pub fn refresh(&mut self, layout: &Layout) {
        self.skip_all();
        self.scene.snap_to(layout);
    }

    /// 为一次操作生成并开始播放动画
    ///
    /// 上一段动画如果还没播完，会先被瞬间完成。
    pub fn play(&mut self, action: &Action, outcome: &Outcome, layout: Layout) {
        self.skip_all();

        let moves = self.scene.would_move(&layout);
        let steps = Planner::new(self.config.step_duration, &self.theme)
            .plan(action, outcome, &layout, moves);
        debug!(action = %action, steps = steps.len(), "生成动画计划");
        self.enqueue(steps);
    }

    /// 追加步骤，空闲时立即开始第一个
    pub fn enqueue(&mut self, steps: impl IntoIterator<Item = AnimationStep>) {
        self.queue.extend(steps);
        if self.current.is_none() {
            self.start_next();
        }
    }

    /// 推进一帧
    pub fn update(&mut self, dt: f32) {
        self.scene
            .advance_positions(self.config.move_speed * self.speed * dt);

        let finished = match self.current.as_mut() {
            None => return,
            Some(active) => {
                active.elapsed += dt * self.speed;
                let progress = active.step.progress(active.elapsed);
                advance(
                    &mut self.scene,
                    &self.theme,
                    self.config.fade_easing,
                    &active.step.kind,
                    progress,
                );
                active.elapsed >= active.step.duration
            }
        };

        if finished {
            self.complete_current();
            self.start_next();
        }
    }

    /// 瞬间完成当前步骤和所有排队步骤
    pub fn skip_all(&mut self) {
        if self.current.is_none() && self.queue.is_empty() {
            return;
        }
        debug!(pending = self.queue.len(), "跳过剩余动画");

        if let Some(active) = self.current.take() {
            self.settle(&active.step.kind);
        }
        while let Some(step) = self.queue.pop_front() {
            begin(&mut self.scene, &self.theme, &step.kind);
            self.settle(&step.kind);
        }
    }

    fn settle(&mut self, kind: &StepKind) {
        advance(&mut self.scene, &self.theme, self.config.fade_easing, kind, 1.0);
        finish(&mut self.scene, kind);
    }

    fn complete_current(&mut self) {
        if let Some(active) = self.current.take() {
            finish(&mut self.scene, &active.step.kind);
            trace!(step = active.step.kind.name(), "动画步骤完成");
        }
    }

    fn start_next(&mut self) {
        if let Some(step) = self.queue.pop_front() {
            trace!(step = step.kind.name(), duration = step.duration, "开始动画步骤");
            begin(&mut self.scene, &self.theme, &step.kind);
            self.current = Some(ActiveStep { step, elapsed: 0.0 });
        }
    }
}

/// 步骤开始时的效果
fn begin(scene: &mut Scene, theme: &Theme, kind: &StepKind) {
    match kind {
        StepKind::HighlightNode(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                visual.fill = theme.node_highlight.fill;
                visual.outline = theme.node_highlight.outline;
                visual.highlighted = true;
            }
        }
        StepKind::HighlightEdge { from, to } => {
            scene.highlight_edge(*from, *to);
        }
        StepKind::ColorChange { node, color } => {
            if let Some(visual) = scene.node_mut(*node) {
                visual.fill = *color;
            }
        }
        StepKind::FadeIn(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                visual.alpha = 0.0;
                visual.fill = theme.node_new.fill;
                visual.outline = theme.node_new.outline;
            }
        }
        StepKind::Attach(layout) => scene.attach(layout),
        StepKind::MoveNodes(layout) => scene.sync(layout),
        StepKind::FadeOut(_) | StepKind::Pause | StepKind::ResetColors | StepKind::FlashNode(_) => {}
    }
}

/// 按进度更新的效果
fn advance(scene: &mut Scene, theme: &Theme, easing: EasingFunction, kind: &StepKind, progress: f32) {
    match kind {
        StepKind::FadeIn(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                visual.alpha = easing.apply(progress);
            }
        }
        StepKind::FadeOut(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                visual.alpha = 1.0 - easing.apply(progress);
            }
        }
        StepKind::FlashNode(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                let flash = (progress * 4.0 * PI).sin() * 0.5 + 0.5;
                visual.fill = theme.node_highlight.fill.scaled(0.5 + 0.5 * flash);
            }
        }
        _ => {}
    }
}

/// 步骤结束时的收尾效果
fn finish(scene: &mut Scene, kind: &StepKind) {
    match kind {
        StepKind::FadeIn(id) => {
            if let Some(visual) = scene.node_mut(*id) {
                visual.alpha = 1.0;
            }
        }
        StepKind::FadeOut(id) => {
            scene.remove(*id);
        }
        StepKind::ResetColors => scene.reset_colors(),
        _ => {}
    }
}
