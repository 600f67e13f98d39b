//! # Step 模块
//!
//! 动画步骤：一个带时长的视觉变化单元。

use crate::layout::Layout;
use crate::theme::Color;
use ds_core::NodeId;

/// 步骤类型
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    /// 高亮节点
    HighlightNode(NodeId),
    /// 高亮边（父 -> 子）
    HighlightEdge { from: NodeId, to: NodeId },
    /// 改变节点填充色
    ColorChange { node: NodeId, color: Color },
    /// 淡入（开始时透明度置 0 并换成"新节点"配色）
    FadeIn(NodeId),
    /// 淡出，结束时移除节点
    FadeOut(NodeId),
    /// 只把布局中新出现的节点以透明状态加入场景
    Attach(Layout),
    /// 场景与布局完全同步，节点随后向新位置移动
    MoveNodes(Layout),
    /// 停顿
    Pause,
    /// 结束时恢复静止配色
    ResetColors,
    /// 闪烁节点
    FlashNode(NodeId),
}

impl StepKind {
    /// 步骤名称（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::HighlightNode(_) => "highlight-node",
            StepKind::HighlightEdge { .. } => "highlight-edge",
            StepKind::ColorChange { .. } => "color-change",
            StepKind::FadeIn(_) => "fade-in",
            StepKind::FadeOut(_) => "fade-out",
            StepKind::Attach(_) => "attach",
            StepKind::MoveNodes(_) => "move-nodes",
            StepKind::Pause => "pause",
            StepKind::ResetColors => "reset-colors",
            StepKind::FlashNode(_) => "flash-node",
        }
    }

    /// 步骤作用的单个节点
    pub fn target(&self) -> Option<NodeId> {
        match self {
            StepKind::HighlightNode(id)
            | StepKind::FadeIn(id)
            | StepKind::FadeOut(id)
            | StepKind::FlashNode(id) => Some(*id),
            StepKind::HighlightEdge { to, .. } => Some(*to),
            StepKind::ColorChange { node, .. } => Some(*node),
            _ => None,
        }
    }
}

/// 动画步骤
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStep {
    pub kind: StepKind,
    /// 时长（秒，1 倍速下）
    pub duration: f32,
}

impl AnimationStep {
    pub fn new(kind: StepKind, duration: f32) -> Self {
        Self {
            kind,
            duration: duration.max(0.0),
        }
    }

    /// 时长为 `elapsed` 时的进度 (0.0 - 1.0)
    ///
    /// 时长为 0 的步骤进度恒为 1。
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}
