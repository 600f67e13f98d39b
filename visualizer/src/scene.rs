//! # Scene 模块
//!
//! 渲染器可直接绘制的场景模型：节点的当前位置、目标位置、颜色、透明度以及边。
//!
//! 场景只由 [`crate::animation::Visualizer`] 修改。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::layout::{Layout, Vec2};
use crate::theme::{Color, NodeColors};
use ds_core::{NodeId, NodeRef};

/// 位置差在这个距离内直接吸附到目标
pub const SNAP_DISTANCE: f32 = 0.5;

/// 单个节点的可视状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeVisual {
    pub id: NodeId,
    pub value: i32,
    /// 当前位置
    pub position: Vec2,
    /// 目标位置
    pub target: Vec2,
    pub fill: Color,
    pub outline: Color,
    /// 透明度 (0.0 - 1.0)
    pub alpha: f32,
    pub highlighted: bool,
}

impl NodeVisual {
    /// 在目标位置创建节点
    pub fn new(node: NodeRef, target: Vec2, colors: NodeColors) -> Self {
        Self {
            id: node.id,
            value: node.value,
            position: target,
            target,
            fill: colors.fill,
            outline: colors.outline,
            alpha: 1.0,
            highlighted: false,
        }
    }

    /// 是否已到达目标位置
    pub fn settled(&self) -> bool {
        self.position == self.target
    }

    /// 向目标移动一帧
    ///
    /// `factor` 是本帧逼近比例，超过 1 时按 1 处理，不会越过目标。
    pub fn step_toward_target(&mut self, factor: f32) {
        let dx = self.target.x - self.position.x;
        let dy = self.target.y - self.position.y;
        if dx.abs() > SNAP_DISTANCE || dy.abs() > SNAP_DISTANCE {
            let t = factor.clamp(0.0, 1.0);
            self.position.x += dx * t;
            self.position.y += dy * t;
        } else {
            self.position = self.target;
        }
    }

    fn reset_colors(&mut self, colors: NodeColors) {
        self.fill = colors.fill;
        self.outline = colors.outline;
        self.highlighted = false;
    }
}

/// 边的可视状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeVisual {
    pub from: NodeId,
    pub to: NodeId,
    pub highlighted: bool,
}

impl EdgeVisual {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            highlighted: false,
        }
    }

    fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// 场景
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    nodes: BTreeMap<NodeId, NodeVisual>,
    edges: Vec<EdgeVisual>,
    /// 静止状态的节点配色
    base: NodeColors,
}

impl Scene {
    pub fn new(base: NodeColors) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            base,
        }
    }

    pub fn base_colors(&self) -> NodeColors {
        self.base
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeVisual> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeVisual> {
        self.nodes.get_mut(&id)
    }

    /// 所有节点（按 ID 排序）
    pub fn nodes(&self) -> impl Iterator<Item = &NodeVisual> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[EdgeVisual] {
        &self.edges
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&EdgeVisual> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 所有节点是否都已到达目标位置
    pub fn is_settled(&self) -> bool {
        self.nodes.values().all(NodeVisual::settled)
    }

    /// 布局是否会移动场景中已有的节点
    pub fn would_move(&self, layout: &Layout) -> bool {
        layout.nodes.iter().any(|(node, pos)| {
            self.nodes
                .get(&node.id)
                .is_some_and(|visual| visual.target != *pos)
        })
    }

    /// 只添加布局中新出现的节点（透明）和与它们相连的边，已有节点保持不动
    pub fn attach(&mut self, layout: &Layout) {
        let mut added = Vec::new();
        for (node, pos) in &layout.nodes {
            if !self.nodes.contains_key(&node.id) {
                let mut visual = NodeVisual::new(*node, *pos, self.base);
                visual.alpha = 0.0;
                self.nodes.insert(node.id, visual);
                added.push(node.id);
            }
        }

        for &(from, to) in &layout.edges {
            let incident = added.contains(&from) || added.contains(&to);
            if incident && self.edge(from, to).is_none() {
                self.edges.push(EdgeVisual::new(from, to));
            }
        }
    }

    /// 与布局完全同步
    ///
    /// 删除布局中不存在的节点，新节点直接出现在目标位置，
    /// 已有节点更新值和目标位置，边按布局重建（保留高亮状态）。
    pub fn sync(&mut self, layout: &Layout) {
        self.nodes.retain(|id, _| layout.contains(*id));

        for (node, pos) in &layout.nodes {
            match self.nodes.get_mut(&node.id) {
                Some(visual) => {
                    visual.value = node.value;
                    visual.target = *pos;
                }
                None => {
                    self.nodes
                        .insert(node.id, NodeVisual::new(*node, *pos, self.base));
                }
            }
        }

        let previous = std::mem::take(&mut self.edges);
        self.edges = layout
            .edges
            .iter()
            .map(|&(from, to)| EdgeVisual {
                from,
                to,
                highlighted: previous
                    .iter()
                    .any(|e| e.from == from && e.to == to && e.highlighted),
            })
            .collect();
    }

    /// 直接跳到布局：同步后所有节点吸附到目标，颜色和透明度复位
    pub fn snap_to(&mut self, layout: &Layout) {
        self.sync(layout);
        for visual in self.nodes.values_mut() {
            visual.position = visual.target;
            visual.alpha = 1.0;
        }
        self.reset_colors();
    }

    /// 移除一个节点及与它相连的边
    pub fn remove(&mut self, id: NodeId) -> Option<NodeVisual> {
        self.edges.retain(|e| !e.touches(id));
        self.nodes.remove(&id)
    }

    /// 高亮一条边，不存在时返回 false
    pub fn highlight_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        match self.edges.iter_mut().find(|e| e.from == from && e.to == to) {
            Some(edge) => {
                edge.highlighted = true;
                true
            }
            None => false,
        }
    }

    /// 所有节点恢复静止配色，清除节点与边的高亮
    pub fn reset_colors(&mut self) {
        let base = self.base;
        for visual in self.nodes.values_mut() {
            visual.reset_colors(base);
        }
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }

    /// 所有节点移动一帧
    pub fn advance_positions(&mut self, factor: f32) {
        for visual in self.nodes.values_mut() {
            visual.step_toward_target(factor);
        }
    }
}
