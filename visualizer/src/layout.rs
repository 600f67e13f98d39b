//! # Layout 模块
//!
//! 根据数据结构的当前形状计算每个节点的目标位置。
//!
//! - 树（BST、AVL、按下标组织的堆）：根在区域顶部居中，每下一层水平偏移减半，
//!   但不小于最小水平间距
//! - 链表：水平一行，相邻节点之间有边
//! - 栈：竖直一列，栈底在下
//! - 队列：水平一行，队首在左

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use ds_core::{NodeId, NodeRef, Structure, TreeView};

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 栈中相邻元素的竖直间隔
const STACK_STEP: f32 = 45.0;
/// 栈底距区域底边的距离
const STACK_BOTTOM_MARGIN: f32 = 50.0;
/// 链表行首距区域左边的距离
const LIST_LEFT_MARGIN: f32 = 50.0;
/// 链表节点之间额外留给箭头的宽度
const LIST_ARROW_GAP: f32 = 30.0;
/// 队列行首距区域左边的距离
const QUEUE_LEFT_MARGIN: f32 = 80.0;
/// 队列中相邻元素的水平间隔
const QUEUE_STEP: f32 = 100.0;
/// 树根距区域顶边的额外距离
const TREE_TOP_MARGIN: f32 = 20.0;

/// 一次布局的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// 节点及其目标位置
    pub nodes: Vec<(NodeRef, Vec2)>,
    /// 边（父 -> 子，或前驱 -> 后继）
    pub edges: Vec<(NodeId, NodeId)>,
    /// 按存储顺序排列的节点 ID（堆为数组槽位顺序）
    pub order: Vec<NodeId>,
}

impl Layout {
    /// 空布局
    pub fn empty() -> Self {
        Self::default()
    }

    /// 计算结构当前形状的布局
    pub fn compute(structure: &Structure, config: &LayoutConfig) -> Self {
        match structure {
            Structure::Bst(tree) => {
                let mut layout = tree_layout(tree.root(), config);
                layout.order = layout.nodes.iter().map(|(n, _)| n.id).collect();
                layout
            }
            Structure::Avl(tree) => {
                let mut layout = tree_layout(tree.root(), config);
                layout.order = layout.nodes.iter().map(|(n, _)| n.id).collect();
                layout
            }
            Structure::MinHeap(heap) => {
                let mut layout = tree_layout(heap.tree(), config);
                layout.order = heap.nodes().iter().map(|n| n.id).collect();
                layout
            }
            Structure::LinkedList(list) => {
                let area = &config.area;
                let step = config.linear_node_width + config.linear_node_spacing + LIST_ARROW_GAP;
                let origin = Vec2::new(area.x + LIST_LEFT_MARGIN, area.y + area.height / 2.0);
                let mut layout = row(list.nodes(), origin, step);
                layout.edges = list.edges();
                layout
            }
            Structure::Stack(stack) => {
                let area = &config.area;
                let x = area.x + area.width / 2.0;
                let bottom = area.y + area.height - STACK_BOTTOM_MARGIN;
                let nodes = stack
                    .nodes()
                    .iter()
                    .enumerate()
                    .map(|(i, node)| (*node, Vec2::new(x, bottom - i as f32 * STACK_STEP)))
                    .collect();
                Layout {
                    nodes,
                    edges: Vec::new(),
                    order: stack.nodes().iter().map(|n| n.id).collect(),
                }
            }
            Structure::Queue(queue) => {
                let area = &config.area;
                let origin = Vec2::new(area.x + QUEUE_LEFT_MARGIN, area.y + area.height / 2.0);
                row(queue.nodes(), origin, QUEUE_STEP)
            }
        }
    }

    /// 某个节点的目标位置
    pub fn position(&self, id: NodeId) -> Option<Vec2> {
        self.nodes
            .iter()
            .find(|(node, _)| node.id == id)
            .map(|(_, pos)| *pos)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(node, _)| node.id == id)
    }

    /// 存储槽位上的节点
    pub fn slot(&self, index: usize) -> Option<NodeId> {
        self.order.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn row(nodes: Vec<NodeRef>, origin: Vec2, step: f32) -> Layout {
    let order = nodes.iter().map(|n| n.id).collect();
    let nodes = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| (node, Vec2::new(origin.x + i as f32 * step, origin.y)))
        .collect();
    Layout {
        nodes,
        edges: Vec::new(),
        order,
    }
}

fn tree_layout<T: TreeView>(root: Option<T>, config: &LayoutConfig) -> Layout {
    let mut layout = Layout::empty();
    let Some(root) = root else {
        return layout;
    };

    let area = &config.area;
    let origin = Vec2::new(
        area.x + area.width / 2.0,
        area.y + config.node_radius + TREE_TOP_MARGIN,
    );
    place(&root, origin, area.width / 4.0, config, &mut layout);
    layout.edges = root.edges();
    layout
}

/// 前序放置子树，`offset` 是孩子相对父节点的水平偏移
fn place<T: TreeView>(node: &T, pos: Vec2, offset: f32, config: &LayoutConfig, out: &mut Layout) {
    out.nodes.push((node.node(), pos));

    let child_y = pos.y + config.vertical_spacing;
    let child_offset = (offset / 2.0).max(config.min_horizontal_spacing);

    if let Some(left) = node.left() {
        place(&left, Vec2::new(pos.x - offset, child_y), child_offset, config, out);
    }
    if let Some(right) = node.right() {
        place(&right, Vec2::new(pos.x + offset, child_y), child_offset, config, out);
    }
}
