//! # Export 模块
//!
//! 把当前场景导出为 JSON 快照（节点位置、颜色、边以及结构内容）。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::scene::Scene;
use crate::theme::Color;
use ds_core::{NodeId, Structure, StructureKind};

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{noun} 为空，无法导出")]
    Empty { noun: &'static str },

    #[error("导出文件名必须是输出目录下的相对路径: {path:?}")]
    InvalidPath { path: PathBuf },

    #[error("快照序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("写入快照失败 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 快照中的节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub value: i32,
    pub x: f32,
    pub y: f32,
    pub fill: Color,
    pub outline: Color,
}

/// 场景快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// 结构标题（如 "AVL Tree"）
    pub structure: String,
    pub kind: StructureKind,
    /// 内容字符串（树为中序）
    pub contents: String,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl SceneSnapshot {
    /// 抓取当前场景，节点取目标位置
    pub fn capture(structure: &Structure, scene: &Scene) -> Self {
        let kind = structure.kind();
        Self {
            structure: kind.title().to_string(),
            kind,
            contents: structure.contents(),
            nodes: scene
                .nodes()
                .map(|visual| SnapshotNode {
                    id: visual.id,
                    value: visual.value,
                    x: visual.target.x,
                    y: visual.target.y,
                    fill: visual.fill,
                    outline: visual.outline,
                })
                .collect(),
            edges: scene.edges().iter().map(|e| (e.from, e.to)).collect(),
        }
    }

    /// 写入文件（pretty JSON），必要时创建父目录
    pub fn write(&self, path: &Path) -> Result<(), ExportError> {
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_error)?;

        info!(path = ?path, nodes = self.nodes.len(), "快照导出成功");
        Ok(())
    }

    /// 从文件读取快照
    pub fn read(path: &Path) -> Result<Self, ExportError> {
        let content = fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// 某种结构的默认导出文件名
pub fn default_file_name(kind: StructureKind) -> String {
    format!("{}_export.json", kind.export_stem())
}

/// 把文件名拼到输出目录下，只接受普通的相对路径（不允许绝对路径和 `..`）
pub fn resolve_in(output_dir: &Path, file: &str) -> Result<PathBuf, ExportError> {
    let relative = Path::new(file);
    let plain = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if file.is_empty() || !plain {
        return Err(ExportError::InvalidPath {
            path: relative.to_path_buf(),
        });
    }
    Ok(output_dir.join(relative))
}
