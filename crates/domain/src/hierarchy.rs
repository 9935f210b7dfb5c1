use std::collections::{HashMap, HashSet};

use orgmesh_core::{AppError, AppResult, PositionId};
use serde::{Deserialize, Serialize};

use crate::{Department, EmployeeRef, Position};

/// One node of an assembled department forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionNode {
    /// The position this node represents.
    pub position: Position,
    /// Employees currently holding the position (open assignments only).
    pub employees: Vec<EmployeeRef>,
    /// Positions reporting directly to this one.
    pub children: Vec<PositionNode>,
    /// Depth below the nearest root; roots are level 0.
    pub level: u32,
}

impl PositionNode {
    /// Counts this node and every descendant.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PositionNode::subtree_size)
            .sum::<usize>()
    }
}

/// Full hierarchy view for one department, rebuilt on every read from the
/// stored parent pointers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentHierarchy {
    /// The department the forest was built for.
    pub department: Department,
    /// Root nodes: positions with no resolvable parent inside the
    /// department's loaded position set.
    pub roots: Vec<PositionNode>,
}

/// Reduced single-branch lineage view for one employee, used when the
/// caller may only see their own reporting line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStructure {
    /// The employee the view was resolved for.
    pub employee: EmployeeRef,
    /// The position held through the open assignment.
    pub position: Position,
    /// The department owning that position.
    pub department: Department,
}

/// Assembles the reporting forest for one department's loaded position set.
///
/// A position attaches under its `reports_to` target only when that target
/// is another position in the same loaded set; otherwise it becomes a root.
/// Parents in other departments therefore degrade into extra roots instead
/// of failing the whole build.
///
/// Level numbering walks each root with an explicit stack. A `visited`
/// guard turns a reporting cycle into `AppError::Internal` instead of a
/// hang; valid data never takes that path.
pub fn assemble_forest(
    mut positions: Vec<Position>,
    mut employees_by_position: HashMap<PositionId, Vec<EmployeeRef>>,
) -> AppResult<Vec<PositionNode>> {
    // Sorting up front makes sibling and root order deterministic.
    positions.sort_by(|left, right| left.code().as_str().cmp(right.code().as_str()));

    let loaded: HashSet<PositionId> = positions.iter().map(Position::id).collect();
    let total = positions.len();

    let mut attach_parent: HashMap<PositionId, Option<PositionId>> = HashMap::with_capacity(total);
    let mut children: HashMap<PositionId, Vec<PositionId>> = HashMap::new();
    let mut roots: Vec<PositionId> = Vec::new();

    for position in &positions {
        let parent = position
            .reports_to()
            .filter(|parent| *parent != position.id() && loaded.contains(parent));
        attach_parent.insert(position.id(), parent);

        match parent {
            Some(parent) => children.entry(parent).or_default().push(position.id()),
            None => roots.push(position.id()),
        }
    }

    let mut visited: HashSet<PositionId> = HashSet::with_capacity(total);
    let mut levels: HashMap<PositionId, u32> = HashMap::with_capacity(total);
    let mut order: Vec<PositionId> = Vec::with_capacity(total);
    let mut stack: Vec<(PositionId, u32)> = roots.iter().rev().map(|id| (*id, 0)).collect();

    while let Some((id, level)) = stack.pop() {
        if !visited.insert(id) {
            return Err(AppError::Internal(format!(
                "position '{id}' was reached twice during level assignment"
            )));
        }

        levels.insert(id, level);
        order.push(id);

        if let Some(kids) = children.get(&id) {
            for kid in kids.iter().rev() {
                stack.push((*kid, level + 1));
            }
        }
    }

    // Nodes trapped in a reports-to cycle are unreachable from every root.
    if visited.len() != total {
        return Err(AppError::Internal(
            "reporting pointers form a cycle; some positions are unreachable from any root"
                .to_owned(),
        ));
    }

    let mut arena: HashMap<PositionId, Position> = positions
        .into_iter()
        .map(|position| (position.id(), position))
        .collect();
    let mut built_children: HashMap<PositionId, Vec<PositionNode>> = HashMap::new();
    let mut built_roots: Vec<PositionNode> = Vec::new();

    // Deepest-first over the reversed preorder, so every child node exists
    // before its parent consumes it.
    for id in order.iter().rev() {
        let position = arena.remove(id).ok_or_else(|| {
            AppError::Internal(format!("position '{id}' vanished during forest assembly"))
        })?;
        let level = levels.get(id).copied().ok_or_else(|| {
            AppError::Internal(format!("position '{id}' has no assigned level"))
        })?;

        let mut node_children = built_children.remove(id).unwrap_or_default();
        // Reversed traversal collects siblings back to front.
        node_children.reverse();

        let node = PositionNode {
            employees: employees_by_position.remove(id).unwrap_or_default(),
            children: node_children,
            level,
            position,
        };

        match attach_parent.get(id).copied().flatten() {
            Some(parent) => built_children.entry(parent).or_default().push(node),
            None => built_roots.push(node),
        }
    }

    built_roots.reverse();
    Ok(built_roots)
}
