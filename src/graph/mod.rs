pub mod property_tree;

pub use property_tree::{PropertyTree, TreeNode};

/// Position of a task or resource within its hierarchy. Derived when a
/// schedule is assembled, never read from input files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePosition {
    pub seqno: usize,
    pub wbs: String,
    pub level: usize,
    /// Direct children in definition order.
    pub children: Vec<String>,
    /// Tasks adopted by this node in definition order.
    pub adoptees: Vec<String>,
}
