use super::TreePosition;
use crate::model::{ModelError, ModelResult};
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Child,
    Adoption,
}

/// One entry handed to [`PropertyTree::build`].
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'n> {
    pub id: &'n str,
    pub parent: Option<&'n str>,
    pub adopters: &'n [String],
}

/// Parent/child hierarchy of tasks or resources. Node weights are the
/// definition sequence numbers, edges point from parent to child.
pub struct PropertyTree {
    graph: DiGraph<usize, Link>,
    ids: Vec<String>,
}

impl PropertyTree {
    pub fn build<'n, I>(kind: &'static str, nodes: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = TreeNode<'n>>,
    {
        let nodes: Vec<TreeNode<'n>> = nodes.into_iter().collect();
        let mut graph: DiGraph<usize, Link> = DiGraph::with_capacity(nodes.len(), nodes.len());
        let mut id_to_index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

        for (seqno, node) in nodes.iter().enumerate() {
            let ix = graph.add_node(seqno);
            if id_to_index.insert(node.id, ix).is_some() {
                return Err(ModelError::DuplicateId {
                    kind,
                    id: node.id.to_string(),
                });
            }
        }

        for node in &nodes {
            let child = id_to_index[node.id];
            let parents = node
                .parent
                .map(|p| (p, Link::Child))
                .into_iter()
                .chain(node.adopters.iter().map(|a| (a.as_str(), Link::Adoption)));
            for (parent, link) in parents {
                let parent_ix =
                    *id_to_index
                        .get(parent)
                        .ok_or_else(|| ModelError::UnknownParent {
                            kind,
                            id: node.id.to_string(),
                            parent: parent.to_string(),
                        })?;
                graph.add_edge(parent_ix, child, link);
            }
        }

        if is_cyclic_directed(&graph) {
            return Err(ModelError::HierarchyCycle { kind });
        }

        Ok(Self {
            graph,
            ids: nodes.iter().map(|n| n.id.to_string()).collect(),
        })
    }

    fn linked(&self, node: NodeIndex, link: Link) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .filter(|edge| *edge.weight() == link)
            .map(|edge| edge.target())
            .collect();
        targets.sort_by_key(|ix| self.graph[*ix]);
        targets
    }

    fn ids_of(&self, nodes: &[NodeIndex]) -> Vec<String> {
        nodes
            .iter()
            .map(|ix| self.ids[self.graph[*ix]].clone())
            .collect()
    }

    /// Tree positions indexed by definition sequence number.
    pub fn positions(&self) -> Vec<TreePosition> {
        let mut positions = vec![TreePosition::default(); self.graph.node_count()];

        let roots: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|ix| {
                !self
                    .graph
                    .edges_directed(*ix, Direction::Incoming)
                    .any(|edge| *edge.weight() == Link::Child)
            })
            .collect();

        let mut stack: Vec<(NodeIndex, String, usize)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, ix)| (*ix, (i + 1).to_string(), 0))
            .collect();

        while let Some((ix, wbs, level)) = stack.pop() {
            let children = self.linked(ix, Link::Child);
            for (i, child) in children.iter().enumerate().rev() {
                stack.push((*child, format!("{wbs}.{}", i + 1), level + 1));
            }
            let adoptees = self.linked(ix, Link::Adoption);
            let seqno = self.graph[ix];
            positions[seqno] = TreePosition {
                seqno,
                wbs,
                level,
                children: self.ids_of(&children),
                adoptees: self.ids_of(&adoptees),
            };
        }

        positions
    }
}
