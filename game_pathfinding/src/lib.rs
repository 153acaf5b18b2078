use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A trait for graphs that can be searched.
///
/// `Node`: The type of node identifiers (e.g., ProvinceId).
/// `Ctx`: A context object passed to neighbor lookups (e.g., WorldState).
pub trait Graph<Node, Ctx> {
    /// Return the neighbors of a node.
    ///
    /// The returned order is the order in which the search explores them, so
    /// implementations should return a stable order for reproducible results.
    fn neighbors(&self, node: Node, context: &Ctx) -> Vec<Node>;
}

/// A breadth-first traversal over a [`Graph`].
///
/// Iterating yields `(node, depth)` pairs in non-decreasing depth, starting
/// with the start node at depth 0. Every node is yielded at most once.
pub struct BreadthFirst<'a, Node, Ctx, G> {
    graph: &'a G,
    context: &'a Ctx,
    open_set: VecDeque<(Node, u32)>,
    closed_set: HashSet<Node>,
}

impl<'a, Node, Ctx, G> BreadthFirst<'a, Node, Ctx, G>
where
    Node: Copy + Eq + Hash,
    G: Graph<Node, Ctx>,
{
    /// Start a traversal at `start`.
    pub fn new(graph: &'a G, start: Node, context: &'a Ctx) -> Self {
        let mut open_set = VecDeque::new();
        let mut closed_set = HashSet::new();
        open_set.push_back((start, 0));
        closed_set.insert(start);
        Self {
            graph,
            context,
            open_set,
            closed_set,
        }
    }

    /// Find the nearest node (by hop count) satisfying `predicate`.
    ///
    /// The start node itself is tested first. Returns `None` once the
    /// connected component is exhausted.
    pub fn find_nearest<P>(graph: &G, start: Node, context: &Ctx, mut predicate: P) -> Option<Node>
    where
        P: FnMut(Node, &Ctx) -> bool,
    {
        BreadthFirst::new(graph, start, context)
            .map(|(node, _)| node)
            .find(|&node| predicate(node, context))
    }
}

impl<Node, Ctx, G> Iterator for BreadthFirst<'_, Node, Ctx, G>
where
    Node: Copy + Eq + Hash,
    G: Graph<Node, Ctx>,
{
    type Item = (Node, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (current, depth) = self.open_set.pop_front()?;

        for neighbor in self.graph.neighbors(current, self.context) {
            // Mark on enqueue so a node reachable along several edges is queued once
            if self.closed_set.insert(neighbor) {
                self.open_set.push_back((neighbor, depth + 1));
            }
        }

        Some((current, depth))
    }
}
