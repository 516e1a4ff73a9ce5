use crate::error::{MarzError, Result};
use crate::memory::EpisodicLog;
use crate::sequence::Sequence;
use crate::suffix::node::{NodeId, SuffixNode};
use crate::types::Alphabet;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Bounded collection of suffix nodes keyed by suffix: the explored
/// frontier of an implicit suffix trie whose interior has been pruned
/// away by prior splits.
///
/// Heuristic ties are broken by the suffix ordering (shorter first, then
/// lexicographic), so every query is deterministic regardless of map
/// iteration order.
#[derive(Debug)]
pub struct SuffixFringe {
    nodes: HashMap<Sequence, SuffixNode>,
    max_size: usize,
    g_weight: f64,
    next_id: u64,
}

impl SuffixFringe {
    pub fn new(max_size: usize, g_weight: f64, root: SuffixNode) -> Result<Self> {
        if max_size < 1 {
            return Err(MarzError::Validation(
                "fringe capacity must be greater than 0".to_string(),
            ));
        }
        let mut fringe = Self {
            nodes: HashMap::new(),
            max_size,
            g_weight,
            next_id: 1,
        };
        fringe.add_node(root);
        Ok(fringe)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn contains_suffix(&self, suffix: &Sequence) -> bool {
        self.nodes.contains_key(suffix)
    }

    pub fn get(&self, suffix: &Sequence) -> Option<&SuffixNode> {
        self.nodes.get(suffix)
    }

    pub fn get_mut(&mut self, suffix: &Sequence) -> Option<&mut SuffixNode> {
        self.nodes.get_mut(suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuffixNode> {
        self.nodes.values()
    }

    /// Inserts a node, evicting the (weakly) worst-weighted nodes while
    /// over capacity. During a multi-child split the fringe may briefly
    /// hold the parent alongside its children; each insert converges back
    /// under the bound before returning.
    pub fn add_node(&mut self, mut node: SuffixNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        node.assign_id(id);
        self.nodes.insert(node.suffix().clone(), node);

        while self.nodes.len() > self.max_size {
            if let Some(worst) = self.find_worst_suffix() {
                log::debug!("fringe at capacity, evicting suffix '{}'", worst);
                self.nodes.remove(&worst);
            } else {
                break;
            }
        }
        id
    }

    /// Splits the node with the given suffix: its children join the fringe
    /// and the parent leaves it. False when the suffix is not tracked or
    /// the node declines to split; the fringe is unchanged in that case.
    pub fn split_suffix(
        &mut self,
        suffix: &Sequence,
        log: &EpisodicLog,
        alphabet: &Alphabet,
    ) -> bool {
        let children = match self.nodes.get(suffix) {
            Some(node) => node.split(log, alphabet),
            None => return false,
        };
        let Some(children) = children else {
            return false;
        };

        // Commit: children in, parent out.
        for child in children {
            self.add_node(child);
        }
        self.nodes.remove(suffix);
        true
    }

    /// The node with the lowest heuristic weight: the most promising
    /// suffix to enumerate candidates under next.
    pub fn find_best_node_to_try(&self) -> Option<&SuffixNode> {
        self.nodes.values().min_by(|a, b| self.compare(a, b))
    }

    /// Among tracked suffixes that `sequence` ends with, the node for the
    /// longest one. None when nothing matches.
    pub fn find_best_match(&self, sequence: &Sequence) -> Option<&SuffixNode> {
        self.nodes
            .values()
            .filter(|node| sequence.ends_with(node.suffix()))
            .max_by_key(|node| node.suffix().len())
    }

    fn find_worst_suffix(&self) -> Option<Sequence> {
        self.nodes
            .values()
            .max_by(|a, b| self.compare(a, b))
            .map(|node| node.suffix().clone())
    }

    fn compare(&self, a: &SuffixNode, b: &SuffixNode) -> Ordering {
        a.weight(self.g_weight)
            .partial_cmp(&b.weight(self.g_weight))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.suffix().cmp(b.suffix()))
    }
}
