use super::node::{NodeId, ROOT};
use super::{MIN_LENGTH, Trie};
use crate::utils::flip_case;
use rustc_hash::FxHashSet;

/// One line of the search: where we stand and what is left to consume.
///
/// `literal` is the rest of the query as typed. `flipped` is the same rest
/// with every character's case swapped, or empty for case-sensitive
/// searches. Both always have the same length when non-empty.
#[derive(Debug, Clone, Copy)]
struct Thread<'q> {
    node: NodeId,
    literal: &'q [char],
    flipped: &'q [char],
}

impl Thread<'_> {
    fn is_done(&self) -> bool {
        self.literal.is_empty()
    }

    /// Characters that may be consumed next: the typed one, plus its
    /// case-swapped twin when that differs.
    fn next_chars(&self) -> impl Iterator<Item = char> {
        let typed = self.literal.first().copied();
        let twin = self.flipped.first().copied().filter(|&f| Some(f) != typed);
        typed.into_iter().chain(twin)
    }

    fn advance(&self, node: NodeId) -> Self {
        Self {
            node,
            literal: &self.literal[1..],
            flipped: self.flipped.get(1..).unwrap_or(&[]),
        }
    }

    fn key(&self) -> (NodeId, usize) {
        (self.node, self.literal.len())
    }
}

impl Trie {
    /// Every inserted word reachable from `query`, deduplicated and sorted.
    ///
    /// Each query character is consumed either by an ordinary child edge or
    /// by jumping to a token root further down the word, so `"AC"` reaches
    /// `"Alphabet City"`. With `case_sensitive == false` every character may
    /// also match with its case swapped, independently of its neighbours.
    /// Queries shorter than [`MIN_LENGTH`] characters return nothing.
    pub fn matches(&self, query: &str, case_sensitive: bool) -> Vec<String> {
        let literal: Vec<char> = query.chars().collect();
        if literal.len() < MIN_LENGTH {
            return Vec::new();
        }

        let flipped: Vec<char> = if case_sensitive {
            Vec::new()
        } else {
            literal.iter().copied().map(flip_case).collect()
        };

        let ends = self.consume(Thread {
            node: ROOT,
            literal: &literal,
            flipped: &flipped,
        });

        let mut words: Vec<String> = self
            .completions(&ends)
            .into_iter()
            .map(|id| self.spell(id))
            .collect();
        words.sort_unstable();
        words
    }

    /// Run every thread until its query is used up, returning the nodes where
    /// the query ended.
    ///
    /// A `(node, remaining)` state is expanded once no matter how many skip
    /// paths lead to it, which bounds the work by nodes × query length.
    fn consume(&self, start: Thread<'_>) -> Vec<NodeId> {
        let mut stack = vec![start];
        let mut seen: FxHashSet<(NodeId, usize)> = FxHashSet::default();
        seen.insert(start.key());
        let mut ends = Vec::new();

        while let Some(thread) = stack.pop() {
            if thread.is_done() {
                ends.push(thread.node);
                continue;
            }

            let node = &self.nodes[thread.node as usize];
            for ch in thread.next_chars() {
                if let Some(child) = node.child(ch) {
                    let next = thread.advance(child);
                    if seen.insert(next.key()) {
                        stack.push(next);
                    }
                }

                for &root in node.downstream_roots() {
                    if self.nodes[root as usize].letter() != ch {
                        continue;
                    }
                    let next = thread.advance(root);
                    if seen.insert(next.key()) {
                        stack.push(next);
                    }
                }
            }
        }

        ends
    }

    /// Terminal nodes at or below any of `ends`, each reported once.
    ///
    /// Completion follows stored child edges only; the query's case no
    /// longer plays a part once it is consumed.
    fn completions(&self, ends: &[NodeId]) -> Vec<NodeId> {
        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut terminals = Vec::new();
        let mut stack: Vec<NodeId> = ends.to_vec();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let node = &self.nodes[id as usize];
            if node.is_terminal() {
                terminals.push(id);
            }
            stack.extend(node.children().map(|(_, child)| child));
        }

        terminals
    }
}
