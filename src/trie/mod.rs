//! Skip-link trie for token-boundary autocomplete.
//!
//! A plain prefix trie answers "AL" with "Alphabet City". The skip links let
//! it also answer "AC": every node remembers the token roots (characters that
//! follow a separator such as a space or hyphen) that lie below it, and a
//! query may jump to any of them instead of following a child edge.
//!
//! ```
//! use colcomplete::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("Alphabet City");
//! trie.insert("ACE");
//!
//! assert_eq!(trie.matches("AC", true), vec!["ACE", "Alphabet City"]);
//! assert!(trie.matches("Ac", true).is_empty());
//! assert_eq!(trie.matches("ac", false), vec!["ACE", "Alphabet City"]);
//! ```
//!
//! Nodes live in a single arena and reference each other by [`NodeId`], so
//! the parent and skip links never own anything.

mod node;
mod search;

pub use node::NodeId;
use node::{ROOT, TrieNode};

use crate::utils::is_token_boundary;

/// Queries shorter than this many characters never match anything
pub const MIN_LENGTH: usize = 2;

/// Trie over a fixed vocabulary, built once and then queried read-only
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

/// Size summary of a built trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    pub words: usize,
    pub nodes: usize,
    /// Nodes reachable through skip links
    pub skip_targets: usize,
    /// Total number of skip links across all nodes
    pub skip_links: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::root()],
            word_count: 0,
        }
    }

    /// Build a trie from every word yielded by `words`
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Add a word. Empty words are ignored and inserting a word twice
    /// leaves the trie unchanged.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = ROOT;
        // The trie root counts as a separator, so every word's first
        // character starts a token.
        let mut at_boundary = true;
        // Skip targets created by this insertion, top-down
        let mut new_roots: Vec<NodeId> = Vec::new();
        let mut created = false;

        for (offset, ch) in word.char_indices() {
            node = match self.nodes[node as usize].child(ch) {
                Some(child) => child,
                None => {
                    let prefix = if at_boundary { &word[..offset] } else { "" };
                    let child = self.push_node(ch, node, prefix);
                    if self.nodes[child as usize].is_skip_target() {
                        new_roots.push(child);
                    }
                    created = true;
                    child
                }
            };
            at_boundary = is_token_boundary(ch);
        }

        if !self.nodes[node as usize].terminal {
            self.nodes[node as usize].terminal = true;
            self.word_count += 1;
        }

        if created {
            self.propagate_roots(node, new_roots);
        }
    }

    /// Register freshly created skip targets with every ancestor above them.
    ///
    /// Walks from the terminal node up to the trie root. Roots that already
    /// existed before this insertion were registered when they were created,
    /// so only `new_roots` need to be spread, and no ancestor can hold one of
    /// them yet.
    fn propagate_roots(&mut self, terminal: NodeId, mut new_roots: Vec<NodeId>) {
        // Discovery order of the upward walk is bottom-up
        new_roots.reverse();

        let mut below: Vec<NodeId> = Vec::with_capacity(new_roots.len());
        let mut pending = new_roots.into_iter().peekable();
        let mut current = Some(terminal);

        while let Some(id) = current {
            let node = &mut self.nodes[id as usize];
            debug_assert!(below.iter().all(|r| !node.downstream_roots.contains(r)));
            node.downstream_roots.extend_from_slice(&below);

            if pending.peek() == Some(&id) {
                below.push(id);
                pending.next();
            }
            current = node.parent;
        }
    }

    fn push_node(&mut self, letter: char, parent: NodeId, prefix: &str) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(TrieNode::new(letter, Some(parent), prefix));
        self.nodes[parent as usize].children.insert(letter, id);
        id
    }

    /// True if `word` was inserted exactly
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for ch in word.chars() {
            match self.nodes[node as usize].child(ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node != ROOT && self.nodes[node as usize].is_terminal()
    }

    /// Number of distinct words inserted
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn stats(&self) -> TrieStats {
        TrieStats {
            words: self.word_count,
            nodes: self.nodes.len(),
            skip_targets: self.nodes.iter().filter(|n| n.is_skip_target()).count(),
            skip_links: self.nodes.iter().map(|n| n.downstream_roots().len()).sum(),
        }
    }

    /// Spell the path from the trie root to `id`.
    ///
    /// Skip targets carry the text in front of them, so the walk stops at the
    /// first one it meets.
    pub(crate) fn spell(&self, id: NodeId) -> String {
        let mut letters = Vec::new();
        let mut head = "";
        let mut current = id;

        while current != ROOT {
            let node = &self.nodes[current as usize];
            letters.push(node.letter());
            if node.is_skip_target() {
                head = node.prefix();
                break;
            }
            current = match node.parent() {
                Some(parent) => parent,
                None => break,
            };
        }

        let mut word = String::with_capacity(head.len() + letters.len());
        word.push_str(head);
        word.extend(letters.iter().rev());
        word
    }
}
