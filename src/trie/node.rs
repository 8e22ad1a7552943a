use rustc_hash::FxHashMap;

/// Index of a node inside a [`Trie`](super::Trie) arena
pub type NodeId = u32;

/// The arena slot of the trie root
pub const ROOT: NodeId = 0;

/// Letter stored on the trie root, which spells nothing
pub(crate) const ROOT_LETTER: char = '\0';

/// A single node of the trie.
///
/// Nodes never own each other: `parent`, `children` and `downstream_roots`
/// are all indices into the owning trie's arena.
#[derive(Debug, Clone)]
pub struct TrieNode {
    pub(crate) letter: char,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: FxHashMap<char, NodeId>,
    /// Literal text of the word before this node's token. Empty unless the
    /// node starts a token somewhere after the first character of a word.
    pub(crate) prefix: Box<str>,
    /// Token roots strictly below this node, in discovery order
    pub(crate) downstream_roots: Vec<NodeId>,
    pub(crate) terminal: bool,
}

impl TrieNode {
    pub(crate) fn root() -> Self {
        Self::new(ROOT_LETTER, None, "")
    }

    pub(crate) fn new(letter: char, parent: Option<NodeId>, prefix: &str) -> Self {
        Self {
            letter,
            parent,
            children: FxHashMap::default(),
            prefix: prefix.into(),
            downstream_roots: Vec::new(),
            terminal: false,
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, letter: char) -> Option<NodeId> {
        self.children.get(&letter).copied()
    }

    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().map(|(&ch, &id)| (ch, id))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn downstream_roots(&self) -> &[NodeId] {
        &self.downstream_roots
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// True when a query may jump straight to this node from any ancestor.
    ///
    /// Word-initial nodes are token starts too, but the only ancestor they
    /// have is the trie root, which already reaches them by a child edge.
    #[inline]
    pub fn is_skip_target(&self) -> bool {
        !self.prefix.is_empty()
    }
}

impl std::fmt::Display for TrieNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<char> = self.children.keys().copied().collect();
        keys.sort_unstable();
        write!(f, "{}-> {:?} -> {:?}", self.prefix, self.letter, keys)
    }
}
