// Lexicon — a prefix tree keyed by Unicode code points.
//
// Every edge is a `char`, so multi-byte characters are never split and the
// scanner can address windows of a text by code point offset. Children are
// kept in a BTreeMap, which makes traversal order (and therefore anything
// written out from a walk) stable across runs.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Node<V> {
    children: BTreeMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

/// A trie mapping exact words to a value.
///
/// Branches left empty by `remove` are pruned, so every non-root node either
/// holds a value or leads to one. `has_prefix` relies on that.
#[derive(Debug, Clone)]
pub struct Lexicon<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for Lexicon<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Lexicon<V> {
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Number of words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a word, overwriting any existing value. Returns the previous
    /// value. Empty words are ignored.
    pub fn insert(&mut self, word: &str, value: V) -> Option<V> {
        if word.is_empty() {
            return None;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Remove a word and return its value, pruning branches that no longer
    /// lead anywhere.
    pub fn remove(&mut self, word: &str) -> Option<V> {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return None;
        }

        // Deepest node on the path that has to survive the removal. Its child
        // `chars[prune_at]` heads the chain that can be dropped.
        let mut prune_at = 0;
        let mut node = &self.root;
        for (depth, ch) in chars.iter().enumerate() {
            if node.value.is_some() || node.children.len() > 1 {
                prune_at = depth;
            }
            node = node.children.get(ch)?;
        }
        node.value.as_ref()?;
        let is_leaf = node.children.is_empty();

        let value = self.node_mut(&chars)?.value.take()?;
        self.len -= 1;

        if is_leaf {
            if let Some(parent) = self.node_mut(&chars[..prune_at]) {
                parent.children.remove(&chars[prune_at]);
            }
        }

        Some(value)
    }

    /// Exact lookup.
    pub fn get(&self, word: &str) -> Option<&V> {
        self.node(word.chars())?.value.as_ref()
    }

    /// Exact lookup of a code point slice.
    pub fn get_chars(&self, word: &[char]) -> Option<&V> {
        self.node(word.iter().copied())?.value.as_ref()
    }

    pub fn get_mut(&mut self, word: &str) -> Option<&mut V> {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.get_mut(&ch)?;
        }
        node.value.as_mut()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// True if at least one stored word starts with `prefix` (the word
    /// itself counts).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.has_prefix_with(prefix.chars())
    }

    /// `has_prefix` over a code point slice.
    pub fn has_prefix_chars(&self, prefix: &[char]) -> bool {
        self.has_prefix_with(prefix.iter().copied())
    }

    fn has_prefix_with(&self, prefix: impl Iterator<Item = char>) -> bool {
        match self.node(prefix) {
            Some(node) if std::ptr::eq(node, &self.root) => !self.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    /// Every stored word that has `prefix` as a prefix, including `prefix`
    /// itself when it is stored. Returned in traversal order.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.prefixed(prefix).map(|(word, _)| word).collect()
    }

    /// Pre-order iterator over the entries below `prefix`.
    pub fn prefixed(&self, prefix: &str) -> Iter<'_, V> {
        let stack = match self.node(prefix.chars()) {
            Some(node) => vec![(prefix.to_string(), node)],
            None => Vec::new(),
        };
        Iter { stack }
    }

    /// Pre-order iterator over all entries.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![(String::new(), &self.root)],
        }
    }

    fn node(&self, key: impl Iterator<Item = char>) -> Option<&Node<V>> {
        let mut node = &self.root;
        for ch in key {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, key: &[char]) -> Option<&mut Node<V>> {
        let mut node = &mut self.root;
        for ch in key {
            node = node.children.get_mut(ch)?;
        }
        Some(node)
    }
}

/// Depth-first, pre-order walk driven by an explicit stack, so deep tries
/// never grow the call stack.
pub struct Iter<'a, V> {
    stack: Vec<(String, &'a Node<V>)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, node)) = self.stack.pop() {
            for (ch, child) in node.children.iter().rev() {
                let mut child_key = String::with_capacity(key.len() + ch.len_utf8());
                child_key.push_str(&key);
                child_key.push(*ch);
                self.stack.push((child_key, child));
            }
            if let Some(value) = &node.value {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a Lexicon<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lexicon<u32> {
        let mut lex = Lexicon::new();
        for (i, w) in ["中国", "中国人", "中文", "人民", "ab", "abc"].iter().enumerate() {
            lex.insert(w, i as u32);
        }
        lex
    }

    #[test]
    fn test_insert_overwrites() {
        let mut lex = Lexicon::new();
        assert_eq!(lex.insert("词", 1), None);
        assert_eq!(lex.insert("词", 2), Some(1));
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.get("词"), Some(&2));
    }

    #[test]
    fn test_prefix_queries() {
        let lex = sample();
        assert!(lex.has_prefix("中"));
        assert!(lex.has_prefix("中国人"));
        assert!(!lex.has_prefix("国"));
        assert!(lex.get("中").is_none());
        assert_eq!(lex.keys_with_prefix("中国"), vec!["中国", "中国人"]);
        assert!(lex.keys_with_prefix("日").is_empty());
    }

    #[test]
    fn test_remove_prunes_branch() {
        let mut lex = sample();
        assert_eq!(lex.remove("中文"), Some(2));
        assert!(!lex.has_prefix("中文"));
        assert!(lex.has_prefix("中国"));

        assert_eq!(lex.remove("中国人"), Some(1));
        assert!(!lex.has_prefix("中国人"));
        assert_eq!(lex.get("中国"), Some(&0));

        assert_eq!(lex.remove("中国"), Some(0));
        assert!(!lex.has_prefix("中"));
        assert_eq!(lex.len(), 3);
    }

    #[test]
    fn test_remove_inner_word_keeps_children() {
        let mut lex = sample();
        assert_eq!(lex.remove("ab"), Some(4));
        assert!(lex.get("ab").is_none());
        assert!(lex.has_prefix("ab"));
        assert_eq!(lex.get("abc"), Some(&5));
        assert_eq!(lex.remove("ab"), None);
    }

    #[test]
    fn test_iter_is_preorder_and_sorted() {
        let lex = sample();
        let words: Vec<String> = lex.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["ab", "abc", "中国", "中国人", "中文", "人民"]);
    }

    #[test]
    fn test_empty_lexicon_has_no_prefix() {
        let lex: Lexicon<()> = Lexicon::new();
        assert!(!lex.has_prefix(""));
        assert!(lex.is_empty());
    }
}
