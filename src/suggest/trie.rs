use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    is_word: bool,
}

/// Prefix tree over a fixed vocabulary
///
/// Built once and then only queried; there is no removal.
#[derive(Debug, Default, Clone)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a vocabulary that may contain holes; `None` entries and
    /// empty strings are skipped
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words.into_iter().flatten() {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a word; returns false when it was empty or already present
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }

        if node.is_word {
            return false;
        }
        node.is_word = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).map(|node| node.is_word).unwrap_or(false)
    }

    /// Every inserted word starting with `prefix`, in lexical order
    ///
    /// An empty prefix yields no suggestions.
    pub fn search(&self, prefix: &str) -> Vec<String> {
        let mut suggestions = Vec::new();
        if prefix.is_empty() {
            return suggestions;
        }

        if let Some(node) = self.find(prefix) {
            let mut buffer = prefix.to_string();
            collect(node, &mut buffer, &mut suggestions);
        }
        suggestions
    }

    /// Like `search`, stopping after `limit` words
    pub fn search_limited(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut results = self.search(prefix);
        results.truncate(limit);
        results
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}

fn collect(node: &TrieNode, buffer: &mut String, out: &mut Vec<String>) {
    if node.is_word {
        out.push(buffer.clone());
    }
    for (c, child) in &node.children {
        buffer.push(*c);
        collect(child, buffer, out);
        buffer.pop();
    }
}
