mod matcher;
mod trie;

pub(crate) use matcher::{split_target, walk};
pub(crate) use trie::TrieNode;
