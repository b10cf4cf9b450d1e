use std::collections::HashMap;

use crate::decoder::ErasedDecoder;
use crate::method::Method;
use crate::pattern::{PathNode, QueryClause};
use crate::route::{Binder, Route};

/// A single completed match attached to a trie node, selectable by method
/// and query clause set.
pub(crate) struct Terminal<R> {
    pub(crate) method: Method,
    pub(crate) query: Vec<QueryClause>,
    pub(crate) bind: Binder<R>,
    /// Registration sequence number, the tie-break among equally specific
    /// terminals.
    pub(crate) seq: usize,
}

/// One node of the decision trie. Edge kinds are segregated by slot so the
/// match engine honors the preference order without sorting at match time;
/// decoder edges are kept preference-ordered at insert.
pub(crate) struct TrieNode<R> {
    pub(crate) exact: HashMap<String, TrieNode<R>>,
    pub(crate) decoders: Vec<(ErasedDecoder, TrieNode<R>)>,
    pub(crate) slash: Option<Box<TrieNode<R>>>,
    pub(crate) wildcard: Option<Box<TrieNode<R>>>,
    pub(crate) splat: Option<Box<TrieNode<R>>>,
    pub(crate) terminals: Vec<Terminal<R>>,
}

impl<R> Default for TrieNode<R> {
    fn default() -> Self {
        Self {
            exact: HashMap::new(),
            decoders: Vec::new(),
            slash: None,
            wildcard: None,
            splat: None,
            terminals: Vec::new(),
        }
    }
}

impl<R> TrieNode<R> {
    /// Insert a route, creating child nodes as needed. Routes sharing a
    /// path prefix (same literal, same decoder identity, same wildcard)
    /// share nodes up to the point of divergence.
    pub(crate) fn insert(&mut self, route: Route<R>, seq: usize) {
        let Route {
            method,
            path,
            query,
            bind,
        } = route;
        self.insert_at(
            &path,
            Terminal {
                method,
                query,
                bind,
                seq,
            },
        );
    }

    fn insert_at(&mut self, path: &[PathNode], terminal: Terminal<R>) {
        let Some(node) = path.first() else {
            // Patterns end in a terminator, which attaches the terminal
            // before the node list is exhausted.
            self.attach(terminal);
            return;
        };
        match node {
            PathNode::Exact(s) => self
                .exact
                .entry(s.clone())
                .or_default()
                .insert_at(&path[1..], terminal),
            PathNode::Capture(decoder) => self
                .decoder_child(decoder)
                .insert_at(&path[1..], terminal),
            PathNode::Wildcard => self
                .wildcard
                .get_or_insert_with(Default::default)
                .insert_at(&path[1..], terminal),
            // Splat absorbs the rest of the target: its child is a leaf.
            PathNode::Splat => self
                .splat
                .get_or_insert_with(Default::default)
                .attach(terminal),
            PathNode::Slash => self
                .slash
                .get_or_insert_with(Default::default)
                .attach(terminal),
            PathNode::End => self.attach(terminal),
        }
    }

    /// The child behind the edge for `decoder`, created on first use.
    /// Built-ins sit before user decoders in the fixed rank order; user
    /// decoders keep first-insertion order.
    fn decoder_child(&mut self, decoder: &ErasedDecoder) -> &mut TrieNode<R> {
        if let Some(pos) = self.decoders.iter().position(|(d, _)| d.tag == decoder.tag) {
            return &mut self.decoders[pos].1;
        }
        let pos = self
            .decoders
            .partition_point(|(d, _)| d.tag.rank() <= decoder.tag.rank());
        self.decoders
            .insert(pos, (decoder.clone(), TrieNode::default()));
        &mut self.decoders[pos].1
    }

    fn attach(&mut self, terminal: Terminal<R>) {
        if let Some(existing) = self
            .terminals
            .iter_mut()
            .find(|t| t.method == terminal.method && clause_sets_equal(&t.query, &terminal.query))
        {
            tracing::warn!(
                method = %terminal.method,
                clauses = terminal.query.len(),
                "replacing route with identical method and query clause set, last insertion wins"
            );
            *existing = terminal;
        } else {
            self.terminals.push(terminal);
        }
    }
}

/// Unordered clause-set equality. Names are unique within a pattern, so
/// membership per clause suffices.
fn clause_sets_equal(a: &[QueryClause], b: &[QueryClause]) -> bool {
    a.len() == b.len() && a.iter().all(|ca| b.iter().any(|cb| ca.same_shape(cb)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;
    use crate::pattern::root;
    use crate::route::get;

    fn build(routes: impl IntoIterator<Item = Route<&'static str>>) -> TrieNode<&'static str> {
        let mut trie = TrieNode::default();
        for (seq, route) in routes.into_iter().enumerate() {
            trie.insert(route, seq);
        }
        trie
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let trie = build([
            get(root().seg("home").unwrap().seg("about").unwrap().end(), || {
                "about"
            }),
            get(root().seg("home").unwrap().int().slash(), |_: isize| "int"),
        ]);

        assert_eq!(trie.exact.len(), 1);
        let home = &trie.exact["home"];
        assert_eq!(home.exact.len(), 1);
        assert_eq!(home.decoders.len(), 1);
    }

    #[test]
    fn decoder_edges_are_preference_ordered_regardless_of_insertion() {
        let trie = build([
            get(root().float().end(), |_: f64| "float"),
            get(root().string().end(), |_: String| "string"),
            get(root().int().end(), |_: isize| "int"),
        ]);

        let names: Vec<&str> = trie.decoders.iter().map(|(d, _)| d.name()).collect();
        assert_eq!(names, ["int", "float", "string"]);
    }

    #[test]
    fn user_decoders_follow_builtins_in_first_insertion_order() {
        let fruit = decoder::Decoder::new("fruit", |t: &str| Some(t.to_string()));
        let color = decoder::Decoder::new("color", |t: &str| Some(t.to_string()));
        let trie = build([
            get(root().capture(&color).end(), |_: String| "color"),
            get(root().capture(&fruit).end(), |_: String| "fruit"),
            get(root().int().end(), |_: isize| "int"),
        ]);

        let names: Vec<&str> = trie.decoders.iter().map(|(d, _)| d.name()).collect();
        assert_eq!(names, ["int", "color", "fruit"]);
    }

    #[test]
    fn same_decoder_identity_shares_one_edge() {
        let trie = build([
            get(root().int().seg("a").unwrap().end(), |_: isize| "a"),
            get(root().int().seg("b").unwrap().end(), |_: isize| "b"),
        ]);
        assert_eq!(trie.decoders.len(), 1);
        assert_eq!(trie.decoders[0].1.exact.len(), 2);
    }

    #[test]
    fn identical_method_and_query_set_replaces_terminal() {
        let trie = build([
            get(root().seg("x").unwrap().end(), || "first"),
            get(root().seg("x").unwrap().end(), || "second"),
        ]);
        let node = &trie.exact["x"];
        assert_eq!(node.terminals.len(), 1);
        assert_eq!((*node.terminals[0].bind)(Vec::new()), Some("second"));
    }

    #[test]
    fn different_query_sets_coexist_on_one_node() {
        let trie = build([
            get(
                root().seg("p").unwrap().end().query_int("section").unwrap(),
                |_: isize| "typed",
            ),
            get(
                root().seg("p").unwrap().end().query("q1", "yes").unwrap(),
                || "exact",
            ),
        ]);
        assert_eq!(trie.exact["p"].terminals.len(), 2);
    }

    #[test]
    fn splat_child_is_a_leaf() {
        let trie = build([get(root().seg("files").unwrap().splat(), |_: String| {
            "splat"
        })]);
        let splat = trie.exact["files"].splat.as_ref().unwrap();
        assert!(splat.exact.is_empty());
        assert!(splat.decoders.is_empty());
        assert!(splat.wildcard.is_none());
        assert_eq!(splat.terminals.len(), 1);
    }
}
