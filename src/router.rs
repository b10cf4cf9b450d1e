use crate::method::Method;
use crate::route::Route;
use crate::routing::{split_target, walk, TrieNode};

/// The route table: a decision trie folded from the registered routes.
///
/// Built once and immutable thereafter; matching takes `&self`, performs no
/// I/O and holds no locks, so a `Router` can be shared across any number of
/// concurrent tasks.
pub struct Router<R> {
    root: TrieNode<R>,
}

impl<R> Router<R> {
    pub fn new(routes: impl IntoIterator<Item = Route<R>>) -> Self {
        let mut root = TrieNode::default();
        let mut count = 0;
        for (seq, route) in routes.into_iter().enumerate() {
            root.insert(route, seq);
            count += 1;
        }
        tracing::debug!(routes = count, "compiled route trie");
        Self { root }
    }

    /// Match a request target, returning the selected handler's result.
    ///
    /// `None` is the single no-match value: decoder failures, unsatisfied
    /// query clauses, exhausted backtracking, and malformed targets all
    /// reduce to it.
    pub fn match_route(&self, method: &Method, target: &str) -> Option<R> {
        let (segments, query_raw) = split_target(target)?;
        let mut captures = Vec::new();
        walk(&self.root, &segments, method, query_raw, &mut captures)
    }

    /// Match an `http::Request`, normalizing its method and taking its
    /// path-and-query as the target.
    pub fn match_request<B>(&self, request: &http::Request<B>) -> Option<R> {
        let method = Method::from(request.method());
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        self.match_route(&method, target)
    }
}
