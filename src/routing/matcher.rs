use crate::handler::CaptureStack;
use crate::method::Method;
use crate::pattern::QueryClause;
use crate::routing::trie::{Terminal, TrieNode};

/// Split a request target into path segments and the raw query.
///
/// The target is cut at the first `?`. The path must begin with `/` or the
/// target is unmatched. The leading empty segment is discarded; a trailing
/// empty segment (from a trailing `/`) is preserved as the trailing-slash
/// marker. `/` itself is the empty path.
pub(crate) fn split_target(target: &str) -> Option<(Vec<&str>, &str)> {
    let (path_raw, query_raw) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };
    let rest = path_raw.strip_prefix('/')?;
    let segments = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };
    Some((segments, query_raw))
}

/// Parse the raw query into `(name, value)` pairs. `None` marks the query
/// malformed: an empty clause or an empty parameter name. A clause without
/// `=` binds its name to the empty value.
fn parse_query(query_raw: &str) -> Option<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();
    for clause in query_raw.split('&') {
        if clause.is_empty() {
            return None;
        }
        let (name, value) = clause.split_once('=').unwrap_or((clause, ""));
        if name.is_empty() {
            return None;
        }
        pairs.push((name, value));
    }
    Some(pairs)
}

/// Request parameters may repeat; the last occurrence wins.
fn lookup<'a>(pairs: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    pairs.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Evaluate a terminal's clauses against the raw query. `Some(captures)`
/// iff every clause is satisfied; extra request parameters are ignored.
/// Clause-free terminals never inspect the query, so a malformed query only
/// fails candidates that actually constrain it.
fn eval_query(clauses: &[QueryClause], query_raw: &str) -> Option<CaptureStack> {
    if clauses.is_empty() {
        return Some(Vec::new());
    }
    let pairs = parse_query(query_raw)?;
    let mut captures = Vec::new();
    for clause in clauses {
        match clause {
            QueryClause::Exact { name, value } => {
                if lookup(&pairs, name) != Some(value.as_str()) {
                    return None;
                }
            }
            QueryClause::Capture { name, decoder } => {
                captures.push(decoder.decode(lookup(&pairs, name)?)?);
            }
        }
    }
    Some(captures)
}

/// Select among a node's terminals: filter by method, require every query
/// clause satisfied, prefer more exact clauses, tie-break by registration
/// order. On selection the handler is applied to the path captures followed
/// by the query captures in clause declaration order.
fn resolve<R>(
    node: &TrieNode<R>,
    method: &Method,
    query_raw: &str,
    captures: &mut CaptureStack,
) -> Option<R> {
    let mut best: Option<(&Terminal<R>, CaptureStack, usize)> = None;
    for terminal in &node.terminals {
        if terminal.method != *method {
            continue;
        }
        let Some(query_captures) = eval_query(&terminal.query, query_raw) else {
            continue;
        };
        let exact_clauses = terminal.query.iter().filter(|c| c.is_exact()).count();
        let better = match &best {
            Some((current, _, current_exact)) => {
                exact_clauses > *current_exact
                    || (exact_clauses == *current_exact && terminal.seq < current.seq)
            }
            None => true,
        };
        if better {
            best = Some((terminal, query_captures, exact_clauses));
        }
    }
    let (terminal, query_captures, _) = best?;

    let mut stack = std::mem::take(captures);
    stack.extend(query_captures);
    let result = (*terminal.bind)(stack);
    if result.is_none() {
        tracing::error!(
            method = %terminal.method,
            "capture stack rejected by handler binder; route registration should make this unreachable"
        );
    }
    result
}

/// Walk the trie over the remaining segments.
///
/// Edges are tried in preference order: exact, decoders (rank order), slash
/// (only when exactly the trailing-slash marker remains), wildcard, splat.
/// A literal edge equal to the head segment commits the walk to its subtree;
/// capture edges backtrack, restoring the cursor and the capture stack when
/// a descent fails.
pub(crate) fn walk<R>(
    node: &TrieNode<R>,
    segments: &[&str],
    method: &Method,
    query_raw: &str,
    captures: &mut CaptureStack,
) -> Option<R> {
    let Some((&head, rest)) = segments.split_first() else {
        return resolve(node, method, query_raw, captures);
    };

    if let Some(child) = node.exact.get(head) {
        return walk(child, rest, method, query_raw, captures);
    }

    for (decoder, child) in &node.decoders {
        if let Some(value) = decoder.decode(head) {
            captures.push(value);
            if let Some(result) = walk(child, rest, method, query_raw, captures) {
                return Some(result);
            }
            captures.pop();
        }
    }

    if head.is_empty() && rest.is_empty() {
        if let Some(slash) = &node.slash {
            if let Some(result) = resolve(slash, method, query_raw, captures) {
                return Some(result);
            }
        }
    }

    if !head.is_empty() {
        if let Some(child) = &node.wildcard {
            captures.push(Box::new(head.to_string()));
            if let Some(result) = walk(child, rest, method, query_raw, captures) {
                return Some(result);
            }
            captures.pop();
        }
    }

    if let Some(child) = &node.splat {
        let mut remainder = segments.join("/");
        if !query_raw.is_empty() {
            remainder.push('?');
            remainder.push_str(query_raw);
        }
        captures.push(Box::new(remainder));
        if let Some(result) = resolve(child, method, query_raw, captures) {
            return Some(result);
        }
        captures.pop();
    }

    None
}
