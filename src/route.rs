use std::fmt;
use std::sync::Arc;

use crate::handler::{CaptureStack, FromCaptures, Handler};
use crate::method::Method;
use crate::pattern::{PathNode, Pattern, QueryClause};

/// The erased handler: consumes the gathered capture stack and yields the
/// route's result. Built once at registration so match time never touches
/// the handler's concrete argument types.
pub(crate) type Binder<R> = Arc<dyn Fn(CaptureStack) -> Option<R> + Send + Sync>;

/// A registered route: method, pattern shape, and the bound handler. The
/// typed `Pattern<Args>` is consumed at construction and not retained.
pub struct Route<R> {
    pub(crate) method: Method,
    pub(crate) path: Vec<PathNode>,
    pub(crate) query: Vec<QueryClause>,
    pub(crate) bind: Binder<R>,
}

impl<R> fmt::Debug for Route<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

fn bind_handler<Args, H, R>(handler: H) -> Binder<R>
where
    Args: FromCaptures,
    H: Handler<Args, Output = R>,
{
    Arc::new(move |captures| Args::from_captures(captures).map(|args| handler.call(args)))
}

/// Register `handler` for `pattern` under one method. The handler's
/// parameter list must equal the pattern's capture tuple.
pub fn route<Args, H, R>(method: Method, pattern: Pattern<Args>, handler: H) -> Route<R>
where
    Args: FromCaptures,
    H: Handler<Args, Output = R>,
{
    Route {
        method,
        path: pattern.path,
        query: pattern.query,
        bind: bind_handler(handler),
    }
}

/// `route` with the default method, GET.
pub fn get<Args, H, R>(pattern: Pattern<Args>, handler: H) -> Route<R>
where
    Args: FromCaptures,
    H: Handler<Args, Output = R>,
{
    route(Method::Get, pattern, handler)
}

/// Register one handler for the same pattern under several methods. The
/// binder is shared; only the method differs per route.
pub fn routes<Args, H, R>(
    methods: impl IntoIterator<Item = Method>,
    pattern: Pattern<Args>,
    handler: H,
) -> Vec<Route<R>>
where
    Args: FromCaptures,
    H: Handler<Args, Output = R>,
{
    let bind = bind_handler(handler);
    methods
        .into_iter()
        .map(|method| Route {
            method,
            path: pattern.path.clone(),
            query: pattern.query.clone(),
            bind: bind.clone(),
        })
        .collect()
}

/// Register a constant result for a capture-free pattern; the value is
/// returned directly on match.
pub fn route_value<R>(method: Method, pattern: Pattern<()>, value: R) -> Route<R>
where
    R: Clone + Send + Sync + 'static,
{
    Route {
        method,
        path: pattern.path,
        query: pattern.query,
        bind: Arc::new(move |captures| captures.is_empty().then(|| value.clone())),
    }
}
