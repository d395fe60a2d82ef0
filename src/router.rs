//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; the router also owns the application state that every
//! handler receives.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;
use tracing::{Instrument, info, info_span};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
///
/// ```rust
/// use std::sync::Arc;
/// use newsdesk::{Request, Response, Router};
///
/// struct Greeting(&'static str);
///
/// async fn hello(_req: Request, state: Arc<Greeting>) -> Response {
///     Response::text(state.0)
/// }
///
/// let app = Router::with_state(Arc::new(Greeting("hello")))
///     .get("/", hello);
/// ```
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    fallback: Option<BoxedHandler<S>>,
    state: S,
}

impl Router<()> {
    /// A router whose handlers take `()` as their state.
    pub fn new() -> Self {
        Self::with_state(())
    }
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// A router that hands a clone of `state` to every handler it calls.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), fallback: None, state }
    }

    /// Register a `GET` handler. It also answers `HEAD` on the same path.
    ///
    /// Path parameters use `{name}` syntax and are read back, percent-decoded,
    /// with [`Request::param`]. Static segments take priority over parameters,
    /// so `/news/new` and `/news/{slug}` can coexist.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for the method. Route tables are fixed at startup, so this
    /// is a programming error.
    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Post, path, handler)
    }

    /// Handler for requests no route matches. Without one they get a bare 404.
    pub fn fallback(mut self, handler: impl Handler<S>) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    fn add(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode_str(v).decode_utf8_lossy().into_owned()))
            .collect();
        Some((handler, params))
    }

    fn matches(&self, method: Method, path: &str) -> bool {
        self.routes.get(&method).is_some_and(|tree| tree.at(path).is_ok())
    }

    /// Methods with a route matching `path`, for the `allow` header. `HEAD`
    /// is listed wherever `GET` is.
    fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|&m| {
                self.matches(m, path) || (m == Method::Head && self.matches(Method::Get, path))
            })
            .collect()
    }

    /// Routes one request and produces one response.
    ///
    /// Runs inside a `request` span carrying method and path; the final status
    /// and latency are logged when the handler returns.
    pub async fn dispatch(&self, req: Request) -> Response {
        let method = req.method();
        let span = info_span!("request", %method, path = %req.path());

        async move {
            let started = Instant::now();
            let response = self.route(req).await;
            info!(
                status = response.status_code(),
                latency_ms = started.elapsed().as_millis() as u64,
                "request completed"
            );
            response
        }
        .instrument(span)
        .await
    }

    async fn route(&self, req: Request) -> Response {
        if req.method() == Method::Head {
            return self.route_method(req, Method::Get).await.without_body();
        }
        let method = req.method();
        self.route_method(req, method).await
    }

    /// Routes `req` through the tree for `method`, which differs from the
    /// request's own method only when `HEAD` borrows the `GET` routes.
    async fn route_method(&self, req: Request, method: Method) -> Response {
        if let Some((handler, params)) = self.lookup(method, req.path()) {
            return handler.call(req.with_params(params), self.state.clone()).await;
        }

        let allowed = self.allowed(req.path());
        if !allowed.is_empty() {
            let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
            return Response::builder()
                .status(Status::MethodNotAllowed)
                .header("allow", &allow)
                .text(Status::MethodNotAllowed.reason());
        }

        match &self.fallback {
            Some(handler) => handler.call(req, self.state.clone()).await,
            None => Response::builder()
                .status(Status::NotFound)
                .text(Status::NotFound.reason()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_slug(req: Request, _state: ()) -> Response {
        Response::text(req.param("slug").unwrap_or("none").to_owned())
    }

    async fn fixed(_req: Request, _state: ()) -> Response {
        Response::text("new")
    }

    async fn counter(_req: Request, state: Arc<&'static str>) -> Response {
        Response::text(*state)
    }

    fn body(res: &Response) -> String {
        String::from_utf8_lossy(res.body()).into_owned()
    }

    #[tokio::test]
    async fn static_segment_beats_parameter() {
        let router = Router::new()
            .get("/news/new", fixed)
            .get("/news/{slug}", echo_slug);

        let res = router.dispatch(Request::new(Method::Get, "/news/new")).await;
        assert_eq!(body(&res), "new");

        let res = router.dispatch(Request::new(Method::Get, "/news/hello-world")).await;
        assert_eq!(body(&res), "hello-world");
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let router = Router::new().get("/news", fixed).post("/news", fixed);
        let res = router.dispatch(Request::new(Method::Delete, "/news")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("GET, HEAD, POST"));
    }

    #[tokio::test]
    async fn head_runs_get_handler_without_body() {
        let router = Router::new().get("/news", fixed);
        let res = router.dispatch(Request::new(Method::Head, "/news")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn head_on_post_only_path_is_405() {
        let router = Router::new().post("/news", fixed);
        let res = router.dispatch(Request::new(Method::Head, "/news")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("POST"));
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let router = Router::new().get("/news/{slug}", echo_slug);
        let res = router.dispatch(Request::new(Method::Get, "/news/caf%C3%A9%20news+x")).await;
        assert_eq!(body(&res), "café news+x");
    }

    #[tokio::test]
    async fn unmatched_path_without_fallback_is_404() {
        let router = Router::new().get("/news", fixed);
        let res = router.dispatch(Request::new(Method::Get, "/nowhere/at/all")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn fallback_handles_unmatched_paths() {
        let router = Router::new().get("/news", fixed).fallback(echo_slug);
        let res = router.dispatch(Request::new(Method::Get, "/a/b")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(body(&res), "none");
    }

    #[tokio::test]
    async fn state_reaches_handlers() {
        let router = Router::with_state(Arc::new("shared")).get("/", counter);
        let res = router.dispatch(Request::new(Method::Get, "/")).await;
        assert_eq!(body(&res), "shared");
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new().get("/news/{slug}", fixed).get("/news/{id}", fixed);
    }
}
