//! The storefront pattern set mounted behind a hyper http1 server.
//!
//! Run with `cargo run --example storefront`, then e.g.
//! `curl 'http://127.0.0.1:8080/product/dyson350?section=2&q1=yes'`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use trellis::{get, root, PatternError, Router};

fn storefront() -> Result<Router<String>, PatternError> {
    Ok(Router::new([
        get(root().seg("home")?.seg("about")?.end(), || {
            "about page".to_string()
        }),
        get(root().seg("home")?.int().slash(), |id: isize| {
            format!("Product Page. Product Id : {id}")
        }),
        get(root().seg("home")?.float().slash(), |number: f64| {
            format!("Float page. number : {number}")
        }),
        get(root().seg("home")?.wildcard().slash(), |name: String| {
            format!("Wildcard page. {name}")
        }),
        get(root().seg("home")?.seg("products")?.splat(), |_rest: String| {
            "full splat page".to_string()
        }),
        get(
            root().seg("contact")?.wildcard().int().end(),
            |name: String, number: isize| format!("Contact page. Hi, {name}. Number {number}"),
        ),
        get(
            root().seg("contact")?.wildcard().boolean().end(),
            |name: String, call: bool| format!("Contact Page2. Name {name}. Call me later: {call}"),
        ),
        get(
            root()
                .seg("product")?
                .string()
                .end()
                .query_int("section")?
                .query_bool("q")?,
            |name: String, section: isize, questions: bool| {
                format!("Product detail - {name}. Section: {section}. Display questions? {questions}")
            },
        ),
        get(
            root()
                .seg("product")?
                .string()
                .end()
                .query_int("section")?
                .query("q1", "yes")?,
            |name: String, section: isize| format!("Product detail 2 - {name}. Section: {section}."),
        ),
    ]))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let router = Arc::new(storefront()?);
    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "storefront listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = router.clone();
        tokio::spawn(async move {
            let service = service_fn(move |request: Request<hyper::body::Incoming>| {
                let router = router.clone();
                async move {
                    let response = match router.match_request(&request) {
                        Some(body) => Response::new(Full::new(Bytes::from(body))),
                        None => Response::builder()
                            .status(StatusCode::NOT_FOUND)
                            .body(Full::new(Bytes::from_static(b"no route\n")))
                            .expect("static 404 response"),
                    };
                    Ok::<_, std::convert::Infallible>(response)
                }
            });
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::warn!(%peer, "connection error: {err}");
            }
        });
    }
}
