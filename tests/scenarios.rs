//! The storefront pattern set, matched end to end.

use trellis::{get, root, Method, PatternError, Router};

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

#[test]
fn storefront_scenarios() {
    let router = storefront().unwrap();
    let cases: &[(&str, Option<&str>)] = &[
        ("/home/100001.1/", Some("Float page. number : 100001.1")),
        ("/home/100001.1", None),
        ("/home/100001/", Some("Product Page. Product Id : 100001")),
        ("/home/about", Some("about page")),
        ("/home/about/", None),
        (
            "/contact/bikal/123456",
            Some("Contact page. Hi, bikal. Number 123456"),
        ),
        (
            "/contact/bikal/true",
            Some("Contact Page2. Name bikal. Call me later: true"),
        ),
        ("/home/products/asdf\nasdf", Some("full splat page")),
        ("/home/products/", Some("full splat page")),
        ("/home/products", None),
        ("/home/product1/", Some("Wildcard page. product1")),
        (
            "/product/dyson350?section=233&q=true",
            Some("Product detail - dyson350. Section: 233. Display questions? true"),
        ),
        (
            "/product/dyson350?section=2&q1=yes",
            Some("Product detail 2 - dyson350. Section: 2."),
        ),
        ("/product/dyson350?section=2&q1=no", None),
    ];

    for (target, expected) in cases {
        assert_eq!(
            router.match_route(&Method::Get, target).as_deref(),
            *expected,
            "target {target:?}"
        );
    }
}

#[test]
fn splat_capture_includes_the_raw_query() {
    let router = Router::new([get(root().seg("home").unwrap().seg("products").unwrap().splat(), |rest: String| rest)]);
    assert_eq!(
        router.match_route(&Method::Get, "/home/products/a/b?sort=asc"),
        Some("a/b?sort=asc".to_string())
    );
    assert_eq!(
        router.match_route(&Method::Get, "/home/products/a/b"),
        Some("a/b".to_string())
    );
}

#[test]
fn literal_match_commits_over_capture_alternatives() {
    // A dead end behind a matching literal is not rescued by a sibling
    // capture edge.
    let router = storefront().unwrap();
    assert_eq!(router.match_route(&Method::Get, "/home/about/"), None);
    // Without a literal in the way, the wildcard applies.
    assert_eq!(
        router.match_route(&Method::Get, "/home/anything-else/"),
        Some("Wildcard page. anything-else".to_string())
    );
}

#[test]
fn decoder_alternatives_backtrack() {
    // The int edge accepts "3" but its subtree expects "x"; the walk must
    // restore the cursor and captures, then succeed through the float edge.
    let router = Router::new([
        get(
            root().seg("m").unwrap().int().seg("x").unwrap().end(),
            |i: isize| format!("int {i}"),
        ),
        get(
            root().seg("m").unwrap().float().seg("y").unwrap().end(),
            |f: f64| format!("float {f}"),
        ),
    ]);
    assert_eq!(
        router.match_route(&Method::Get, "/m/3/x"),
        Some("int 3".to_string())
    );
    assert_eq!(
        router.match_route(&Method::Get, "/m/3/y"),
        Some("float 3".to_string())
    );
    assert_eq!(router.match_route(&Method::Get, "/m/3/z"), None);
}

#[test]
fn wrong_method_is_no_match() {
    let router = storefront().unwrap();
    assert_eq!(router.match_route(&Method::Post, "/home/about"), None);
}

#[test]
fn malformed_targets_never_match() {
    let router = storefront().unwrap();
    for target in ["home/about", "", "?section=2", "/product/dyson350?&"] {
        assert_eq!(router.match_route(&Method::Get, target), None, "{target:?}");
    }
}
