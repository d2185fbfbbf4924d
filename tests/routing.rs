//! End-to-end routing behaviour through the public builder and table API.

use std::sync::{Arc, Mutex};

use trie_router::routing::{Router, MIDDLEWARE};

mod common;
use common::names;

#[test]
fn test_compile_is_deterministic() {
    let build = || {
        let mut router = Router::new();
        router.use_middleware(vec!["log"]);
        router.get("/user/:id", vec!["user"]);
        router.get("/user/new", vec!["new_user"]);
        router.get("/static/*.css", vec!["css"]);
        router.post("/user", vec!["create"]);
        router.into_table()
    };
    let first = build();
    let second = build();

    assert_eq!(first.to_string(), second.to_string());
    for (method, path) in [("GET", "/user/7"), ("GET", "/user/new"), ("GET", "/static/a.css"), ("POST", "/user")] {
        let a = first.match_route(method, path).map(|m| names(&m));
        let b = second.match_route(method, path).map(|m| names(&m));
        assert_eq!(a, b, "{method} {path}");
        assert!(a.is_some());
    }
}

#[test]
fn test_static_segment_wins_over_param() {
    for order in [["/user/:id", "/user/new"], ["/user/new", "/user/:id"]] {
        let mut router = Router::new();
        for route in order {
            let name = if route.contains(':') { "by_id" } else { "new" };
            router.get(route, vec![name]);
        }
        let table = router.into_table();

        assert_eq!(names(&table.match_route("GET", "/user/new").unwrap()), vec!["new"]);
        let m = table.match_route("GET", "/user/42").unwrap();
        assert_eq!(names(&m), vec!["by_id"]);
        assert_eq!(m.params().get("id"), Some("42"));
    }
}

#[test]
fn test_parameter_extraction() {
    let mut router = Router::new();
    router.get("/item/:id/detail/:sub", vec!["detail"]);
    let table = router.into_table();

    let m = table.match_route("GET", "/item/42/detail/x").unwrap();
    assert_eq!(m.pattern(), "/item/:/detail/:");
    assert_eq!(m.params().len(), 2);
    assert_eq!(m.params()[0].key, "id");
    assert_eq!(m.params()[0].value, "42");
    assert_eq!(m.params().get("sub"), Some("x"));
    assert_eq!(m.params().get_or("missing", "none"), "none");
}

#[test]
fn test_empty_segment_binds_empty_value() {
    let mut router = Router::new();
    router.get("/user/:id/x", vec!["x"]);
    let table = router.into_table();

    let m = table.match_route("GET", "/user//x").unwrap();
    assert_eq!(m.params().get("id"), Some(""));
}

#[test]
fn test_wildcard_catch_all() {
    let mut router = Router::new();
    router.get("/files/*", vec!["files"]);
    let table = router.into_table();

    let m = table.match_route("GET", "/files/a/b/c").unwrap();
    assert_eq!(names(&m), vec!["files"]);
    assert_eq!(m.wildcards(), &["a/b/c".to_string()]);
    assert!(m.params().is_empty());
}

#[test]
fn test_multiple_wildcards() {
    let mut router = Router::new();
    router.get("/a/*/b/*", vec!["ab"]);
    let table = router.into_table();

    let m = table.match_route("GET", "/a/x/b/y/z").unwrap();
    assert_eq!(m.wildcards(), &["x".to_string(), "y/z".to_string()]);
    assert!(table.match_route("GET", "/a/x/c/y").is_none());
}

#[test]
fn test_middleware_priority_order() {
    let mut router = Router::new();
    router.priority_use(5, vec!["B"]);
    router.priority_use(1, vec!["A"]);
    router.get("/x", vec!["route"]);
    let table = router.into_table();

    assert_eq!(names(&table.match_route("GET", "/x").unwrap()), vec!["A", "B", "route"]);
}

#[test]
fn test_middleware_chain_follows_path_depth() {
    let mut router = Router::new();
    router.use_recovery("recovery");
    router.use_middleware(vec!["log"]);
    {
        let mut api = router.group("/api", vec!["auth"]);
        api.get("/users", vec!["users"]);
        let mut v2 = api.group("/v2", vec![]);
        v2.use_middleware(vec!["v2_only"]);
        v2.get("/users", vec!["users_v2"]);
    }
    router.get("/health", vec!["health"]);
    let table = router.into_table();

    assert_eq!(
        names(&table.match_route("GET", "/api/users").unwrap()),
        vec!["recovery", "log", "auth", "users"]
    );
    assert_eq!(
        names(&table.match_route("GET", "/api/v2/users").unwrap()),
        vec!["recovery", "log", "auth", "v2_only", "users_v2"]
    );
    assert_eq!(
        names(&table.match_route("GET", "/health").unwrap()),
        vec!["recovery", "log", "health"]
    );
}

#[test]
fn test_route_replaced_middleware_appended() {
    let mut router = Router::new();
    router.register(MIDDLEWARE, "/p", None, vec!["m1"]).unwrap();
    router.register(MIDDLEWARE, "/p", None, vec!["m2"]).unwrap();
    router.get("/p", vec!["h1"]);
    router.get("/p", vec!["h2"]);
    let table = router.into_table();

    assert_eq!(names(&table.match_route("GET", "/p").unwrap()), vec!["m1", "m2", "h2"]);
}

#[test]
fn test_no_match_and_allowed_methods() {
    let mut router = Router::new();
    router.get("/a", vec!["get_a"]);
    router.delete("/a", vec!["delete_a"]);
    let table = router.into_table();

    assert!(table.match_route("POST", "/a").is_none());
    assert!(table.match_route("GET", "/b").is_none());
    assert_eq!(table.allowed("/a"), vec!["GET", "DELETE"]);
    assert!(table.allowed("/b").is_empty());
}

#[test]
fn test_trailing_slash_is_a_distinct_route() {
    let mut router = Router::new();
    router.get("/user", vec!["no_slash"]);
    router.get("/user/", vec!["slash"]);
    let table = router.into_table();

    assert_eq!(names(&table.match_route("GET", "/user").unwrap()), vec!["no_slash"]);
    assert_eq!(names(&table.match_route("GET", "/user/").unwrap()), vec!["slash"]);
}

#[test]
fn test_route_without_handlers_never_matches() {
    let mut router = Router::new();
    router.get("/a", vec![]);
    router.get("/b", vec!["b"]);
    let table = router.into_table();

    assert!(table.match_route("GET", "/a").is_none());
    assert!(table.allowed("/a").is_empty());
    assert_eq!(names(&table.match_route("GET", "/b").unwrap()), vec!["b"]);
    assert!(table.to_string().contains("\"a\"\n"));
}

#[test]
fn test_builder_settings() {
    let mut router = Router::new().default_priority(1).unescape_path_values(false);
    router.priority_use(2, vec!["late"]);
    router.use_middleware(vec!["early"]);
    router.get("/q/:v", vec!["q"]);
    let table = router.into_table();
    assert!(!table.is_empty());

    let m = table.match_route("GET", "/q/a+b").unwrap();
    assert_eq!(m.params().get("v"), Some("a+b"));
    let chain: Vec<&str> = m.into_handlers().into_iter().copied().collect();
    assert_eq!(chain, vec!["early", "late", "q"]);
}

#[test]
fn test_empty_router_compiles_to_empty_table() {
    let table = Router::<&str>::new().into_table();
    assert!(table.is_empty());
    assert!(table.match_route("GET", "/").is_none());
}

#[test]
fn test_compile_twice_without_changes() {
    let mut router = Router::new();
    router.get("/a", vec!["a"]);
    assert!(router.compile().is_some());
    assert!(router.compile().is_none());
}

#[test]
fn test_percent_decoded_params() {
    let mut router = Router::new();
    router.get("/search/:q", vec!["search"]);
    let table = router.into_table();

    let m = table.match_route("GET", "/search/rust+lang%21").unwrap();
    assert_eq!(m.params().get("q"), Some("rust lang!"));

    let m = table.match_route("GET", "/search/100%").unwrap();
    assert_eq!(m.params().get("q"), Some("100%"));
}

type Handler = Arc<dyn Fn(&mut Vec<&'static str>) + Send + Sync>;

fn recorder(name: &'static str) -> Handler {
    Arc::new(move |trace: &mut Vec<&'static str>| trace.push(name))
}

#[test]
fn test_closure_handlers_shared_across_threads() {
    let mut router: Router<Handler> = Router::new();
    router.use_middleware(vec![recorder("log")]);
    router.get("/job/:id", vec![recorder("job")]);
    let table = router.into_table();

    let seen = Mutex::new(Vec::new());
    std::thread::scope(|s| {
        for id in 0..4 {
            let table = &table;
            let seen = &seen;
            s.spawn(move || {
                let path = format!("/job/{id}");
                let m = table.match_route("GET", &path).unwrap();
                let mut trace = Vec::new();
                for handler in m.handlers() {
                    handler(&mut trace);
                }
                seen.lock().unwrap().push((m.params().get_or("id", "").to_string(), trace));
            });
        }
    });

    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen.len(), 4);
    for (i, (id, trace)) in seen.iter().enumerate() {
        assert_eq!(id, &i.to_string());
        assert_eq!(trace, &vec!["log", "job"]);
    }
}
