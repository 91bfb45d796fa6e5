//! Tests for route registration, matching and binding.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::parser::{HttpRequest, Method};
    use crate::router::{bind_slugs, Error, Router, RouteTable, SharedHandler, Slug, SlugKind};
    use crate::server::{HttpResponse, StatusCode};

    fn request(method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, path.to_string(), HashMap::new())
    }

    fn labelled(label: &'static str) -> SharedHandler {
        Arc::new(move |_req: &HttpRequest| HttpResponse::new(StatusCode::OK).with_body_string(label))
    }

    fn body_of(response: &HttpResponse) -> String {
        String::from_utf8_lossy(&response.body).into_owned()
    }

    #[test]
    fn test_slug_classification() {
        let wildcard = Slug::parse("[id]");
        assert_eq!(wildcard.kind, SlugKind::Wildcard);
        assert_eq!(wildcard.value, "[id]");
        assert_eq!(wildcard.name, "id");

        let literal = Slug::parse("users");
        assert_eq!(literal.kind, SlugKind::Literal);
        assert_eq!(literal.name, "users");

        let empty = Slug::parse("");
        assert_eq!(empty.kind, SlugKind::Literal);
        assert_eq!(empty.name, "");

        // Both delimiters are required
        assert_eq!(Slug::parse("[id").kind, SlugKind::Literal);
        assert_eq!(Slug::parse("id]").kind, SlugKind::Literal);
        assert_eq!(Slug::parse("[").kind, SlugKind::Literal);
    }

    #[test]
    fn test_slug_count_includes_empty_segments() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/foo/", labelled("a")).unwrap();
        table.register(Method::GET, "//", labelled("b")).unwrap();
        table.register(Method::GET, "/", labelled("c")).unwrap();

        let routes: Vec<_> = table.iter().map(|r| (r.pattern.clone(), r.slugs.len())).collect();
        assert_eq!(routes, vec![
            ("/".to_string(), 2),
            ("/foo/".to_string(), 3),
            ("//".to_string(), 3),
        ]);
    }

    #[test]
    fn test_empty_wildcard_is_rejected() {
        let mut table = RouteTable::new();
        let result = table.register(Method::GET, "/users/[]", labelled("a"));
        assert_eq!(result, Err(Error::EmptyWildcard("/users/[]".to_string())));
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut router = Router::new();
        router.register(Method::GET, "/users/[id]", |_req: &HttpRequest| HttpResponse::default()).unwrap();

        let result = router.register(Method::GET, "/users/[id]", |_req: &HttpRequest| HttpResponse::default());
        assert_eq!(result, Err(Error::DuplicateRoute {
            method: Method::GET,
            pattern: "/users/[id]".to_string(),
        }));

        // Same pattern under another verb is a different route
        router.register(Method::POST, "/users/[id]", |_req: &HttpRequest| HttpResponse::default()).unwrap();
        assert_eq!(router.routes().len(), 2);
    }

    #[test]
    fn test_wildcard_binds_named_param() {
        let mut router = Router::new();
        router.register(Method::GET, "/users/[id]", |req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string(req.get_param("id").cloned().unwrap_or_default())
        }).unwrap();

        let mut req = request(Method::GET, "/users/42");
        let response = router.dispatch(&mut req);

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(body_of(&response), "42");
        assert_eq!(req.named_params.get("id").unwrap(), "42");
    }

    #[test]
    fn test_literal_mismatch() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/admin", labelled("admin")).unwrap();

        assert!(table.find(Method::GET, "/users/42").is_none());
        assert!(table.find(Method::GET, "/users/admin").is_some());
    }

    #[test]
    fn test_segment_count_must_match() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/[id]", labelled("a")).unwrap();

        assert!(table.find(Method::GET, "/users").is_none());
        assert!(table.find(Method::GET, "/users/42/posts").is_none());
        assert!(table.find(Method::GET, "/users/42/").is_none());
    }

    #[test]
    fn test_first_registered_route_wins() {
        let mut router = Router::new();
        router.register(Method::GET, "/[slug]", |_req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string("wildcard")
        }).unwrap();
        router.register(Method::GET, "/pets", |_req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string("pets")
        }).unwrap();

        // The broader wildcard shadows the later literal
        let response = router.dispatch(&mut request(Method::GET, "/pets"));
        assert_eq!(body_of(&response), "wildcard");
    }

    #[test]
    fn test_literal_registered_first_takes_priority() {
        let mut router = Router::new();
        router.register(Method::GET, "/pets", |_req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string("pets")
        }).unwrap();
        router.register(Method::GET, "/[slug]", |_req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string("wildcard")
        }).unwrap();

        assert_eq!(body_of(&router.dispatch(&mut request(Method::GET, "/pets"))), "pets");
        assert_eq!(body_of(&router.dispatch(&mut request(Method::GET, "/cats"))), "wildcard");
    }

    #[test]
    fn test_verb_mismatch_continues_scan() {
        let mut table = RouteTable::new();
        table.register(Method::POST, "/items/[id]", labelled("post")).unwrap();
        table.register(Method::GET, "/items/[id]", labelled("get")).unwrap();

        let route = table.find(Method::GET, "/items/7").unwrap();
        assert_eq!(route.method, Method::GET);
        assert!(table.find(Method::DELETE, "/items/7").is_none());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/a/[x]", labelled("first")).unwrap();
        table.register(Method::GET, "/[y]/b", labelled("second")).unwrap();

        let req = request(Method::GET, "/a/b");
        let first = table.find_route(&req).unwrap();
        for _ in 0..10 {
            let again = table.find_route(&req).unwrap();
            assert!(std::ptr::eq(first, again));
        }
        assert_eq!(first.pattern, "/a/[x]");
    }

    #[test]
    fn test_unmatched_request_uses_not_found_handler() {
        let router = Router::new();
        let response = router.dispatch(&mut request(Method::GET, "/missing"));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.is_empty());

        let mut router = Router::new();
        router.set_not_found(|req: &HttpRequest| {
            HttpResponse::new(StatusCode::NOT_FOUND).with_body_string(format!("nothing at {}", req.path))
        });
        let response = router.dispatch(&mut request(Method::GET, "/missing"));
        assert_eq!(body_of(&response), "nothing at /missing");
    }

    #[test]
    fn test_bind_skips_literals_and_empty_names() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/[a]/x/[b]", labelled("a")).unwrap();
        let route = table.find(Method::GET, "/1/x/2").unwrap();

        let mut req = request(Method::GET, "/1/x/2");
        bind_slugs(&mut req, route).unwrap();
        assert_eq!(req.named_params.len(), 2);
        assert_eq!(req.get_param("a").unwrap(), "1");
        assert_eq!(req.get_param("b").unwrap(), "2");
        assert!(!req.named_params.contains_key("x"));
        assert!(!req.named_params.contains_key(""));
    }

    #[test]
    fn test_bind_rejects_segment_count_mismatch() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/[id]", labelled("a")).unwrap();
        let route = table.find(Method::GET, "/users/1").unwrap();

        let mut req = request(Method::GET, "/users/1/extra");
        assert_eq!(bind_slugs(&mut req, route), Err(Error::SlugMismatch { expected: 3, actual: 4 }));
        assert!(req.named_params.is_empty());
    }

    #[test]
    fn test_query_string_is_part_of_the_last_segment() {
        let mut router = Router::new();
        router.register(Method::GET, "/users/[id]", |req: &HttpRequest| {
            HttpResponse::new(StatusCode::OK).with_body_string(req.get_param("id").cloned().unwrap_or_default())
        }).unwrap();

        let mut req = request(Method::GET, "/users/42?verbose=1");
        let response = router.dispatch(&mut req);
        assert_eq!(body_of(&response), "42?verbose=1");
        assert_eq!(req.get_query_param("verbose").unwrap(), "1");
    }
}
