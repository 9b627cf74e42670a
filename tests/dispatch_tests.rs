use http::Method;
use microrouter::{
    CapturedResponse, DispatchOutcome, Handler, Request, Response, Router, RouterError,
};

#[test]
fn test_no_route_no_handler_is_plain_404() {
    let router = Router::new();
    let mut req = Request::builder(Method::GET, "/missing").build();
    let mut sink = CapturedResponse::new();

    let outcome = router.dispatch(&mut req, &mut sink);

    assert_eq!(outcome, DispatchOutcome::Completed);
    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 404);
    assert_eq!(emission.body_text(), "404 - Not Found");
}

#[test]
fn test_custom_not_found_handler() {
    let mut router = Router::new();
    router.set_not_found_handler(|req, mut res| {
        res.set_status(404)
            .set_body(format!("nothing at {}", req.path()));
        Ok(res)
    });

    let mut req = Request::builder(Method::GET, "/missing").build();
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 404);
    assert_eq!(emission.body_text(), "nothing at /missing");
}

#[test]
fn test_handler_error_becomes_500() {
    let mut router = Router::new();
    router.get(
        "/fail",
        Handler::direct(|_req, _res| Err(RouterError::Handler("database exploded".to_string()))),
    );

    let mut req = Request::builder(Method::GET, "/fail").build();
    let mut sink = CapturedResponse::new();
    let outcome = router.dispatch(&mut req, &mut sink);

    assert_eq!(outcome, DispatchOutcome::Completed);
    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 500);
    assert!(emission.body_text().contains("database exploded"));
}

#[test]
fn test_handler_panic_becomes_500() {
    let mut router = Router::new();
    router.get(
        "/panic",
        Handler::direct(|_req, _res| panic!("unexpected state")),
    );

    let mut req = Request::builder(Method::GET, "/panic").build();
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 500);
    assert!(emission.body_text().contains("unexpected state"));
}

#[test]
fn test_redirect_halts_dispatch() {
    let mut router = Router::new();
    router.get(
        "/old",
        Handler::direct(|_req, _res| Ok(Response::redirect("/login"))),
    );

    let mut req = Request::builder(Method::GET, "/old").build();
    let mut sink = CapturedResponse::new();
    let outcome = router.dispatch(&mut req, &mut sink);

    assert_eq!(outcome, DispatchOutcome::Halted);
    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 302);
    assert_eq!(emission.header("Location"), Some("/login"));
}

#[test]
fn test_redirect_with_custom_status() {
    let mut router = Router::new();
    router.get(
        "/moved",
        Handler::direct(|_req, _res| Ok(Response::redirect_with_status("/new-home", 301))),
    );

    let mut req = Request::builder(Method::GET, "/moved").build();
    let mut sink = CapturedResponse::new();
    let outcome = router.dispatch(&mut req, &mut sink);

    assert_eq!(outcome, DispatchOutcome::Halted);
    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 301);
    assert_eq!(emission.header("location"), Some("/new-home"));
}

#[test]
fn test_json_convenience() {
    let mut router = Router::new();
    router.get(
        "/pets/{id}",
        Handler::direct(|req, _res| {
            Response::json(&serde_json::json!({ "id": req.path_param("id") }))
        }),
    );

    let mut req = Request::builder(Method::GET, "/pets/7").build();
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    let emission = sink.single().expect("exactly one emission");
    assert_eq!(emission.status, 200);
    assert_eq!(emission.header("content-type"), Some("application/json"));
    assert_eq!(emission.body_text(), r#"{"id":"7"}"#);
}

#[test]
fn test_json_with_status() {
    let mut router = Router::new();
    router.post(
        "/pets",
        Handler::direct(|_req, _res| {
            Response::json_with_status(201, &serde_json::json!({ "created": true }))
        }),
    );

    let mut req = Request::builder(Method::POST, "/pets").build();
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    assert_eq!(sink.single().expect("one emission").status, 201);
}

#[test]
fn test_path_params_bound_before_handler_runs() {
    let mut router = Router::new();
    router.get(
        "/users/{id}",
        Handler::direct(|req, _res| {
            assert_eq!(req.path_param("id"), Some("42"));
            assert_eq!(req.path_params().len(), 1);
            Ok(Response::new())
        }),
    );

    let mut req = Request::builder(Method::GET, "/users/42").build();
    assert!(req.path_params().is_empty());
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    assert_eq!(sink.single().expect("one emission").status, 200);
    assert_eq!(req.path_param("id"), Some("42"));
}

#[test]
fn test_request_data_flows_to_handler() {
    let mut router = Router::new();
    router.post(
        "/login",
        Handler::direct(|req, _res| {
            let user = req.form("user").unwrap_or_default();
            let next = req.query("next").unwrap_or("/");
            let agent = req.header("User-Agent").unwrap_or("unknown");
            Ok(Response::text(200, format!("{user} -> {next} ({agent})")))
        }),
    );

    let mut req = Request::builder(Method::POST, "/login")
        .header("user-agent", "curl/8.0")
        .query("next", "/dashboard")
        .form("user", "ada")
        .body("user=ada")
        .build();
    let mut sink = CapturedResponse::new();
    router.dispatch(&mut req, &mut sink);

    assert_eq!(
        sink.single().expect("one emission").body_text(),
        "ada -> /dashboard (curl/8.0)"
    );
}

#[test]
fn test_every_outcome_emits_exactly_once() {
    let mut router = Router::new();
    router.get("/ok", Handler::direct(|_req, _res| Ok(Response::new())));
    router.get(
        "/err",
        Handler::direct(|_req, _res| Err(RouterError::Handler("boom".to_string()))),
    );
    router.get(
        "/redirect",
        Handler::direct(|_req, _res| Ok(Response::redirect("/ok"))),
    );

    for path in ["/ok", "/err", "/redirect", "/missing"] {
        let mut req = Request::builder(Method::GET, path).build();
        let mut sink = CapturedResponse::new();
        router.dispatch(&mut req, &mut sink);
        assert_eq!(sink.emissions().len(), 1, "path {path} emitted more than once");
    }
}
