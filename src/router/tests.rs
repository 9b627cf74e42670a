use super::route::Route;

#[test]
fn test_root_path() {
    let (re, params) = Route::compile("/");
    assert!(re.is_match("/"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = Route::compile("/items/{id}");
    assert!(re.is_match("/items/123"));
    assert_eq!(params, vec!["id"]);
}

#[test]
fn test_nested_path() {
    let (re, params) = Route::compile("/a/{b}/c");
    assert!(re.is_match("/a/1/c"));
    assert!(!re.is_match("/a/1/d"));
    assert_eq!(params, vec!["b"]);
}

#[test]
fn test_anchored_both_ends() {
    let (re, _) = Route::compile("/users/{id}");
    assert!(!re.is_match("/users/1/posts"));
    assert!(!re.is_match("/api/users/1"));
    assert!(!re.is_match("/users"));
}

#[test]
fn test_placeholder_never_crosses_segment() {
    let (re, _) = Route::compile("/users/{id}");
    assert!(!re.is_match("/users/1/2"));
}

#[test]
fn test_literal_metacharacters_escaped() {
    let (re, params) = Route::compile("/files/v1.0/{name}");
    assert!(re.is_match("/files/v1.0/report"));
    assert!(!re.is_match("/files/v1x0/report"));
    assert!(params == vec!["name"]);
}

#[test]
fn test_invalid_token_is_literal() {
    let (re, params) = Route::compile("/tags/{a-b}");
    assert!(params.is_empty());
    assert!(re.is_match("/tags/{a-b}"));
    assert!(!re.is_match("/tags/x"));
}

#[test]
fn test_unclosed_brace_is_literal() {
    let (re, params) = Route::compile("/x/{open");
    assert!(params.is_empty());
    assert!(re.is_match("/x/{open"));
}

#[test]
fn test_params_in_appearance_order() {
    let (_, params) = Route::compile("/orgs/{org}/repos/{repo}/issues/{n}");
    assert_eq!(params, vec!["org", "repo", "n"]);
}
