//! Verify build/parse functions against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request, a simulated
//! response, and either the expected decoded result or the expected error.
//! Bodies are compared as parsed JSON so the vectors stay readable.

use serde_json::Value;
use wunderlist_core::endpoints;
use wunderlist_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Mapping, NumericArg};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

fn numeric_arg(value: &Value) -> NumericArg {
    match value {
        Value::Number(number) => NumericArg::from(number.clone()),
        Value::String(text) => NumericArg::from(text.as_str()),
        other => panic!("unsupported numeric input: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, expected["path"].as_str().unwrap(), "{name}: path");

    let expected_query: Vec<(String, String)> = expected["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.query, expected_query, "{name}: query");

    match &expected["body"] {
        Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
        body => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
    }
}

fn assert_error(name: &str, err: &ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "InvalidArgument" => {
            assert!(matches!(err, ApiError::InvalidArgument(_)), "{name}: expected InvalidArgument, got {err}")
        }
        "UnexpectedStatus" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            let want = expected["expected"].as_u64().unwrap() as u16;
            assert!(
                matches!(err, ApiError::UnexpectedStatus { status: s, expected: e } if *s == status && *e == want),
                "{name}: expected UnexpectedStatus {status}/{want}, got {err}"
            );
        }
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

/// Drive every case of a vector file through `build` and `parse`.
fn run_vectors<B, P>(raw: &str, build: B, parse: P)
where
    B: Fn(&Value) -> Result<HttpRequest, ApiError>,
    P: Fn(HttpResponse) -> Result<Value, ApiError>,
{
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let cases = vectors["cases"].as_array().unwrap();
    assert!(!cases.is_empty());

    for case in cases {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = match build(&case["input"]) {
            Ok(req) => req,
            Err(err) => {
                assert!(case.get("expected_request").is_none(), "{name}: unexpected build error {err}");
                assert_error(name, &err, &case["expected_error"]);
                continue;
            }
        };
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            body: sim["body"].as_str().unwrap().to_string(),
        };
        match parse(response) {
            Ok(result) => assert_eq!(result, case["expected_result"], "{name}: parsed result"),
            Err(err) => assert_error(name, &err, &case["expected_error"]),
        }
    }
}

fn to_value<T: serde::Serialize>(result: Result<T, ApiError>) -> Result<Value, ApiError> {
    result.map(|value| serde_json::to_value(value).unwrap())
}

#[test]
fn get_lists_test_vectors() {
    run_vectors(
        include_str!("../../test-vectors/get_lists.json"),
        |_| Ok(endpoints::build_get_lists()),
        |response| to_value(endpoints::parse_get_lists(response)),
    );
}

#[test]
fn get_list_test_vectors() {
    run_vectors(
        include_str!("../../test-vectors/get_list.json"),
        |input| endpoints::build_get_list(numeric_arg(&input["list_id"])),
        |response| to_value(endpoints::parse_get_list(response)),
    );
}

#[test]
fn get_list_tasks_test_vectors() {
    run_vectors(
        include_str!("../../test-vectors/get_list_tasks.json"),
        |input| endpoints::build_get_list_tasks(numeric_arg(&input["list_id"])),
        |response| to_value(endpoints::parse_get_list_tasks(response)),
    );
}

#[test]
fn create_task_test_vectors() {
    run_vectors(
        include_str!("../../test-vectors/create_task.json"),
        |input| {
            let parameters: Mapping = serde_json::from_value(input["parameters"].clone()).unwrap();
            endpoints::build_create_task(
                input["name"].as_str().unwrap(),
                numeric_arg(&input["list_id"]),
                parameters,
            )
        },
        |response| to_value(endpoints::parse_create_task(response)),
    );
}

#[test]
fn complete_task_test_vectors() {
    run_vectors(
        include_str!("../../test-vectors/complete_task.json"),
        |input| endpoints::build_complete_task(numeric_arg(&input["task_id"]), numeric_arg(&input["revision"])),
        |response| to_value(endpoints::parse_complete_task(response)),
    );
}
