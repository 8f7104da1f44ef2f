use flatserve::http::response::{Response, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_status_line() {
    assert_eq!(StatusCode::Ok.status_line(), "200 OK");
    assert_eq!(StatusCode::NotImplemented.status_line(), "501 Not Implemented");
}

#[test]
fn test_response_ok_helper() {
    let response = Response::ok(b"test content".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"test content".to_vec());
}

#[test]
fn test_response_error_helpers() {
    assert_eq!(Response::bad_request().status, StatusCode::BadRequest);
    assert_eq!(Response::invalid_path().status, StatusCode::BadRequest);
    assert_eq!(Response::not_found().body, b"Page not found.".to_vec());
    assert_eq!(
        Response::internal_error().status,
        StatusCode::InternalServerError
    );
    assert_eq!(Response::not_implemented().status, StatusCode::NotImplemented);
}

#[test]
fn test_response_empty_body() {
    let response = Response::ok(Vec::new());
    assert!(response.body.is_empty());
}
