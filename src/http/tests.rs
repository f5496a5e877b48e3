use super::*;

#[test]
fn extract_round_trips_a_200_frame() {
    let raw = b"\r\nRecv 86 bytes\r\nSEND OK\r\n\r\n+IPD,47:HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 200);
    assert_eq!(body, Some(&b"hello"[..]));
}

#[test]
fn extract_discards_everything_before_the_marker() {
    let raw = b"AT+CIPSEND noise OK\r\n+IPD,40:HTTP/1.1 200 OK\r\n\r\nbody bytes";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 200);
    assert_eq!(body, Some(&b"body bytes"[..]));
}

#[test]
fn extract_drops_the_body_on_non_200() {
    let raw = b"+IPD,60:HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 404);
    assert_eq!(body, None);
}

#[test]
fn extract_reads_the_code_from_the_status_line_only() {
    let raw = b"+IPD,64:HTTP/1.1 301 Moved Permanently\r\nContent-Length: 5\r\n\r\nmoved";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 301);
    assert_eq!(body, None);
}

#[test]
fn extract_strips_a_doubled_marker_through_the_colon() {
    let raw = b"+IPD,80:HTTP/1.1 200 OK\r\n\r\n+IPD,33:actual body";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 200);
    assert_eq!(body, Some(&b"actual body"[..]));
}

#[test]
fn extract_yields_an_empty_body_for_a_doubled_marker_without_a_colon() {
    let raw = b"+IPD,80:HTTP/1.1 200 OK\r\n\r\n+IPD,33";
    let (code, body) = extract(raw).unwrap();
    assert_eq!(code, 200);
    assert_eq!(body, Some(&b""[..]));
}

#[test]
fn extract_fails_without_a_marker() {
    assert_eq!(
        extract(b"HTTP/1.1 200 OK\r\n\r\nhello"),
        Err(Error::FrameError)
    );
}

#[test]
fn extract_fails_without_a_digit_token() {
    let raw = b"+IPD,20:HTTP/one.one OK\r\n\r\nbody";
    assert_eq!(extract(raw), Err(Error::FrameError));
}

#[test]
fn extract_fails_without_a_blank_line() {
    assert_eq!(extract(b"+IPD,20:HTTP/1.1 200 OK\r\n"), Err(Error::FrameError));
}

#[test]
fn response_failed_is_the_zero_sentinel() {
    let response = Response::failed();
    assert_eq!(response.status_code, 0);
    assert!(response.body.is_none());
}
