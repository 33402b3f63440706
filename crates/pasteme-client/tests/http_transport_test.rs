//! The reqwest transport against a loopback HTTP/1.1 server.
//!
//! The server answers exactly one connection with a canned response and hands
//! the raw request back to the test for inspection.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use pasteme_client::{interpret_reply, HttpTransport, Transport};
use reqwest::blocking::Client;

struct CapturedRequest {
    head: String,
    body: Vec<u8>,
}

fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let url = format!("http://{}/api/paste/new", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            head.push_str(&line);
        }

        let content_length = head
            .lines()
            .find_map(|l| {
                let (k, v) = l.split_once(':')?;
                k.eq_ignore_ascii_case("content-length")
                    .then(|| v.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        let mut body_buf = vec![0u8; content_length];
        reader.read_exact(&mut body_buf).unwrap();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            head,
            body: body_buf,
        }
    });

    (url, handle)
}

/// Loopback traffic must not be routed through any proxy from the environment.
fn transport() -> HttpTransport {
    let client = Client::builder()
        .user_agent("pasteme-test/1.0")
        .no_proxy()
        .build()
        .unwrap();
    HttpTransport::with_client(client)
}

#[test]
fn posts_json_and_reads_reply() {
    let (url, server) = serve_once("200 OK", r#"{"msg":"ok","paste":{"uuid":"abc"}}"#);
    let transport = transport();

    let reply = transport
        .post_json(&url, br#"{"hello":"world"}"#.to_vec())
        .expect("request should succeed");
    let captured = server.join().unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(interpret_reply(&reply).unwrap().paste.uuid, "abc");

    let head = captured.head.to_ascii_lowercase();
    assert!(head.starts_with("post /api/paste/new http/1.1"), "head: {head}");
    assert!(head.contains("content-type: application/json"));
    assert!(head.contains("user-agent: pasteme-test/1.0"));
    assert_eq!(captured.body, br#"{"hello":"world"}"#);
}

#[test]
fn non_200_status_is_returned_then_rejected() {
    let (url, server) = serve_once("503 Service Unavailable", r#"{"msg":"down"}"#);
    let transport = transport();

    let reply = transport.post_json(&url, b"{}".to_vec()).unwrap();
    server.join().unwrap();

    assert_eq!(reply.status, 503);
    let err = interpret_reply(&reply).unwrap_err();
    assert_eq!(err.exit_code(), 17);
}

#[test]
fn malformed_body_is_bad_response() {
    let (url, server) = serve_once("200 OK", "not json at all");
    let transport = transport();

    let reply = transport.post_json(&url, b"{}".to_vec()).unwrap();
    server.join().unwrap();

    let err = interpret_reply(&reply).unwrap_err();
    assert_eq!(err.kind(), "bad_response");
    assert_eq!(err.exit_code(), 16);
}

#[test]
fn default_transport_builds() {
    assert!(HttpTransport::new("pasteme/0.0.0").is_ok());
}

#[test]
fn invalid_user_agent_is_config_error() {
    let err = match HttpTransport::new("pasteme\nbroken") {
        Ok(_) => panic!("a newline is not a valid header value"),
        Err(err) => err,
    };
    assert_eq!(err.kind(), "config_error");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn connection_refused_is_transport_error() {
    let url = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/api/paste/new", listener.local_addr().unwrap())
    };
    let transport = transport();

    let err = transport.post_json(&url, b"{}".to_vec()).unwrap_err();

    assert_eq!(err.kind(), "transport_error");
    assert_eq!(err.exit_code(), 15);
}
