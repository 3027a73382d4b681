use std::time::Duration;

use dictionary::{Dictionary, DictionaryConfig, DictionaryError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers a single request with the given status line and body, handing back
/// the request line it saw.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0u8; 4096];
        let mut request = Vec::new();
        loop {
            let read = socket.read(&mut buffer).await.unwrap();
            request.extend_from_slice(&buffer[..read]);
            if read == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_owned()
    });
    (format!("http://{address}/api/v2/entries"), handle)
}

fn dictionary_at(base_url: String) -> Dictionary {
    Dictionary::with_config(DictionaryConfig {
        base_url,
        timeout: Duration::from_secs(5),
        ..DictionaryConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn found_word_is_converted() {
    let body = r#"[{"word":"hello","phonetics":[{"audio":"https://x/a.mp3"}],"meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"a greeting","example":"hello, how are you"}]}]}]"#;
    let (url, server) = serve_once("200 OK", body).await;

    let word = dictionary_at(url).get_definition("hello").await.unwrap();

    assert_eq!(word.word, "hello");
    assert_eq!(word.first_audio(), Some("https://x/a.mp3"));
    let definition = word.first_definition().unwrap();
    assert_eq!(definition.definition, "a greeting");
    assert_eq!(definition.example.as_deref(), Some("hello, how are you"));
    assert_eq!(server.await.unwrap(), "GET /api/v2/entries/en/hello HTTP/1.1");
}

#[tokio::test]
async fn found_word_without_definition_text_is_still_found() {
    let body = r#"[{"word":"hello","meanings":[{"definitions":[{"example":"hi there"}]}]}]"#;
    let (url, server) = serve_once("200 OK", body).await;

    let word = dictionary_at(url).get_definition("hello").await.unwrap();

    let definition = word.first_definition().unwrap();
    assert_eq!(definition.definition, "");
    assert_eq!(definition.example.as_deref(), Some("hi there"));
    server.await.unwrap();
}

#[tokio::test]
async fn missing_word_is_not_found() {
    let body = r#"{"title":"No Definitions Found","message":"Sorry pal, we couldn't find definitions for the word you were looking for.","resolution":"You can try the search again at later time or head to the web instead."}"#;
    let (url, server) = serve_once("404 Not Found", body).await;

    match dictionary_at(url).get_definition("zzzxx").await {
        Err(DictionaryError::NotFound(error)) => {
            assert_eq!(error.status, 404);
            assert!(error.message.starts_with("Sorry pal"));
        }
        other => panic!("expected not found, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn error_status_without_json_is_still_not_found() {
    let (url, server) = serve_once("500 Internal Server Error", "oops").await;

    let result = dictionary_at(url).get_definition("hello").await;
    assert!(matches!(result, Err(DictionaryError::NotFound(ref e)) if e.status == 500));
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_fails_to_decode() {
    let (url, server) = serve_once("200 OK", "{not json").await;

    let result = dictionary_at(url).get_definition("hello").await;
    assert!(matches!(result, Err(DictionaryError::Deserialize(_))));
    server.await.unwrap();
}

#[tokio::test]
async fn empty_entry_list_is_reported() {
    let (url, server) = serve_once("200 OK", "[]").await;

    let result = dictionary_at(url).get_definition("hello").await;
    assert!(matches!(result, Err(DictionaryError::Empty)));
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_a_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let result = dictionary_at(format!("http://{address}/api/v2/entries"))
        .get_definition("hello")
        .await;
    assert!(matches!(result, Err(DictionaryError::Fetch(_))));
}
