use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use plain_http::connection::ResponseWriter;
use plain_http::handler::Handler;
use plain_http::protocol::body::ReqBody;
use plain_http::protocol::{RequestHead, ServerError};
use plain_http::server::Server;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    type Error = Box<dyn Error + Send + Sync>;

    async fn handle_get<W>(&self, request: &RequestHead, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        response.write_html_success()?;
        response.write_body(format!("<h1>{}</h1>", request.target())).await?;
        Ok(())
    }

    async fn handle_post<W>(&self, _request: &RequestHead, body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        response.write_html_success()?;
        response.write_body(format!("postbody: <pre>{}</pre>", body.to_string_lossy())).await?;
        Ok(())
    }
}

async fn spawn_server() -> SocketAddr {
    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr();
    tokio::spawn(server.run(Arc::new(EchoHandler)));
    addr
}

async fn exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(request).await.unwrap();

    let mut buf = Vec::new();
    client.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn get_round_trip() {
    let addr = spawn_server().await;
    let response = exchange(addr, b"GET /hello HTTP/1.0\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.0 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<h1>/hello</h1>");
}

#[tokio::test]
async fn post_round_trip() {
    let addr = spawn_server().await;
    let response = exchange(addr, b"POST /form HTTP/1.0\r\nContent-Length: 7\r\n\r\nfoo=bar").await;

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(response.contains("Connection: close\r\n"));
    assert!(response.ends_with("postbody: <pre>foo=bar</pre>"));
}

#[tokio::test]
async fn malformed_request_line() {
    let addr = spawn_server().await;
    let response = exchange(addr, b"BADREQUEST\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
}

#[tokio::test]
async fn client_disconnect_during_body() {
    let addr = spawn_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(b"POST /form HTTP/1.0\r\nContent-Length: 10\r\n\r\nabc").await.unwrap();
    client.shutdown().await.unwrap();

    let mut buf = Vec::new();
    client.read_to_end(&mut buf).await.unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "HTTP/1.0 404 Not Found\r\nConnection: close\r\n\r\n");
}

#[tokio::test]
async fn connections_are_independent() {
    let addr = spawn_server().await;

    // a client that never finishes its request must not block others
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled.write_all(b"GET /slow HTTP/1.0\r\n").await.unwrap();

    let (a, b) = tokio::join!(exchange(addr, b"GET /a HTTP/1.0\r\n\r\n"), exchange(addr, b"GET /b HTTP/1.0\r\n\r\n"));
    assert!(a.ends_with("<h1>/a</h1>"));
    assert!(b.ends_with("<h1>/b</h1>"));

    stalled.write_all(b"\r\n").await.unwrap();
    let mut buf = Vec::new();
    stalled.read_to_end(&mut buf).await.unwrap();
    assert!(String::from_utf8(buf).unwrap().ends_with("<h1>/slow</h1>"));
}

#[tokio::test]
async fn bind_error_when_port_in_use() {
    let server = Server::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = server.local_addr();

    let result = Server::bind(addr).await;
    assert!(matches!(result, Err(ServerError::Bind { addr: failed, .. }) if failed == addr));
}
