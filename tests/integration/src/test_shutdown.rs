//! Graceful shutdown integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;
    use xmlvault_http::{PersistingHandler, Transport};
    use xmlvault_store::InMemoryBlobStore;

    use crate::{TEST_BUCKET, http_client, spawn_persisting, spawn_server, upload};

    #[tokio::test]
    async fn test_should_stop_accepting_after_shutdown() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;
        let addr = server.addr;

        let resp = upload(&http_client(), &server, "text/xml", "<a/>").await;
        assert_eq!(resp.status(), 200);

        server.shutdown().await;
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_should_abandon_stalled_connections_after_grace_period() {
        let server = spawn_server(
            PersistingHandler::new(InMemoryBlobStore::new(), TEST_BUCKET),
            Transport::Plain,
            Duration::from_millis(300),
        )
        .await;

        let mut stalled = TcpStream::connect(server.addr).await.expect("connect");
        stalled
            .write_all(b"POST /upload HTTP/1.1\r\nHost: localhost\r\nContent-Type: text/xml\r\nContent-Length: 64\r\n\r\n<partial")
            .await
            .expect("write");
        tokio::time::sleep(Duration::from_millis(50)).await;

        let result = tokio::time::timeout(Duration::from_secs(5), server.shutdown()).await;
        assert!(result.is_ok(), "shutdown should finish after the grace period");
    }
}
