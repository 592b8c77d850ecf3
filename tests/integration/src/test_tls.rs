//! HTTPS transport integration tests.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    use rcgen::{CertifiedKey, generate_simple_self_signed};
    use tempfile::TempDir;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;
    use xmlvault_http::{PersistingHandler, Transport, load_tls_acceptor};
    use xmlvault_store::InMemoryBlobStore;

    use crate::{SAMPLE_PAYLOAD, TEST_BUCKET, TestServer, spawn_server};

    fn write_cert_files(dir: &TempDir) -> (PathBuf, PathBuf) {
        let CertifiedKey { cert, key_pair } =
            generate_simple_self_signed(vec!["localhost".to_owned(), "127.0.0.1".to_owned()])
                .expect("generate cert");
        let cert_path = dir.path().join("cert.pem");
        let key_path = dir.path().join("key.pem");
        std::fs::write(&cert_path, cert.pem()).expect("write cert");
        std::fs::write(&key_path, key_pair.serialize_pem()).expect("write key");
        (cert_path, key_path)
    }

    async fn spawn_tls_server(dir: &TempDir) -> TestServer {
        let (cert, key) = write_cert_files(dir);
        let acceptor = load_tls_acceptor(&cert, &key).expect("load acceptor");
        spawn_server(
            PersistingHandler::new(Arc::new(InMemoryBlobStore::new()), TEST_BUCKET),
            Transport::Tls(acceptor),
            Duration::from_secs(5),
        )
        .await
    }

    fn https_client() -> reqwest::Client {
        reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(10))
            .build()
            .expect("build client")
    }

    #[tokio::test]
    async fn test_should_round_trip_over_https() {
        let dir = TempDir::new().expect("tempdir");
        let server = spawn_tls_server(&dir).await;
        let client = https_client();

        let resp = client
            .post(server.url("/upload"))
            .header("Content-Type", "text/xml")
            .body(SAMPLE_PAYLOAD)
            .send()
            .await
            .expect("send upload");
        assert_eq!(resp.status(), 200);
        let key = resp.text().await.expect("key");
        assert_eq!(key, "xmlobject/1");

        let body = client
            .get(server.url(&format!("/read?bucket_id={key}")))
            .send()
            .await
            .expect("send read")
            .text()
            .await
            .expect("body");
        assert_eq!(body, SAMPLE_PAYLOAD);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_survive_failed_handshake() {
        let dir = TempDir::new().expect("tempdir");
        let server = spawn_tls_server(&dir).await;

        // Plain HTTP against the TLS port fails the handshake.
        let mut raw = TcpStream::connect(server.addr).await.expect("connect");
        raw.write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .expect("write");
        drop(raw);

        let resp = https_client()
            .get(server.url("/foo"))
            .send()
            .await
            .expect("server still accepting");
        assert_eq!(resp.status(), 200);
        server.shutdown().await;
    }
}
