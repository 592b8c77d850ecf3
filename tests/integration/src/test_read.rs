//! Read endpoint integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use xmlvault_store::InMemoryBlobStore;

    use crate::{SAMPLE_PAYLOAD, http_client, spawn_persisting, upload};

    fn content_type(resp: &reqwest::Response) -> Option<&str> {
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_should_round_trip_uploaded_bytes() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;
        let client = http_client();

        let key = upload(&client, &server, "application/xml", SAMPLE_PAYLOAD)
            .await
            .text()
            .await
            .expect("key");

        let resp = client
            .get(server.url(&format!("/read?bucket_id={key}")))
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), 200);
        assert_eq!(content_type(&resp), Some("application/xml"));
        assert_eq!(resp.text().await.expect("body"), SAMPLE_PAYLOAD);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_round_trip_binary_bytes() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;
        let client = http_client();
        let payload: Vec<u8> = (0..=255).collect();

        let key = upload(&client, &server, "text/xml", payload.clone())
            .await
            .text()
            .await
            .expect("key");

        let body = client
            .get(server.url(&format!("/read?bucket_id={key}")))
            .send()
            .await
            .expect("send")
            .bytes()
            .await
            .expect("body");
        assert_eq!(body.as_ref(), payload.as_slice());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_require_bucket_id() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;
        let client = http_client();

        for path in ["/read", "/read?bucket_id=", "/read?other=1"] {
            let resp = client.get(server.url(path)).send().await.expect("send");
            assert_eq!(resp.status(), 400, "path {path}");
            assert_eq!(content_type(&resp), Some("application/xml"));
            assert_eq!(resp.text().await.expect("body"), "bucket_id is required");
        }
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_return_500_for_unknown_key() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;

        let resp = http_client()
            .get(server.url("/read?bucket_id=does-not-exist"))
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.text().await.expect("body"), "failed to get object");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_post_on_read() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;

        let resp = http_client()
            .post(server.url("/read?bucket_id=xmlobject/1"))
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), 405);
        server.shutdown().await;
    }
}
