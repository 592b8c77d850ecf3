//! Not-found routing integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use xmlvault_store::InMemoryBlobStore;

    use crate::{http_client, spawn_persisting, spawn_validating};

    const NOT_FOUND_BODY: &str = "<p>Oops, you walked the wrong path</p>";

    #[tokio::test]
    async fn test_should_serve_not_found_page_for_any_method() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;
        let client = http_client();

        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            for path in ["/foo", "/", "/upload/", "/read/x"] {
                let resp = client
                    .request(method.clone(), server.url(path))
                    .send()
                    .await
                    .expect("send");
                assert_eq!(resp.status(), 200, "{method} {path}");
                assert_eq!(resp.text().await.expect("body"), NOT_FOUND_BODY);
            }
        }
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_not_serve_read_in_validating_variant() {
        let server = spawn_validating().await;

        let resp = http_client()
            .get(server.url("/read?bucket_id=xmlobject/1"))
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.expect("body"), NOT_FOUND_BODY);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_tag_responses_with_request_id() {
        let server = spawn_validating().await;
        let client = http_client();

        let first = client.get(server.url("/")).send().await.expect("send");
        let second = client.get(server.url("/")).send().await.expect("send");
        let id = |resp: &reqwest::Response| {
            resp.headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned)
        };

        assert!(id(&first).is_some());
        assert_ne!(id(&first), id(&second));
        server.shutdown().await;
    }
}
