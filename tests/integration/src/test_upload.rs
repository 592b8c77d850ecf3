//! Upload endpoint integration tests.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use futures::future::join_all;
    use xmlvault_store::InMemoryBlobStore;

    use crate::{TEST_BUCKET, http_client, spawn_persisting, upload};

    #[tokio::test]
    async fn test_should_return_minted_key_for_xml_upload() {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = spawn_persisting(Arc::clone(&store)).await;
        let client = http_client();

        let resp = upload(&client, &server, "text/xml", "<a>1</a>").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.expect("body"), "xmlobject/1");

        let resp = upload(&client, &server, "application/xml", "<a>2</a>").await;
        assert_eq!(resp.text().await.expect("body"), "xmlobject/2");

        assert!(store.contains(TEST_BUCKET, "xmlobject/1"));
        assert!(store.contains(TEST_BUCKET, "xmlobject/2"));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_mint_distinct_keys_for_concurrent_uploads() {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = spawn_persisting(Arc::clone(&store)).await;
        let client = http_client();

        let requests = (0..32).map(|i| {
            let client = client.clone();
            let server = &server;
            async move {
                let resp = upload(&client, server, "text/xml", format!("<n>{i}</n>")).await;
                assert_eq!(resp.status(), 200);
                resp.text().await.expect("body")
            }
        });
        let keys: HashSet<String> = join_all(requests).await.into_iter().collect();

        assert_eq!(keys.len(), 32);
        for n in 1..=32 {
            assert!(keys.contains(&format!("xmlobject/{n}")), "missing xmlobject/{n}");
        }
        assert_eq!(store.len(), 32);
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_json_content_type() {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = spawn_persisting(Arc::clone(&store)).await;
        let client = http_client();

        let resp = upload(&client, &server, "application/json", "{}").await;
        assert_eq!(resp.status(), 400);
        assert!(resp.bytes().await.expect("body").is_empty());
        assert!(store.is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_content_type_with_parameters() {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = spawn_persisting(Arc::clone(&store)).await;

        let resp = upload(&http_client(), &server, "text/xml; charset=utf-8", "<a/>").await;
        assert_eq!(resp.status(), 400);
        assert!(store.is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_reject_get_on_upload() {
        let server = spawn_persisting(Arc::new(InMemoryBlobStore::new())).await;

        let resp = http_client()
            .get(server.url("/upload"))
            .header("Content-Type", "text/xml")
            .send()
            .await
            .expect("send");
        assert_eq!(resp.status(), 405);
        assert!(resp.bytes().await.expect("body").is_empty());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_should_store_non_xml_body_verbatim() {
        let store = Arc::new(InMemoryBlobStore::new());
        let server = spawn_persisting(Arc::clone(&store)).await;

        let resp = upload(&http_client(), &server, "text/xml", "not xml at all").await;
        assert_eq!(resp.status(), 200);
        assert_eq!(store.len(), 1);
        server.shutdown().await;
    }
}
