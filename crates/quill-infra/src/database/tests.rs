use std::time::Duration;

use async_trait::async_trait;

use quill_core::domain::{Filter, Page, Post, TenantId, fields};
use quill_core::error::RepoError;
use quill_core::ports::{Document, DocumentStore, Namespace, PostRepository};

use super::{DocumentPostRepository, InMemoryDocumentStore, PartitionStrategy};

fn tenant(raw: &str) -> TenantId {
    TenantId::parse(raw).unwrap()
}

fn post(title: &str) -> Post {
    Post::new("admin", title.to_string(), String::new(), "body".to_string())
}

fn repo() -> DocumentPostRepository<InMemoryDocumentStore> {
    DocumentPostRepository::new(InMemoryDocumentStore::new())
}

/// Store that never answers within any reasonable timeout.
struct SlowStore;

/// Store whose every call fails like a dropped connection.
struct BrokenStore;

#[async_trait]
impl DocumentStore for SlowStore {
    async fn ping(&self) -> Result<(), RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }

    async fn insert_one(&self, _ns: &Namespace, _document: Document) -> Result<(), RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }

    async fn update_one(&self, _: &Namespace, _: &Filter, _: Document) -> Result<u64, RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(1)
    }

    async fn delete_many(&self, _: &Namespace, _: &Filter) -> Result<u64, RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(1)
    }

    async fn find_one(&self, _: &Namespace, _: &Filter) -> Result<Option<Document>, RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(None)
    }

    async fn find(
        &self,
        _: &Namespace,
        _: &Filter,
        _: u64,
        _: u64,
    ) -> Result<Vec<Document>, RepoError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
}

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn ping(&self) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }

    async fn insert_one(&self, _: &Namespace, _: Document) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }

    async fn update_one(&self, _: &Namespace, _: &Filter, _: Document) -> Result<u64, RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }

    async fn delete_many(&self, _: &Namespace, _: &Filter) -> Result<u64, RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }

    async fn find_one(&self, _: &Namespace, _: &Filter) -> Result<Option<Document>, RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }

    async fn find(
        &self,
        _: &Namespace,
        _: &Filter,
        _: u64,
        _: u64,
    ) -> Result<Vec<Document>, RepoError> {
        Err(RepoError::Connection("connection refused".into()))
    }
}

#[tokio::test]
async fn test_create_then_get_by_slug() {
    let repo = repo();
    let acme = tenant("acme");

    let created = repo.create(&acme, post("Hello World")).await.unwrap();
    let fetched = repo.get_by_slug(&acme, "hello-world").await.unwrap();

    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_tenants_do_not_see_each_other() {
    let repo = repo();
    repo.create(&tenant("acme"), post("Hello World")).await.unwrap();

    let result = repo.get_by_slug(&tenant("globex"), "hello-world").await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_get_missing_slug_is_not_found() {
    let result = repo().get_by_slug(&tenant("acme"), "nope").await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_save_overwrites_by_slug() {
    let repo = repo();
    let acme = tenant("acme");
    let mut stored = repo.create(&acme, post("Hello World")).await.unwrap();

    stored.update_content("new content".into(), "admin");
    assert!(stored.publish());
    repo.save(&acme, &stored).await.unwrap();

    let fetched = repo.get_by_slug(&acme, "hello-world").await.unwrap();
    assert_eq!(fetched.content_raw, "new content");
    assert!(fetched.is_published);
    assert_eq!(fetched.published_at, stored.published_at);
    assert_eq!(fetched.version, 1);
}

#[tokio::test]
async fn test_save_unknown_slug_is_not_found() {
    let result = repo().save(&tenant("acme"), &post("Ghost")).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_by_id_leaves_slug_twins() {
    let repo = repo();
    let acme = tenant("acme");
    let first = repo.create(&acme, post("Same Title")).await.unwrap();
    let second = repo.create(&acme, post("Same Title")).await.unwrap();

    repo.delete_by_id(&acme, first.id).await.unwrap();

    let remaining = repo.get_by_slug(&acme, "same-title").await.unwrap();
    assert_eq!(remaining.id, second.id);
    assert!(matches!(
        repo.delete_by_id(&acme, first.id).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_by_slug_removes_every_collision() {
    let repo = repo();
    let acme = tenant("acme");
    repo.create(&acme, post("Same Title")).await.unwrap();
    repo.create(&acme, post("Same Title")).await.unwrap();
    repo.create(&acme, post("Other")).await.unwrap();

    repo.delete_by_slug(&acme, "same-title").await.unwrap();

    let ns = PartitionStrategy::default().namespace(&acme);
    assert_eq!(repo.store().count(&ns).await, 1);
    assert!(matches!(
        repo.get_by_slug(&acme, "same-title").await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_list_pages_in_creation_order() {
    let repo = repo();
    let acme = tenant("acme");
    for n in 0..5 {
        repo.create(&acme, post(&format!("Post {n}"))).await.unwrap();
    }

    let page = repo
        .list(&acme, Page::new(1, 2).unwrap(), &Filter::new())
        .await
        .unwrap();
    let slugs: Vec<_> = page.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["post-1", "post-2"]);

    let tail = repo
        .list(&acme, Page::new(4, 200).unwrap(), &Filter::new())
        .await
        .unwrap();
    assert_eq!(tail.len(), 1);

    let empty = repo
        .list(&acme, Page::new(0, 0).unwrap(), &Filter::new())
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_list_filters_published_and_author() {
    let repo = repo();
    let acme = tenant("acme");
    let mut published = post("Published");
    published.publish();
    repo.create(&acme, published).await.unwrap();
    repo.create(&acme, post("Draft")).await.unwrap();
    repo.create(
        &acme,
        Post::new("someone-else", "Foreign".into(), String::new(), String::new()),
    )
    .await
    .unwrap();

    let public = repo
        .list(&acme, Page::default(), &Filter::published_only())
        .await
        .unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].slug, "published");

    let mine = repo
        .list(&acme, Page::default(), &Filter::authored_by("admin"))
        .await
        .unwrap();
    let slugs: Vec<_> = mine.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["published", "draft"]);

    let never_published = repo
        .list(
            &acme,
            Page::default(),
            &Filter::new().missing("PublishedAt").eq(fields::AUTHOR_ID, "admin"),
        )
        .await
        .unwrap();
    assert_eq!(never_published.len(), 1);
    assert_eq!(never_published[0].slug, "draft");
}

#[tokio::test]
async fn test_collection_per_tenant_partitioning() {
    let repo = repo().with_partitioning(PartitionStrategy::CollectionPerTenant {
        database: "blog".into(),
        prefix: "posts".into(),
    });
    let acme = tenant("acme");
    repo.create(&acme, post("Hello")).await.unwrap();

    assert_eq!(
        repo.store()
            .count(&Namespace::new("blog", "posts_acme"))
            .await,
        1
    );
    assert_eq!(repo.store().count(&Namespace::new("acme", "posts")).await, 0);
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let repo = DocumentPostRepository::new(SlowStore).with_timeout(Duration::from_millis(50));
    let acme = tenant("acme");

    assert!(matches!(
        repo.get_by_slug(&acme, "x").await,
        Err(RepoError::Timeout(_))
    ));
    assert!(matches!(
        repo.create(&acme, post("x")).await,
        Err(RepoError::Timeout(_))
    ));
    assert!(matches!(repo.ping().await, Err(RepoError::Timeout(_))));
}

#[tokio::test]
async fn test_store_failures_are_not_reported_as_not_found() {
    let repo = DocumentPostRepository::new(BrokenStore);
    let acme = tenant("acme");

    assert!(matches!(
        repo.get_by_slug(&acme, "x").await,
        Err(RepoError::Connection(_))
    ));
    assert!(matches!(
        repo.list(&acme, Page::default(), &Filter::published_only())
            .await,
        Err(RepoError::Connection(_))
    ));
}
