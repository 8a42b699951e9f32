//! Listing and lookup over a document store.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{LookupError, StoreError};
use crate::post::{Post, PostSummary, parse_document};
use crate::store::DocumentStore;

/// Published posts read from a [`DocumentStore`].
///
/// Nothing is cached: every call reads the store again, so edits to the
/// posts directory show up on the next listing.
#[derive(Debug, Clone)]
pub struct PostCollection<S> {
    store: S,
}

impl<S: DocumentStore> PostCollection<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every published post, newest first.
    ///
    /// Documents that cannot be read or parsed are logged and left out.
    /// Only a failure to enumerate the store is an error.
    pub fn list_posts(&self) -> Result<Vec<PostSummary>, StoreError> {
        let ids = self.store.list_ids()?;
        debug!(count = ids.len(), "listing posts");

        let mut posts: Vec<PostSummary> = ids
            .par_iter()
            .filter_map(|id| self.load(id))
            .filter(|post| !post.metadata.draft)
            .map(PostSummary::from)
            .collect();

        // Stable, so posts sharing a date keep discovery order
        posts.sort_by(|a, b| b.metadata.date.cmp(&a.metadata.date));
        Ok(posts)
    }

    /// A single published post.
    pub fn get_post(&self, slug: &str) -> Result<Post, LookupError> {
        let not_found = || LookupError::NotFound {
            slug: slug.to_string(),
        };

        let raw = match self.store.read(slug) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(not_found()),
            Err(e) => {
                warn!(slug, error = %e, "failed to read post");
                return Err(not_found());
            }
        };

        let post = parse_document(slug, &raw).map_err(|e| {
            warn!(slug, error = %e, "failed to parse post");
            not_found()
        })?;

        if post.metadata.draft {
            return Err(LookupError::NotAvailable {
                slug: slug.to_string(),
            });
        }
        Ok(post)
    }

    fn load(&self, id: &str) -> Option<Post> {
        let raw = match self.store.read(id) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(id, "document vanished while listing");
                return None;
            }
            Err(e) => {
                warn!(id, error = %e, "skipping unreadable post");
                return None;
            }
        };
        match parse_document(id, &raw) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!(id, error = %e, "skipping malformed post");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::store::MemoryDocumentStore;

    use super::*;

    fn doc(title: &str, date: &str, draft: bool) -> String {
        format!("---\ntitle: {title}\ndate: {date}\nsummary: About {title}\ndraft: {draft}\n---\nSome words here.\n")
    }

    fn titles(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.metadata.title.as_str()).collect()
    }

    #[test]
    fn test_list_excludes_drafts_and_sorts_newest_first() {
        let store = MemoryDocumentStore::new()
            .with("old", doc("Old", "2022-03-01", false))
            .with("wip", doc("Wip", "2025-01-01", true))
            .with("new", doc("New", "2024-06-01", false))
            .with("mid", doc("Mid", "2023-01-15T12:00:00Z", false));
        let posts = PostCollection::new(store).list_posts().unwrap();

        assert_eq!(titles(&posts), vec!["New", "Mid", "Old"]);
        assert!(posts.iter().all(|p| !p.metadata.draft));
        assert_eq!(posts[0].metadata.slug, "new");
    }

    #[test]
    fn test_sort_is_independent_of_discovery_order() {
        let dates = ["2021-01-01", "2024-01-01", "2023-01-01", "2022-01-01"];
        // Rotate which id each date is stored under
        for shift in 0..dates.len() {
            let mut store = MemoryDocumentStore::new();
            for (i, date) in dates.iter().enumerate() {
                let id = format!("post-{}", (i + shift) % dates.len());
                store.insert(id, doc(date, date, false));
            }
            let posts = PostCollection::new(store).list_posts().unwrap();
            assert_eq!(
                titles(&posts),
                vec!["2024-01-01", "2023-01-01", "2022-01-01", "2021-01-01"]
            );
        }
    }

    #[test]
    fn test_equal_dates_keep_discovery_order() {
        let store = MemoryDocumentStore::new()
            .with("a", doc("A", "2024-01-01", false))
            .with("b", doc("B", "2024-01-01", false))
            .with("c", doc("C", "2024-01-01", false));
        let posts = PostCollection::new(store).list_posts().unwrap();
        assert_eq!(titles(&posts), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_malformed_documents_are_skipped() {
        let store = MemoryDocumentStore::new()
            .with("good", doc("Good", "2024-01-01", false))
            .with("no-header", "just text")
            .with("no-summary", "---\ntitle: T\ndate: 2024-01-01\n---\n")
            .with("bad-date", "---\ntitle: T\ndate: soon\nsummary: S\n---\n");
        let posts = PostCollection::new(store).list_posts().unwrap();
        assert_eq!(titles(&posts), vec!["Good"]);
    }

    #[test]
    fn test_valid_yaml_variants_are_listed() {
        let store = MemoryDocumentStore::new()
            .with(
                "folded",
                "---\ntitle: Folded\ndate: 2024-01-03\nsummary: >-\n  A summary\n  over two lines\n---\nx\n",
            )
            .with(
                "commented",
                "---\ntitle: \"Commented\" # trailing comment\ndate: 2024-01-02\nsummary: S\n---\nx\n",
            )
            .with(
                "stack",
                "---\ntitle: Stack\ndate: 2024-01-01\nsummary: S\ntools: [Rust, Ratatui] # stack\n---\nx\n",
            );
        let posts = PostCollection::new(store).list_posts().unwrap();

        assert_eq!(titles(&posts), vec!["Folded", "Commented", "Stack"]);
        assert_eq!(posts[0].metadata.summary, "A summary over two lines");
        assert_eq!(posts[2].metadata.tools, vec!["Rust", "Ratatui"]);
    }

    struct FailingStore;

    impl DocumentStore for FailingStore {
        fn list_ids(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Io {
                path: "blog".into(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn read(&self, _id: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io {
                path: "blog/post.md".into(),
                source: std::io::Error::other("disk on fire"),
            })
        }
    }

    #[test]
    fn test_store_failure() {
        let posts = PostCollection::new(FailingStore);
        assert!(matches!(posts.list_posts(), Err(StoreError::Io { .. })));
        assert!(matches!(
            posts.get_post("post"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_store() {
        let posts = PostCollection::new(MemoryDocumentStore::new())
            .list_posts()
            .unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_get_post() {
        let store = MemoryDocumentStore::new()
            .with("hello", doc("Hello", "2024-01-01", false))
            .with("wip", doc("Wip", "2024-01-01", true))
            .with("broken", "no header");
        let posts = PostCollection::new(store);

        let post = posts.get_post("hello").unwrap();
        assert_eq!(post.metadata.title, "Hello");
        assert_eq!(post.content, "Some words here.\n");

        assert_eq!(
            posts.get_post("wip"),
            Err(LookupError::NotAvailable {
                slug: "wip".to_string()
            })
        );
        assert_eq!(
            posts.get_post("missing"),
            Err(LookupError::NotFound {
                slug: "missing".to_string()
            })
        );
        assert!(matches!(
            posts.get_post("broken"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_fs_collection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("first.md"), doc("First", "2024-01-01", false)).unwrap();
        let posts = PostCollection::new(crate::FsDocumentStore::new(dir.path()));

        assert_eq!(posts.list_posts().unwrap().len(), 1);
        assert_eq!(posts.get_post("first").unwrap().metadata.title, "First");
        assert!(matches!(
            posts.get_post("../first"),
            Err(LookupError::NotFound { .. })
        ));
    }
}
