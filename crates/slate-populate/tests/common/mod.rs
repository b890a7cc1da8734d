#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bson::{Document, doc};
use slate_memory::{CollectionConfig, MemoryCollection, MemoryDatabase};
use slate_query::{FindQuery, Model};

pub const AUTHORS: &str = "authors";
pub const POSTS: &str = "posts";
pub const BOOKS: &str = "books";
pub const PROFILES: &str = "profiles";
pub const CATEGORIES: &str = "categories";

pub fn authors() -> Vec<Document> {
    vec![
        doc! { "_id": "a1", "name": "Ana" },
        doc! { "_id": "a2", "name": "Bo" },
    ]
}

/// Route engine logs through the test harness; set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Seed a database with:
/// - 5 posts by a1 (scalar `author`), one unpublished
/// - 5 books co-written by a1 and a2 (array `authors`)
/// - one profile per author (scalar `user`)
/// - categories referenced from posts
pub fn library() -> MemoryDatabase {
    init_tracing();
    let db = MemoryDatabase::new();
    db.create_collection(CollectionConfig::new(AUTHORS)).unwrap();
    db.create_collection(CollectionConfig::new(CATEGORIES)).unwrap();
    db.create_collection(CollectionConfig::new(POSTS).with_ref("category", CATEGORIES))
        .unwrap();
    db.create_collection(CollectionConfig::new(BOOKS)).unwrap();
    db.create_collection(CollectionConfig::new(PROFILES)).unwrap();

    db.insert_many(AUTHORS, authors()).unwrap();
    db.insert_many(
        CATEGORIES,
        vec![
            doc! { "_id": "c1", "name": "Systems" },
            doc! { "_id": "c2", "name": "Databases" },
        ],
    )
    .unwrap();
    db.insert_many(
        POSTS,
        vec![
            doc! { "_id": "p1", "title": "Ownership", "body": "...", "rank": 3_i32, "published": true, "author": "a1", "category": "c1" },
            doc! { "_id": "p2", "title": "Lifetimes", "body": "...", "rank": 1_i32, "published": true, "author": "a1", "category": "c1" },
            doc! { "_id": "p3", "title": "B-trees", "body": "...", "rank": 5_i32, "published": false, "author": "a1", "category": "c2" },
            doc! { "_id": "p4", "title": "LSM trees", "body": "...", "rank": 4_i32, "published": true, "author": "a1", "category": "c2" },
            doc! { "_id": "p5", "title": "Traits", "body": "...", "rank": 2_i32, "published": true, "author": "a1", "category": "c1" },
            doc! { "_id": "p6", "title": "Stray", "body": "...", "rank": 9_i32, "published": true, "author": "a9", "category": "c1" },
        ],
    )
    .unwrap();
    db.insert_many(
        BOOKS,
        (1..=5).map(|n| doc! { "_id": format!("b{n}"), "title": format!("Volume {n}"), "authors": ["a1", "a2"] }),
    )
    .unwrap();
    db.insert_many(
        PROFILES,
        vec![
            doc! { "_id": "pr1", "user": "a1", "bio": "Ana writes about Rust" },
            doc! { "_id": "pr2", "user": "a2", "bio": "Bo writes about storage" },
        ],
    )
    .unwrap();
    db
}

pub fn ids(docs: &[Document]) -> Vec<String> {
    docs.iter()
        .map(|d| d.get_str("_id").unwrap().to_string())
        .collect()
}

/// Wraps a model and counts `find` calls.
#[derive(Clone)]
pub struct CountingModel {
    pub inner: MemoryCollection,
    pub calls: Arc<AtomicUsize>,
}

impl CountingModel {
    pub fn new(inner: MemoryCollection) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Model for CountingModel {
    type Error = slate_memory::MemoryError;

    async fn find(&self, query: FindQuery) -> Result<Vec<Document>, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(query).await
    }
}
