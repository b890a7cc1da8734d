use bson::{Bson, Document, doc};
use slate_memory::{CollectionConfig, MemoryDatabase, MemoryError};
use slate_query::{FindQuery, Model, PopulateSpec, Projection, Sort};

fn seed() -> MemoryDatabase {
    let db = MemoryDatabase::new();
    db.create_collection(CollectionConfig::new("categories")).unwrap();
    db.create_collection(CollectionConfig::new("posts").with_ref("category", "categories"))
        .unwrap();
    db.insert_many(
        "categories",
        vec![
            doc! { "_id": "cat-1", "name": "Rust", "active": true },
            doc! { "_id": "cat-2", "name": "Go", "active": false },
        ],
    )
    .unwrap();
    db.insert_many(
        "posts",
        vec![
            doc! { "_id": "p1", "title": "Ownership", "rank": 2_i32, "category": "cat-1", "tags": ["cat-1", "cat-2"] },
            doc! { "_id": "p2", "title": "Goroutines", "rank": 1_i32, "category": "cat-2", "tags": ["cat-2"] },
            doc! { "_id": "p3", "title": "Untagged", "rank": 3_i32, "category": "cat-9" },
        ],
    )
    .unwrap();
    db
}

fn ids(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.get_str("_id").unwrap()).collect()
}

#[tokio::test]
async fn find_filters_sorts_and_projects() {
    let db = seed();
    let posts = db.collection("posts");

    let docs = posts
        .find(FindQuery {
            filter: doc! { "rank": { "$gte": 2_i32 } },
            projection: Some(Projection::parse("title")),
            sort: vec![Sort::desc("rank")],
            populate: None,
        })
        .await
        .unwrap();

    assert_eq!(ids(&docs), vec!["p3", "p1"]);
    assert_eq!(docs[1], doc! { "_id": "p1", "title": "Ownership" });
}

#[tokio::test]
async fn populate_scalar_reference_through_configured_ref() {
    let db = seed();
    let docs = db
        .collection("posts")
        .find(FindQuery {
            populate: Some(PopulateSpec::path("category")),
            sort: vec![Sort::asc("rank")],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(docs[0].get_document("category").unwrap().get_str("name").unwrap(), "Go");
    assert_eq!(docs[1].get_document("category").unwrap().get_str("name").unwrap(), "Rust");
    // dangling reference resolves to null
    assert_eq!(docs[2].get("category"), Some(&Bson::Null));
}

#[tokio::test]
async fn populate_array_reference_with_select_and_filter() {
    let db = seed();
    let spec = PopulateSpec {
        path: "tags".into(),
        model: Some("categories".into()),
        select: Some("name -_id".into()),
        filter: Some(doc! { "active": true }),
    };
    let docs = db
        .collection("posts")
        .find(FindQuery {
            filter: doc! { "_id": "p1" },
            populate: Some(spec),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        docs[0].get_array("tags").unwrap(),
        &vec![Bson::Document(doc! { "name": "Rust" })]
    );
}

#[tokio::test]
async fn populate_without_known_reference_is_an_invalid_query() {
    let db = seed();
    let err = db
        .collection("posts")
        .find(FindQuery {
            populate: Some(PopulateSpec::path("tags")),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MemoryError::InvalidQuery(_)), "{err}");
}

#[tokio::test]
async fn malformed_filter_surfaces_as_filter_error() {
    let db = seed();
    let err = db
        .collection("posts")
        .find(FindQuery {
            filter: doc! { "$nor": [{ "rank": 1_i32 }] },
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, MemoryError::Filter(_)), "{err}");
}

#[tokio::test]
async fn unknown_collection_errors() {
    let db = MemoryDatabase::new();
    let err = db.collection("nope").find(FindQuery::default()).await.unwrap_err();
    assert!(matches!(err, MemoryError::CollectionNotFound(ref name) if name == "nope"));
}

#[test]
fn insert_assigns_object_ids() {
    let db = MemoryDatabase::new();
    db.create_collection(CollectionConfig::new("authors")).unwrap();
    let ids = db
        .collection("authors")
        .insert_many(vec![doc! { "name": "Ana" }, doc! { "_id": "fixed", "name": "Bo" }])
        .unwrap();
    assert!(matches!(ids[0], Bson::ObjectId(_)));
    assert_eq!(ids[1], Bson::String("fixed".into()));
}

#[test]
fn duplicate_collection_is_rejected() {
    let db = MemoryDatabase::new();
    db.create_collection(CollectionConfig::new("authors")).unwrap();
    let err = db.create_collection(CollectionConfig::new("authors")).unwrap_err();
    assert!(matches!(err, MemoryError::CollectionExists(_)));
}

#[test]
fn collection_config_from_json() {
    let config: CollectionConfig =
        serde_json::from_str(r#"{ "name": "posts", "refs": { "category": "categories" } }"#)
            .unwrap();
    assert_eq!(config.refs.get("category").map(String::as_str), Some("categories"));

    let bare: CollectionConfig = serde_json::from_str(r#"{ "name": "posts" }"#).unwrap();
    assert!(bare.refs.is_empty());
}
