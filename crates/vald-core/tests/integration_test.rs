//! Integration test: insert → search → update → remove lifecycle and the
//! error contract of every engine operation.

use std::time::Duration;

use vald_core::EngineConfig;
use vald_core::distance::DistanceType;
use vald_core::error::Error;
use vald_core::model::timestamp::{Operator, TimestampCondition};
use vald_core::query::ValdEngine;
use vald_core::query::insert::InsertRequest;
use vald_core::query::search::{SearchConfig, SearchMethod, SearchRequest, SearchTarget};
use vald_core::query::update::{UpdateRequest, UpdateTimestampRequest};

fn create_test_engine() -> ValdEngine {
    ValdEngine::in_memory(EngineConfig {
        dimension: 3,
        distance: DistanceType::L2,
        agent_name: "agent-test".to_string(),
        agent_ips: vec!["10.0.0.1".to_string()],
    })
}

async fn seed(engine: &ValdEngine) {
    for (id, v) in [
        ("a", [0.0, 0.0, 1.0]),
        ("b", [0.0, 1.0, 0.0]),
        ("c", [1.0, 0.0, 0.0]),
        ("d", [5.0, 5.0, 5.0]),
    ] {
        engine.insert(InsertRequest::new(id, v.to_vec())).await.unwrap();
    }
}

#[tokio::test]
async fn test_full_lifecycle() {
    let engine = create_test_engine();

    // === INSERT ===
    let location = engine
        .insert(InsertRequest::new("vec-1", vec![1.0, 2.0, 3.0]))
        .await
        .expect("insert should succeed");
    assert_eq!(location.name, "agent-test");
    assert_eq!(location.uuid, "vec-1");
    assert_eq!(location.ips, vec!["10.0.0.1"]);

    let stored = engine.get("vec-1").await.unwrap();
    assert!(stored.timestamp > 0, "zero timestamp should become now");

    // === SEARCH ===
    let response = engine
        .search(SearchRequest::by_vector(vec![1.0, 2.0, 3.1], 5))
        .await
        .unwrap();
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, "vec-1");

    // === UPDATE ===
    engine
        .update(UpdateRequest::new("vec-1", vec![3.0, 2.0, 1.0]))
        .await
        .unwrap();
    assert_eq!(engine.get("vec-1").await.unwrap().vector, vec![3.0, 2.0, 1.0]);

    // === REMOVE ===
    engine.remove("vec-1").await.unwrap();
    assert!(matches!(engine.get("vec-1").await, Err(Error::NotFound(_))));
    assert_eq!(engine.index_count().await.unwrap().stored, 0);
}

#[tokio::test]
async fn test_insert_errors() {
    let engine = create_test_engine();
    engine.insert(InsertRequest::new("x", vec![1.0, 1.0, 1.0])).await.unwrap();

    let dup = engine.insert(InsertRequest::new("x", vec![2.0, 2.0, 2.0])).await;
    assert!(matches!(dup, Err(Error::AlreadyExists(_))));

    let empty_id = engine.insert(InsertRequest::new("", vec![1.0, 1.0, 1.0])).await;
    assert!(matches!(empty_id, Err(Error::Validation(_))));

    let wrong_dim = engine.insert(InsertRequest::new("y", vec![1.0])).await;
    assert!(matches!(wrong_dim, Err(Error::Validation(_))));

    let nan = engine.insert(InsertRequest::new("z", vec![f32::NAN, 0.0, 0.0])).await;
    assert!(matches!(nan, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_multi_insert_is_all_or_nothing() {
    let engine = create_test_engine();
    engine.insert(InsertRequest::new("taken", vec![1.0, 1.0, 1.0])).await.unwrap();

    let result = engine
        .insert_many(vec![
            InsertRequest::new("fresh", vec![0.0, 0.0, 0.0]),
            InsertRequest::new("taken", vec![2.0, 2.0, 2.0]),
        ])
        .await;
    assert!(matches!(result, Err(Error::AlreadyExists(_))));
    assert!(matches!(engine.exists("fresh").await, Err(Error::NotFound(_))));

    // Duplicates inside one batch collide with each other.
    let result = engine
        .insert_many(vec![
            InsertRequest::new("p", vec![0.0, 0.0, 0.0]),
            InsertRequest::new("p", vec![1.0, 0.0, 0.0]),
        ])
        .await;
    assert!(matches!(result, Err(Error::AlreadyExists(_))));

    let locations = engine
        .insert_many(vec![
            InsertRequest::new("p", vec![0.0, 0.0, 0.0]),
            InsertRequest::new("q", vec![1.0, 0.0, 0.0]),
        ])
        .await
        .unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(engine.index_count().await.unwrap().stored, 3);
}

#[tokio::test]
async fn test_update_semantics() {
    let engine = create_test_engine();

    let missing = engine.update(UpdateRequest::new("nope", vec![1.0, 1.0, 1.0])).await;
    assert!(matches!(missing, Err(Error::NotFound(_))));

    let mut insert = InsertRequest::new("m", vec![1.0, 1.0, 1.0]);
    insert.metadata = Some(b"tag".to_vec());
    engine.insert(insert).await.unwrap();

    let same = engine.update(UpdateRequest::new("m", vec![1.0, 1.0, 1.0])).await;
    assert!(matches!(same, Err(Error::AlreadyExists(_))));

    let mut relaxed = UpdateRequest::new("m", vec![1.0, 1.0, 1.0]);
    relaxed.skip_strict_exist_check = true;
    engine.update(relaxed).await.unwrap();

    // Metadata survives an update that does not carry any.
    engine.update(UpdateRequest::new("m", vec![2.0, 2.0, 2.0])).await.unwrap();
    assert_eq!(engine.get("m").await.unwrap().metadata, Some(b"tag".to_vec()));

    // Changing only the metadata is a real change.
    let mut meta_only = UpdateRequest::new("m", vec![2.0, 2.0, 2.0]);
    meta_only.metadata = Some(b"other".to_vec());
    engine.update(meta_only).await.unwrap();
    assert_eq!(engine.get("m").await.unwrap().metadata, Some(b"other".to_vec()));
}

#[tokio::test]
async fn test_upsert_inserts_then_updates() {
    let engine = create_test_engine();
    engine.upsert(UpdateRequest::new("u", vec![1.0, 0.0, 0.0])).await.unwrap();
    assert_eq!(engine.get("u").await.unwrap().vector, vec![1.0, 0.0, 0.0]);

    engine.upsert(UpdateRequest::new("u", vec![0.0, 1.0, 0.0])).await.unwrap();
    assert_eq!(engine.get("u").await.unwrap().vector, vec![0.0, 1.0, 0.0]);

    let same = engine.upsert(UpdateRequest::new("u", vec![0.0, 1.0, 0.0])).await;
    assert!(matches!(same, Err(Error::AlreadyExists(_))));

    let many = engine
        .upsert_many(vec![
            UpdateRequest::new("u", vec![0.0, 0.0, 1.0]),
            UpdateRequest::new("v", vec![1.0, 1.0, 1.0]),
        ])
        .await
        .unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(engine.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_timestamp() {
    let engine = create_test_engine();
    let mut request = InsertRequest::new("t", vec![1.0, 1.0, 1.0]);
    request.timestamp = 100;
    engine.insert(request).await.unwrap();

    let invalid = engine
        .update_timestamp(UpdateTimestampRequest {
            id: "t".to_string(),
            timestamp: 0,
            force: false,
        })
        .await;
    assert!(matches!(invalid, Err(Error::Validation(_))));

    let missing = engine
        .update_timestamp(UpdateTimestampRequest {
            id: "nope".to_string(),
            timestamp: 200,
            force: false,
        })
        .await;
    assert!(matches!(missing, Err(Error::NotFound(_))));

    let older = engine
        .update_timestamp(UpdateTimestampRequest {
            id: "t".to_string(),
            timestamp: 50,
            force: false,
        })
        .await;
    assert!(matches!(older, Err(Error::AlreadyExists(_))));

    engine
        .update_timestamp(UpdateTimestampRequest {
            id: "t".to_string(),
            timestamp: 50,
            force: true,
        })
        .await
        .unwrap();
    assert_eq!(engine.timestamp("t").await.unwrap(), 50);

    engine
        .update_timestamp(UpdateTimestampRequest {
            id: "t".to_string(),
            timestamp: 300,
            force: false,
        })
        .await
        .unwrap();
    assert_eq!(engine.timestamp("t").await.unwrap(), 300);
}

#[tokio::test]
async fn test_remove_by_timestamp_ands_conditions() {
    let engine = create_test_engine();
    for (id, ts) in [("t10", 10), ("t20", 20), ("t30", 30)] {
        let mut request = InsertRequest::new(id, vec![ts as f32, 0.0, 0.0]);
        request.timestamp = ts;
        engine.insert(request).await.unwrap();
    }

    let removed = engine
        .remove_by_timestamp(&[
            TimestampCondition::new(Operator::Ge, 15),
            TimestampCondition::new(Operator::Lt, 30),
        ])
        .await
        .unwrap();
    let ids: Vec<&str> = removed.iter().map(|l| l.uuid.as_str()).collect();
    assert_eq!(ids, vec!["t20"]);
    assert!(engine.exists("t10").await.is_ok());
    assert!(engine.exists("t30").await.is_ok());

    let none = engine
        .remove_by_timestamp(&[TimestampCondition::new(Operator::Eq, 20)])
        .await;
    assert!(matches!(none, Err(Error::NotFound(_))));

    let empty = engine.remove_by_timestamp(&[]).await;
    assert!(matches!(empty, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_remove_errors_and_batches() {
    let engine = create_test_engine();
    seed(&engine).await;

    assert!(matches!(engine.remove("nope").await, Err(Error::NotFound(_))));

    let partial = engine
        .remove_many(vec!["a".to_string(), "nope".to_string()])
        .await;
    assert!(matches!(partial, Err(Error::NotFound(_))));
    assert!(engine.exists("a").await.is_ok());

    engine
        .remove_many(vec!["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(engine.index_count().await.unwrap().stored, 2);
}

#[tokio::test]
async fn test_search_contract() {
    let engine = create_test_engine();
    seed(&engine).await;

    let response = engine
        .search(SearchRequest {
            target: SearchTarget::Vector(vec![0.0, 0.0, 0.9]),
            config: SearchConfig {
                request_id: "req-1".to_string(),
                num: 3,
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(response.request_id, "req-1");
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[0].id, "a");
    assert!(response.results.windows(2).all(|w| w[0].distance <= w[1].distance));

    // Radius bounds the result distance.
    let mut bounded = SearchRequest::by_vector(vec![0.0, 0.0, 0.0], 10);
    bounded.config.radius = 1.5;
    let response = engine.search(bounded).await.unwrap();
    assert_eq!(response.results.len(), 3);
    assert!(response.results.iter().all(|r| r.id != "d"));

    // Nothing inside the radius.
    let mut empty = SearchRequest::by_vector(vec![100.0, 100.0, 100.0], 10);
    empty.config.radius = 0.5;
    assert!(matches!(engine.search(empty).await, Err(Error::NotFound(_))));

    // Fewer than min_num.
    let mut too_few = SearchRequest::by_vector(vec![0.0, 0.0, 0.0], 2);
    too_few.config.min_num = 3;
    assert!(matches!(engine.search(too_few).await, Err(Error::NotFound(_))));

    let zero = engine.search(SearchRequest::by_vector(vec![0.0, 0.0, 0.0], 0)).await;
    assert!(matches!(zero, Err(Error::Validation(_))));

    let wrong_dim = engine.search(SearchRequest::by_vector(vec![0.0], 1)).await;
    assert!(matches!(wrong_dim, Err(Error::Validation(_))));

    let missing_id = engine.search(SearchRequest::by_id("nope", 1)).await;
    assert!(matches!(missing_id, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_search_timeout() {
    let engine = create_test_engine();
    let requests = (0..500)
        .map(|i| InsertRequest::new(format!("v{i}"), vec![i as f32, 0.0, 0.0]))
        .collect();
    engine.insert_many(requests).await.unwrap();

    for method in [SearchMethod::Index, SearchMethod::Linear] {
        let mut expired = SearchRequest::by_vector(vec![0.0, 0.0, 0.0], 5);
        expired.config.timeout = Some(Duration::ZERO);
        let result = engine.search_many(vec![expired], method).await;
        assert!(matches!(result, Err(Error::DeadlineExceeded(_))), "{method:?}");

        let mut generous = SearchRequest::by_vector(vec![0.0, 0.0, 0.0], 5);
        generous.config.timeout = Some(Duration::from_secs(60));
        let response = engine.search_many(vec![generous], method).await.unwrap();
        assert_eq!(response[0].results[0].id, "v0");
    }
}

#[tokio::test]
async fn test_linear_search_matches_index_search() {
    let engine = create_test_engine();
    seed(&engine).await;

    let indexed = engine.search(SearchRequest::by_id("c", 4)).await.unwrap();
    let linear = engine.linear_search(SearchRequest::by_id("c", 4)).await.unwrap();
    assert_eq!(indexed.results, linear.results);
    assert_eq!(indexed.results[0].id, "c");
    assert_eq!(indexed.results[0].distance, 0.0);

    let many = engine
        .search_many(
            vec![
                SearchRequest::by_id("a", 1),
                SearchRequest::by_vector(vec![5.0, 5.0, 5.0], 1),
            ],
            SearchMethod::Linear,
        )
        .await
        .unwrap();
    assert_eq!(many[0].results[0].id, "a");
    assert_eq!(many[1].results[0].id, "d");

    let failing = engine
        .search_many(
            vec![SearchRequest::by_id("a", 1), SearchRequest::by_id("nope", 1)],
            SearchMethod::Index,
        )
        .await;
    assert!(matches!(failing, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_search_returns_stored_metadata() {
    let engine = create_test_engine();
    let mut request = InsertRequest::new("meta", vec![1.0, 0.0, 0.0]);
    request.metadata = Some(vec![1, 2, 3]);
    engine.insert(request).await.unwrap();

    let response = engine.search(SearchRequest::by_id("meta", 1)).await.unwrap();
    assert_eq!(response.results[0].metadata, Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_object_access_and_list_order() {
    let engine = create_test_engine();
    seed(&engine).await;

    assert_eq!(engine.exists("b").await.unwrap(), "b");
    assert!(matches!(engine.exists("nope").await, Err(Error::NotFound(_))));
    assert!(matches!(engine.timestamp("nope").await, Err(Error::NotFound(_))));
    assert!(matches!(engine.exists("").await, Err(Error::Validation(_))));

    let ids: Vec<String> = engine.list().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_index_info_and_flush() {
    let engine = create_test_engine();

    let stats = engine.index_statistics().await.unwrap();
    assert!(!stats.valid);
    assert_eq!(stats.dimension, 3);

    seed(&engine).await;
    let count = engine.index_count().await.unwrap();
    assert_eq!(count.stored, 4);
    assert!(!count.saving);

    let stats = engine.index_statistics().await.unwrap();
    assert!(stats.valid);
    assert_eq!(stats.stored, 4);
    assert!((stats.min_norm - 1.0).abs() < 1e-6);
    assert!((stats.max_norm - 75.0f64.sqrt()).abs() < 1e-4);

    let property = engine.index_property();
    assert_eq!(property.dimension, 3);
    assert_eq!(property.distance_type, "l2");
    assert_eq!(property.index_type, "flat");

    let flushed = engine.flush().await.unwrap();
    assert_eq!(flushed.stored, 0);
    assert!(engine.list().await.unwrap().is_empty());
    assert!(engine.index.is_empty());
}

#[tokio::test]
async fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vald.snapshot.json");

    let engine = create_test_engine();
    seed(&engine).await;
    assert_eq!(engine.save_snapshot(&path).await.unwrap(), 4);
    assert!(!engine.is_saving());

    let restored = create_test_engine();
    restored.insert(InsertRequest::new("stale", vec![9.0, 9.0, 9.0])).await.unwrap();
    assert_eq!(restored.load_snapshot(&path).await.unwrap(), 4);
    assert!(matches!(restored.exists("stale").await, Err(Error::NotFound(_))));
    assert_eq!(restored.get("d").await.unwrap(), engine.get("d").await.unwrap());

    let response = restored.search(SearchRequest::by_id("a", 1)).await.unwrap();
    assert_eq!(response.results[0].id, "a");

    let other = ValdEngine::in_memory(EngineConfig {
        dimension: 4,
        ..EngineConfig::default()
    });
    assert!(matches!(other.load_snapshot(&path).await, Err(Error::Validation(_))));

    let missing = restored.load_snapshot(&dir.path().join("absent.json")).await;
    assert!(matches!(missing, Err(Error::Storage(_))));
}

#[tokio::test]
async fn test_vectorize_validates_dimension() {
    let engine = create_test_engine();
    let bytes = vald_core::vectorizer::encode_f32(&[1.0, 2.0, 3.0]);
    assert_eq!(engine.vectorize(&bytes).unwrap(), vec![1.0, 2.0, 3.0]);

    let short = vald_core::vectorizer::encode_f32(&[1.0]);
    assert!(matches!(engine.vectorize(&short), Err(Error::Validation(_))));
}
