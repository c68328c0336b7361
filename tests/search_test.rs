mod helpers;

use helpers::{angled_embedding, insert_entry, test_embedding, test_store, test_store_with};
use recall::embedding::{cosine_similarity, EMBEDDING_DIM};
use recall::entry::search::SearchStrategy;
use recall::entry::{Entry, EntryStore};
use recall::error::RecallError;

fn timestamps(entries: &[Entry]) -> Vec<i64> {
    entries.iter().map(|e| e.timestamp).collect()
}

/// Twelve entries at increasing angles from dimension 0, inserted with shuffled
/// timestamps. Entry at angle step `i` has timestamp `1000 + order[i]`.
fn seed_angles(store: &dyn EntryStore) -> Vec<i64> {
    let order = [7, 2, 11, 0, 5, 9, 1, 10, 3, 8, 6, 4];
    let mut expected = Vec::new();
    for (i, slot) in order.iter().enumerate() {
        let ts = 1000 + *slot as i64;
        let theta = 0.1 * i as f32;
        insert_entry(store, &format!("angle {i}"), ts, &angled_embedding(theta));
        expected.push(ts);
    }
    expected
}

#[test]
fn empty_store_search_returns_nothing() {
    let (_tmp, store) = test_store();
    assert!(store.search(&test_embedding(0), 10).unwrap().is_empty());

    let (_tmp2, native) = test_store_with(SearchStrategy::NativeIndex);
    assert!(native.search(&test_embedding(0), 10).unwrap().is_empty());
}

#[test]
fn in_process_ranks_by_cosine_similarity() {
    let (_tmp, store) = test_store();
    let expected = seed_angles(&store);

    let results = store.search(&test_embedding(0), 5).unwrap();
    assert_eq!(timestamps(&results), expected[..5].to_vec());

    let query = test_embedding(0);
    let sims: Vec<f32> = results
        .iter()
        .map(|e| cosine_similarity(&query, &e.embedding))
        .collect();
    assert!(sims.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn top_k_larger_than_store_returns_everything_ranked() {
    let (_tmp, store) = test_store();
    let expected = seed_angles(&store);

    let results = store.search(&test_embedding(0), 1000).unwrap();
    assert_eq!(results.len(), expected.len());
    assert_eq!(timestamps(&results), expected);
}

#[test]
fn default_top_k_caps_results() {
    let (_tmp, store) = test_store();
    for ts in 0..(recall::entry::DEFAULT_TOP_K as i64 + 20) {
        insert_entry(&store, "bulk", ts, &test_embedding(ts as usize));
    }
    let results = store
        .search(&test_embedding(0), recall::entry::DEFAULT_TOP_K)
        .unwrap();
    assert_eq!(results.len(), recall::entry::DEFAULT_TOP_K);
    assert_eq!(results[0].timestamp, 0);
}

#[test]
fn ties_follow_timeline_order() {
    let (_tmp, store) = test_store();
    // Same direction, different magnitudes: identical cosine similarity
    for (i, ts) in [10, 30, 20].iter().enumerate() {
        let scaled: Vec<f32> = test_embedding(0).iter().map(|x| x * (i as f32 + 1.0)).collect();
        insert_entry(&store, "tie", *ts, &scaled);
    }
    insert_entry(&store, "other", 40, &test_embedding(9));

    let results = store.search(&test_embedding(0), 4).unwrap();
    assert_eq!(timestamps(&results), vec![30, 20, 10, 40]);
}

#[test]
fn native_and_in_process_agree() {
    let (_tmp, store) = test_store_with(SearchStrategy::NativeIndex);
    seed_angles(&store);
    // Some off-plane entries as well
    for seed in 2..6 {
        insert_entry(&store, "off-plane", 2000 + seed as i64, &test_embedding(seed));
    }
    // A zero-norm vector scores 0 both ways; the opposite of e0 scores -1
    insert_entry(&store, "zero", 3000, &vec![0.0; EMBEDDING_DIM]);
    let opposite: Vec<f32> = test_embedding(0).iter().map(|x| -x).collect();
    insert_entry(&store, "opposite", 3001, &opposite);

    let queries = [test_embedding(0), angled_embedding(0.53), test_embedding(3)];
    for query in &queries {
        for top_k in [1, 5, 16, 50] {
            let native = store.search_native(query, top_k).unwrap();
            let in_process = store.search_in_process(query, top_k).unwrap();
            assert_eq!(
                native.iter().map(|e| e.id).collect::<Vec<_>>(),
                in_process.iter().map(|e| e.id).collect::<Vec<_>>(),
                "strategies disagree for top_k={top_k}"
            );
        }
    }
}

#[test]
fn search_round_trips_full_entries() {
    let (_tmp, store) = test_store_with(SearchStrategy::NativeIndex);
    let embedding: Vec<f32> = (0..EMBEDDING_DIM)
        .map(|i| ((i * 31) % 17) as f32 / 17.0 - 0.4)
        .collect();
    insert_entry(&store, "exact", 77, &embedding);

    let results = store.search(&embedding, 1).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "exact");
    assert_eq!(results[0].embedding, embedding);
}

#[test]
fn query_with_wrong_dimension_is_rejected() {
    let (_tmp, store) = test_store();
    insert_entry(&store, "a", 1, &test_embedding(0));
    let err = store.search(&[1.0, 0.0, 0.0], 5).unwrap_err();
    assert!(matches!(err, RecallError::DimensionMismatch { actual: 3, .. }));
}
