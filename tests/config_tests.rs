//! Configuration loaded from JSON driving materialization and dedup.

use seqflow::prelude::*;
use seqflow_exec::conversion::to_vec_with;

#[test]
fn test_json_config_bounds_materialization() {
    let cfg = BufferConfig::from_json(r#"{ "starting_capacity": 2, "resize_limit": 4, "max_capacity": 20 }"#)
        .unwrap();

    let fits = to_vec_with(&from_iterable(0..20), &cfg).unwrap();
    assert_eq!(fits, (0..20).collect::<Vec<_>>());

    let err = to_vec_with(&from_iterable(0..21), &cfg).unwrap_err();
    assert_eq!(err, Error::CapacityExceeded { requested: 21, max: 20 });
}

#[test]
fn test_json_config_shapes_buffer_growth() {
    let cfg = BufferConfig::from_json(r#"{ "starting_capacity": 2, "resize_limit": 4 }"#).unwrap();
    let mut buffer = GrowableBuffer::with_config(&cfg);
    for i in 0..5 {
        buffer.push(i).unwrap();
    }
    // 4 items in the first buffer, then one chained buffer
    assert_eq!(buffer.buffer_count(), 2);
    assert_eq!(buffer.into_vec(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_json_config_sizes_sets_and_pools() {
    let cfg = BufferConfig::from_json(r#"{ "set_initial_capacity": 3, "set_load_factor": 0.5, "pool_max_retained": 1 }"#)
        .unwrap();

    let pool: BufferPool<usize> = BufferPool::from_config(&cfg);
    {
        let mut set = Set::with_pool(&cfg, DefaultComparer::new(), &pool);
        for i in 0..40 {
            assert!(set.add(i));
        }
        assert_eq!(set.len(), 40);
        assert!(!set.add(7));
    }
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = BufferConfig::from_json(r#"{ "starting_capacity": 0 }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_config_serializes_for_downstream_tools() {
    let cfg = BufferConfig {
        starting_capacity: 16,
        resize_limit: 64,
        ..BufferConfig::default()
    };
    let value = serde_json::to_value(&cfg).unwrap();
    assert_eq!(value["starting_capacity"], 16);
    assert_eq!(value["resize_limit"], 64);

    let back = BufferConfig::from_json(&value.to_string()).unwrap();
    assert_eq!(back, cfg);
}
