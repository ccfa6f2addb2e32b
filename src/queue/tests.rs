use super::*;

fn names(q: &QueueStore) -> Vec<String> {
    q.peek_all().iter().map(|t| t.to_string()).collect()
}

#[test]
fn peek_all_returns_insertion_order_with_duplicates() {
    let mut q = QueueStore::new();
    q.enqueue("/m/a.mp3".into());
    q.enqueue("/m/b.mp3".into());
    q.enqueue("/m/a.mp3".into());
    q.enqueue_many(vec![TrackRef::from("/m/c.ogg"), TrackRef::from("/m/d.wav")]);

    assert_eq!(
        names(&q),
        vec!["/m/a.mp3", "/m/b.mp3", "/m/a.mp3", "/m/c.ogg", "/m/d.wav"]
    );
    assert_eq!(q.count(), 5);
}

#[test]
fn dequeue_front_on_empty_returns_none_and_keeps_count() {
    let mut q = QueueStore::new();
    assert_eq!(q.dequeue_front(), None);
    assert_eq!(q.count(), 0);

    q.enqueue("/m/a.mp3".into());
    assert_eq!(q.dequeue_front(), Some(TrackRef::from("/m/a.mp3")));
    assert_eq!(q.dequeue_front(), None);
    assert!(q.is_empty());
}

#[test]
fn remove_at_out_of_range_leaves_queue_unchanged() {
    let mut q = QueueStore::new();
    q.enqueue_many(["/m/a", "/m/b", "/m/c"].map(TrackRef::from));

    assert_eq!(
        q.remove_at(5),
        Err(QueueError::OutOfRange { index: 5, len: 3 })
    );
    assert_eq!(q.remove_at(3), Err(QueueError::OutOfRange { index: 3, len: 3 }));
    assert_eq!(names(&q), vec!["/m/a", "/m/b", "/m/c"]);
}

#[test]
fn remove_at_valid_index_preserves_remaining_order() {
    let mut q = QueueStore::new();
    q.enqueue_many(["/m/a", "/m/b", "/m/c", "/m/d"].map(TrackRef::from));

    assert_eq!(q.remove_at(1), Ok(TrackRef::from("/m/b")));
    assert_eq!(q.count(), 3);
    assert_eq!(names(&q), vec!["/m/a", "/m/c", "/m/d"]);

    assert_eq!(q.remove_at(2), Ok(TrackRef::from("/m/d")));
    assert_eq!(names(&q), vec!["/m/a", "/m/c"]);
}

#[test]
fn clear_is_noop_when_empty() {
    let mut q = QueueStore::new();
    assert_eq!(q.clear(), 0);
    q.enqueue("/m/a".into());
    q.enqueue("/m/b".into());
    assert_eq!(q.clear(), 2);
    assert!(q.peek_all().is_empty());
}

#[test]
fn track_name_is_file_name() {
    assert_eq!(TrackRef::from("/music/x/Song One.mp3").name(), "Song One.mp3");
    assert_eq!(TrackRef::from("/").name(), "/");
}
