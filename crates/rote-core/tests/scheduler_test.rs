//! End-to-end scheduling flow against the SQLite store.

use rote_core::{
    InMemoryProgressStore, ReviewSession, Scheduler, SchedulerConfig, SqliteProgressStore,
};
use tempfile::TempDir;

fn sqlite_scheduler(dir: &TempDir) -> Scheduler<SqliteProgressStore> {
    let store = SqliteProgressStore::new(Some(dir.path().join("progress.db"))).unwrap();
    Scheduler::new(store)
}

#[test]
fn outcome_history_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let scheduler = sqlite_scheduler(&dir);
        for quality in [5, 4, 1, 3] {
            scheduler.report_outcome("john-3-16", quality).unwrap();
        }
    }

    let scheduler = sqlite_scheduler(&dir);
    let entry = scheduler.progress("john-3-16").unwrap().unwrap();

    assert_eq!(entry.total_reviews, 4);
    assert_eq!(entry.consecutive_correct, 1);
    assert_eq!(entry.mistakes.len(), 1);
    assert_eq!(entry.mistakes[0].quality, 1);
    assert!(entry.efactor >= 1.3);
}

#[test]
fn full_session_flow_over_sqlite() {
    let dir = TempDir::new().unwrap();
    let scheduler = sqlite_scheduler(&dir);

    for key in ["verse-a", "verse-b", "verse-c"] {
        scheduler.initialize(key).unwrap();
    }

    let mut session = ReviewSession::new(&scheduler);
    let count = session.start().unwrap();
    assert_eq!(count, 3);

    let qualities = [5, 2, 4];
    let mut reviewed = Vec::new();
    while let Some(item) = session.next_item() {
        let quality = qualities[reviewed.len()];
        session.record_outcome(&item, quality).unwrap();
        reviewed.push(item);
    }
    session.end();

    let summary = session.summary();
    assert_eq!(summary.reviewed, reviewed);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.lapses, 1);

    let stats = scheduler.stats().unwrap();
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.total_reviews, 3);
}

#[test]
fn new_items_are_immediately_due_and_ranked() {
    let dir = TempDir::new().unwrap();
    let scheduler = sqlite_scheduler(&dir);

    for i in 0..25 {
        scheduler.initialize(&format!("verse-{i:02}")).unwrap();
    }

    // Default bound caps the sitting at 20 of the 25 eligible items
    let queue = scheduler.due_queue(None).unwrap();
    assert_eq!(queue.len(), 20);

    let all = scheduler.due_queue(Some(25)).unwrap();
    assert_eq!(all.len(), 25);
}

#[test]
fn reviewed_item_leaves_the_queue_until_due_again() {
    let dir = TempDir::new().unwrap();
    let scheduler = sqlite_scheduler(&dir);

    scheduler.initialize("fresh").unwrap();
    scheduler.report_outcome("strong", 5).unwrap();
    scheduler.report_outcome("strong", 5).unwrap();

    // "strong" is scheduled days out with decent strength; only the fresh
    // item is due right now
    let queue = scheduler.due_queue(None).unwrap();
    assert_eq!(queue, ["fresh"]);
}

#[test]
fn export_from_sqlite_imports_into_memory_store() {
    let dir = TempDir::new().unwrap();
    let source = sqlite_scheduler(&dir);

    for quality in [5, 4] {
        source.report_outcome("verse-a", quality).unwrap();
    }
    source.report_outcome("verse-b", 1).unwrap();

    let json = source.export_json().unwrap();

    let target = Scheduler::new(InMemoryProgressStore::new());
    assert_eq!(target.import_json(&json).unwrap(), 2);

    let mut original = source.all_progress().unwrap();
    let mut restored = target.all_progress().unwrap();
    original.sort_by(|a, b| a.item_key.cmp(&b.item_key));
    restored.sort_by(|a, b| a.item_key.cmp(&b.item_key));
    assert_eq!(original, restored);
}

#[test]
fn config_round_trips_through_serde() {
    let config = SchedulerConfig {
        requeue_lapses: true,
        ..SchedulerConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: SchedulerConfig = serde_json::from_str(&json).unwrap();

    assert!(back.requeue_lapses);
    assert_eq!(back.queue.max_items, config.queue.max_items);
    assert_eq!(back.strength_gain, config.strength_gain);
}
