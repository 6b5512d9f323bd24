use quip_plugins::db::open_db_in_memory;
use quip_plugins::{
    ActivityFlags, ActivityNotifier, NoticeOptions, NoticeStore, ObjectType, Profile, Source,
    SqliteNoticeStore, SqliteProfileDirectory, StoreError, Verb,
};
use rusqlite::Connection;

fn seed_profile(conn: &Connection, nickname: &str, with_account: bool) -> Profile {
    let directory = SqliteProfileDirectory::new(conn);
    let account_id = with_account.then_some(1000);
    directory
        .create_profile(
            nickname,
            None,
            &format!("http://example.com/{nickname}"),
            &format!("http://example.com/user/{nickname}"),
            account_id,
        )
        .unwrap()
}

fn notice_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM notices;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn follow_started_persists_activity_notice() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_profile(&conn, "alice", true);
    let bob = seed_profile(&conn, "bob", true);

    let notifier = ActivityNotifier::new(ActivityFlags::default(), SqliteNoticeStore::new(&conn));
    let emitted = notifier
        .follow_started(&alice, &bob, "tag:sub:alice:bob")
        .unwrap()
        .expect("follow should emit a notice");

    assert_eq!(emitted.profile_id, alice.id);
    assert_eq!(emitted.verb, Verb::Follow);
    assert_eq!(emitted.object_type, Some(ObjectType::Person));
    assert_eq!(emitted.source, Source::Activity);
    assert_eq!(emitted.uri, "tag:sub:alice:bob");

    let store = SqliteNoticeStore::new(&conn);
    let read_back = store.get_notice(emitted.id).unwrap().unwrap();
    assert_eq!(read_back, emitted);
}

#[test]
fn disabled_flag_persists_nothing_and_returns_success() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_profile(&conn, "alice", true);
    let bob = seed_profile(&conn, "bob", true);

    let flags = ActivityFlags {
        start_follow_user: false,
        ..ActivityFlags::default()
    };
    let notifier = ActivityNotifier::new(flags, SqliteNoticeStore::new(&conn));
    let emitted = notifier
        .follow_started(&alice, &bob, "tag:sub:alice:bob")
        .unwrap();

    assert!(emitted.is_none());
    assert_eq!(notice_count(&conn), 0);
}

#[test]
fn unfavorite_of_image_post_keeps_image_object_type() {
    let conn = open_db_in_memory().unwrap();
    let carol = seed_profile(&conn, "carol", true);
    let bob = seed_profile(&conn, "bob", true);

    let store = SqliteNoticeStore::new(&conn);
    let target = store
        .save_new(
            bob.id,
            "look at this photo",
            Source::Web,
            NoticeOptions {
                object_type: Some(ObjectType::Image),
                urls: vec!["http://example.com/photo/9".to_string()],
                ..NoticeOptions::default()
            },
        )
        .unwrap();
    assert_eq!(target.verb, Verb::Post);

    let notifier = ActivityNotifier::new(ActivityFlags::default(), SqliteNoticeStore::new(&conn));
    let emitted = notifier
        .favorite_removed(&carol, &target, &bob)
        .unwrap()
        .expect("unfavorite should emit a notice");

    assert_eq!(emitted.verb, Verb::Unfavorite);
    assert_eq!(emitted.object_type, Some(ObjectType::Image));
    assert!(emitted
        .uri
        .starts_with(&format!("unlike:{}:{}:", carol.id, target.id)));
}

#[test]
fn store_rejects_duplicate_notice_uris() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_profile(&conn, "alice", true);

    let store = SqliteNoticeStore::new(&conn);
    let options = || NoticeOptions {
        uri: Some("tag:dup:1".to_string()),
        ..NoticeOptions::default()
    };

    store
        .save_new(alice.id, "first", Source::Web, options())
        .unwrap();
    let err = store
        .save_new(alice.id, "second", Source::Web, options())
        .unwrap_err();

    assert!(matches!(err, StoreError::DuplicateUri(_)));
    assert_eq!(notice_count(&conn), 1);
}

#[test]
fn store_mints_fallback_uri_and_post_verb() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_profile(&conn, "alice", true);

    let store = SqliteNoticeStore::new(&conn);
    let saved = store
        .save_new(alice.id, "plain update", Source::Web, NoticeOptions::default())
        .unwrap();

    assert_eq!(saved.verb, Verb::Post);
    assert!(saved.uri.starts_with("urn:uuid:"));
    assert_eq!(saved.rendered, "plain update");
}
