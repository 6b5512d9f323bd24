use quip_plugins::db::open_db_in_memory;
use quip_plugins::{
    BookmarkComposer, BookmarkError, BookmarkRecord, IdentityShortener, Notice, NoticeId,
    NoticeOptions, NoticeStore, Profile, Source, SqliteNoticeStore, SqliteProfileDirectory,
    StoreError, StoreResult, TagInput,
};
use rusqlite::Connection;

const TAG_BASE: &str = "http://example.com/tag";

fn seed_profile(conn: &Connection, nickname: &str, with_account: bool) -> Profile {
    let directory = SqliteProfileDirectory::new(conn);
    directory
        .create_profile(
            nickname,
            None,
            &format!("http://example.com/{nickname}"),
            &format!("http://example.com/user/{nickname}"),
            with_account.then_some(2000),
        )
        .unwrap()
}

fn composer(
    conn: &Connection,
) -> BookmarkComposer<SqliteNoticeStore<'_>, SqliteProfileDirectory<'_>, IdentityShortener> {
    BookmarkComposer::new(
        SqliteNoticeStore::new(conn),
        SqliteProfileDirectory::new(conn),
        IdentityShortener,
        TAG_BASE,
    )
}

#[test]
fn compose_saves_notice_and_bookmark_with_tags_and_mention() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);
    let bob = seed_profile(&conn, "bob", true);

    let saved = composer(&conn)
        .compose(
            &user,
            "Cool site",
            "http://x.io",
            TagInput::from("design,for:bob"),
            "nice",
            NoticeOptions::default(),
        )
        .unwrap();

    assert_eq!(saved.content, "\"Cool site\" http://x.io nice #design");
    assert_eq!(saved.source, Source::Web);
    assert_eq!(saved.tags, vec!["design"]);
    assert_eq!(saved.urls, vec!["http://x.io"]);
    assert_eq!(saved.reply_uris, vec![bob.uri]);
    assert!(saved.rendered.contains("class=\"taggedlink\""));
    assert!(saved
        .rendered
        .contains(&format!("href=\"{TAG_BASE}/design\"")));

    let store = SqliteNoticeStore::new(&conn);
    let record = store.get_bookmark(saved.id).unwrap().unwrap();
    assert_eq!(record.title, "Cool site");
    assert_eq!(record.description, "nice");

    // Referential invariant: the record's notice id resolves to a notice.
    let owner = store.get_notice(record.notice_id).unwrap();
    assert_eq!(owner, Some(saved));
}

#[test]
fn compose_with_empty_tags_still_saves_cleanly() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);

    let saved = composer(&conn)
        .compose(
            &user,
            "Cool site",
            "http://x.io",
            TagInput::from(""),
            "",
            NoticeOptions::default(),
        )
        .unwrap();

    assert_eq!(saved.content, "\"Cool site\" http://x.io");
    assert!(saved.tags.is_empty());
    assert!(saved.reply_uris.is_empty());
    assert!(SqliteNoticeStore::new(&conn)
        .get_bookmark(saved.id)
        .unwrap()
        .is_some());
}

#[test]
fn unresolved_and_empty_mentions_are_silently_dropped() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);

    let saved = composer(&conn)
        .compose(
            &user,
            "Links",
            "http://x.io",
            TagInput::from("for:nobody for: reading"),
            "",
            NoticeOptions::default(),
        )
        .unwrap();

    assert_eq!(saved.tags, vec!["reading"]);
    assert!(saved.reply_uris.is_empty());
}

#[test]
fn scope_option_passes_through_to_the_saved_notice() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);

    let saved = composer(&conn)
        .compose(
            &user,
            "Private find",
            "http://x.io/private",
            TagInput::from(""),
            "",
            NoticeOptions {
                scope: Some(1),
                ..NoticeOptions::default()
            },
        )
        .unwrap();

    assert_eq!(saved.scope, Some(1));
}

#[test]
fn user_without_account_cannot_compose() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "ghost", false);

    let err = composer(&conn)
        .compose(
            &user,
            "Cool site",
            "http://x.io",
            TagInput::from(""),
            "",
            NoticeOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BookmarkError::MissingAccount(_)));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM notices;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn failed_notice_save_writes_no_bookmark_record() {
    struct FailingStore;

    impl NoticeStore for FailingStore {
        fn save_new(
            &self,
            _author: i64,
            _content: &str,
            _source: Source,
            _options: NoticeOptions,
        ) -> StoreResult<Notice> {
            Err(StoreError::InvalidData("store unavailable".to_string()))
        }

        fn save_bookmark(&self, _record: &BookmarkRecord) -> StoreResult<()> {
            panic!("bookmark must not be written when notice save fails");
        }

        fn get_notice(&self, _id: NoticeId) -> StoreResult<Option<Notice>> {
            Ok(None)
        }

        fn get_bookmark(&self, _notice_id: NoticeId) -> StoreResult<Option<BookmarkRecord>> {
            Ok(None)
        }
    }

    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);

    let composer = BookmarkComposer::new(
        FailingStore,
        SqliteProfileDirectory::new(&conn),
        IdentityShortener,
        TAG_BASE,
    );
    let err = composer
        .compose(
            &user,
            "Cool site",
            "http://x.io",
            TagInput::from("design"),
            "nice",
            NoticeOptions::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BookmarkError::Store(_)));
}

#[test]
fn deleting_the_notice_cascades_to_its_bookmark() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_profile(&conn, "u42", true);

    let saved = composer(&conn)
        .compose(
            &user,
            "Cool site",
            "http://x.io",
            TagInput::from(""),
            "",
            NoticeOptions::default(),
        )
        .unwrap();

    conn.execute("DELETE FROM notices WHERE id = ?1;", [saved.id])
        .unwrap();
    assert!(SqliteNoticeStore::new(&conn)
        .get_bookmark(saved.id)
        .unwrap()
        .is_none());
}
