//! Bookmark composer service.
//!
//! # Responsibility
//! - Turn a tagged URL submission into a notice plus bookmark record.
//! - Partition raw tag input into canonical hashtags and `for:` mentions.
//!
//! # Invariants
//! - The notice is saved before its bookmark record; a failed save writes
//!   no record.
//! - Unresolved mention nicknames are silently dropped, never an error.
//! - Title and description are stored verbatim on the bookmark record.

use crate::model::bookmark::BookmarkRecord;
use crate::model::notice::{Notice, NoticeOptions, Source};
use crate::model::profile::{Profile, ProfileId};
use crate::repo::notice_store::{NoticeStore, StoreError, StoreResult};
use crate::repo::profile_directory::ProfileDirectory;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static RAW_TAG_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("valid tag split regex"));

/// Service error for bookmark composition.
#[derive(Debug)]
pub enum BookmarkError {
    /// The posting user has no registered account.
    MissingAccount(ProfileId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for BookmarkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAccount(profile_id) => {
                write!(f, "profile {profile_id} has no registered account")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookmarkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::MissingAccount(_) => None,
        }
    }
}

impl From<StoreError> for BookmarkError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Raw tag input: one joined string or a pre-split token list.
#[derive(Debug, Clone)]
pub enum TagInput {
    /// Single string, split on whitespace and commas.
    Raw(String),
    /// Already-split tokens, used as-is.
    List(Vec<String>),
}

impl TagInput {
    /// Returns the non-empty tokens of this input.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Raw(value) => RAW_TAG_SPLIT_RE
                .split(value)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
            Self::List(values) => values
                .iter()
                .filter(|token| !token.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

impl From<&str> for TagInput {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<Vec<String>> for TagInput {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// URL shortening contract, delegated to the host.
pub trait UrlShortener {
    fn shorten(&self, url: &str, user: &Profile) -> String;
}

/// Pass-through shortener for hosts without a shortening service.
pub struct IdentityShortener;

impl UrlShortener for IdentityShortener {
    fn shorten(&self, url: &str, _user: &Profile) -> String {
        url.to_string()
    }
}

/// Canonicalizes one raw hashtag token.
///
/// Trims whitespace, strips a leading `#`, and case-folds. Returns `None`
/// for tokens that normalize to nothing. Hosts with stricter tag rules
/// normalize again before indexing.
pub fn canonicalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('#');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn strip_for_prefix(token: &str) -> Option<&str> {
    token
        .get(..4)
        .filter(|prefix| prefix.eq_ignore_ascii_case("for:"))
        .map(|_| &token[4..])
}

/// Composes bookmark notices with tag/mention extraction.
pub struct BookmarkComposer<S: NoticeStore, D: ProfileDirectory, U: UrlShortener> {
    store: S,
    directory: D,
    shortener: U,
    /// Base URL for per-tag listing pages, without trailing slash.
    tag_base_url: String,
}

impl<S: NoticeStore, D: ProfileDirectory, U: UrlShortener> BookmarkComposer<S, D, U> {
    /// Creates a composer over the given ports.
    pub fn new(store: S, directory: D, shortener: U, tag_base_url: impl Into<String>) -> Self {
        Self {
            store,
            directory,
            shortener,
            tag_base_url: tag_base_url.into(),
        }
    }

    /// Saves a bookmark notice plus its bookmark record.
    ///
    /// `options` passes host-defined extras (visibility scope, say) through
    /// to notice creation; its urls/rendered/tags/replies fields are
    /// overwritten with the composed values.
    pub fn compose(
        &self,
        user: &Profile,
        title: &str,
        url: &str,
        raw_tags: TagInput,
        description: &str,
        options: NoticeOptions,
    ) -> Result<Notice, BookmarkError> {
        if !user.has_account() {
            return Err(BookmarkError::MissingAccount(user.id));
        }

        let (tags, reply_uris) = self.partition_tags(user, &raw_tags)?;
        let short_url = self.shortener.shorten(url, user);

        let mut parts = vec![format!("\"{title}\""), short_url];
        if !description.is_empty() {
            parts.push(description.to_string());
        }
        parts.extend(tags.iter().map(|tag| format!("#{tag}")));
        let content = parts.join(" ");

        let tag_links = tags
            .iter()
            .map(|tag| {
                format!(
                    "<a href=\"{}\" rel=\"{}\" class=\"tag\">{}</a>",
                    attr(&self.tag_listing_url(tag)),
                    attr(tag),
                    text(tag),
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        let rendered = format!(
            "<span class=\"xfolkentry\">\
             <a class=\"taggedlink\" href=\"{}\">{}</a> \
             <span class=\"description\">{}</span> \
             <span class=\"meta\">{}</span>\
             </span>",
            attr(url),
            text(title),
            text(description),
            tag_links,
        );

        let merged = NoticeOptions {
            urls: vec![url.to_string()],
            rendered: Some(rendered),
            tags: tags.clone(),
            reply_uris,
            ..options
        };

        let saved = self.store.save_new(user.id, &content, Source::Web, merged)?;
        self.store.save_bookmark(&BookmarkRecord {
            notice_id: saved.id,
            title: title.to_string(),
            description: description.to_string(),
        })?;

        info!(
            "event=bookmark_saved module=service status=ok notice_id={} tags={}",
            saved.id,
            tags.len()
        );
        Ok(saved)
    }

    /// Splits raw tokens into canonical hashtags and resolved mention URIs.
    fn partition_tags(
        &self,
        user: &Profile,
        raw_tags: &TagInput,
    ) -> StoreResult<(Vec<String>, Vec<String>)> {
        let mut tags = Vec::new();
        let mut reply_uris = Vec::new();

        for token in raw_tags.tokens() {
            if let Some(nickname) = strip_for_prefix(&token) {
                if let Some(other) = self.directory.resolve_relative(user, nickname)? {
                    reply_uris.push(other.uri);
                }
            } else if let Some(tag) = canonicalize_tag(&token) {
                tags.push(tag);
            }
        }

        Ok((tags, reply_uris))
    }

    fn tag_listing_url(&self, tag: &str) -> String {
        format!("{}/{tag}", self.tag_base_url)
    }
}
