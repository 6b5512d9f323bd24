//! Activity notifier service.
//!
//! # Responsibility
//! - Convert social-graph events into human-readable activity notices.
//! - Gate each event kind behind its configuration flag.
//!
//! # Invariants
//! - A disabled flag or an unmet precondition is a silent no-op (`Ok(None)`);
//!   the relationship change that triggered the event always succeeds.
//! - Every emitted notice carries both a verb and an object type.
//! - Only store failures propagate; this service raises no errors of its own.

use crate::dispatch::EventHandler;
use crate::model::event::ActivityEvent;
use crate::model::notice::{Notice, NoticeOptions, ObjectType, Source, Verb};
use crate::model::profile::{Group, Profile};
use crate::repo::notice_store::{NoticeStore, StoreResult};
use crate::uri;
use chrono::Utc;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use log::info;

/// Per-event-kind switches for activity notice emission.
///
/// Immutable once the notifier is constructed; defaults to all-enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityFlags {
    pub start_follow_user: bool,
    pub stop_follow_user: bool,
    pub start_like: bool,
    pub stop_like: bool,
    pub join_group: bool,
    pub leave_group: bool,
}

impl Default for ActivityFlags {
    fn default() -> Self {
        Self {
            start_follow_user: true,
            stop_follow_user: true,
            start_like: true,
            stop_like: true,
            join_group: true,
            leave_group: true,
        }
    }
}

/// Emits activity notices for social-graph events.
pub struct ActivityNotifier<S: NoticeStore> {
    flags: ActivityFlags,
    store: S,
}

impl<S: NoticeStore> ActivityNotifier<S> {
    /// Creates a notifier with the given flag configuration and store.
    pub fn new(flags: ActivityFlags, store: S) -> Self {
        Self { flags, store }
    }

    /// Returns the immutable flag configuration.
    pub fn flags(&self) -> &ActivityFlags {
        &self.flags
    }

    /// Emits a notice for a started subscription.
    ///
    /// The subscription relationship still exists, so its URI identifies the
    /// activity.
    pub fn follow_started(
        &self,
        follower: &Profile,
        followed: &Profile,
        subscription_uri: &str,
    ) -> StoreResult<Option<Notice>> {
        if !self.flags.start_follow_user || !follower.has_account() {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> started following <a href=\"{}\">{}</a></em>.",
            attr(&follower.profile_url),
            text(follower.best_name()),
            attr(&followed.profile_url),
            text(followed.best_name()),
        );
        let content = format!(
            "{} ({}) started following {} ({}).",
            follower.best_name(),
            follower.profile_url,
            followed.best_name(),
            followed.profile_url,
        );

        self.emit(
            follower,
            content,
            rendered,
            Verb::Follow,
            ObjectType::Person,
            subscription_uri.to_string(),
        )
    }

    /// Emits a notice for an ended subscription.
    ///
    /// No relationship row survives the unfollow, so a fresh URI is minted.
    pub fn follow_stopped(
        &self,
        follower: &Profile,
        followed: &Profile,
    ) -> StoreResult<Option<Notice>> {
        if !self.flags.stop_follow_user || !follower.has_account() {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> stopped following <a href=\"{}\">{}</a></em>.",
            attr(&follower.profile_url),
            text(follower.best_name()),
            attr(&followed.profile_url),
            text(followed.best_name()),
        );
        let content = format!(
            "{} ({}) stopped following {} ({}).",
            follower.best_name(),
            follower.profile_url,
            followed.best_name(),
            followed.profile_url,
        );

        let minted = uri::mint("stop-following", follower.id, followed.id, Utc::now());
        self.emit(
            follower,
            content,
            rendered,
            Verb::Unfollow,
            ObjectType::Person,
            minted,
        )
    }

    /// Emits a notice for a newly favorited notice.
    pub fn favorite_added(
        &self,
        actor: &Profile,
        notice: &Notice,
        author: &Profile,
        favorite_uri: &str,
    ) -> StoreResult<Option<Notice>> {
        if !self.flags.start_like || !actor.has_account() {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> liked <a href=\"{}\">{}'s update</a></em>.",
            attr(&actor.profile_url),
            text(actor.best_name()),
            attr(notice.best_url()),
            text(author.best_name()),
        );
        let content = format!(
            "{} ({}) liked {}'s status ({})",
            actor.best_name(),
            actor.profile_url,
            author.best_name(),
            notice.best_url(),
        );

        self.emit(
            actor,
            content,
            rendered,
            Verb::Favor,
            liked_object_type(notice),
            favorite_uri.to_string(),
        )
    }

    /// Emits a notice for a removed favorite.
    pub fn favorite_removed(
        &self,
        actor: &Profile,
        notice: &Notice,
        author: &Profile,
    ) -> StoreResult<Option<Notice>> {
        if !self.flags.stop_like || !actor.has_account() {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> stopped liking <a href=\"{}\">{}'s update</a></em>.",
            attr(&actor.profile_url),
            text(actor.best_name()),
            attr(notice.best_url()),
            text(author.best_name()),
        );
        let content = format!(
            "{} ({}) stopped liking {}'s status ({})",
            actor.best_name(),
            actor.profile_url,
            author.best_name(),
            notice.best_url(),
        );

        let minted = uri::mint("unlike", actor.id, notice.id, Utc::now());
        self.emit(
            actor,
            content,
            rendered,
            Verb::Unfavorite,
            liked_object_type(notice),
            minted,
        )
    }

    /// Emits a notice for a joined group. No account precondition applies.
    pub fn group_joined(
        &self,
        member: &Profile,
        group: &Group,
        membership_uri: &str,
    ) -> StoreResult<Option<Notice>> {
        if !self.flags.join_group {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> joined the group &quot;<a href=\"{}\">{}</a>&quot;</em>.",
            attr(&member.profile_url),
            text(member.best_name()),
            attr(&group.home_url),
            text(group.best_name()),
        );
        let content = format!(
            "{} ({}) joined the group {} ({}).",
            member.best_name(),
            member.profile_url,
            group.best_name(),
            group.home_url,
        );

        self.emit(
            member,
            content,
            rendered,
            Verb::Join,
            ObjectType::Group,
            membership_uri.to_string(),
        )
    }

    /// Emits a notice for a left group. No account precondition applies.
    pub fn group_left(&self, member: &Profile, group: &Group) -> StoreResult<Option<Notice>> {
        if !self.flags.leave_group {
            return Ok(None);
        }

        let rendered = format!(
            "<em><a href=\"{}\">{}</a> left the group &quot;<a href=\"{}\">{}</a>&quot;</em>.",
            attr(&member.profile_url),
            text(member.best_name()),
            attr(&group.home_url),
            text(group.best_name()),
        );
        let content = format!(
            "{} ({}) left the group {} ({})",
            member.best_name(),
            member.profile_url,
            group.best_name(),
            group.home_url,
        );

        let minted = uri::mint("leave", member.id, group.id, Utc::now());
        self.emit(
            member,
            content,
            rendered,
            Verb::Leave,
            ObjectType::Group,
            minted,
        )
    }

    fn emit(
        &self,
        actor: &Profile,
        content: String,
        rendered: String,
        verb: Verb,
        object_type: ObjectType,
        uri: String,
    ) -> StoreResult<Option<Notice>> {
        let saved = self.store.save_new(
            actor.id,
            &content,
            Source::Activity,
            NoticeOptions {
                rendered: Some(rendered),
                verb: Some(verb),
                object_type: Some(object_type),
                uri: Some(uri),
                ..NoticeOptions::default()
            },
        )?;

        info!(
            "event=activity_notice module=service status=ok verb={} notice_id={}",
            verb.as_db(),
            saved.id
        );
        Ok(Some(saved))
    }
}

impl<S: NoticeStore> EventHandler for ActivityNotifier<S> {
    fn handle(&self, event: &ActivityEvent) -> StoreResult<Option<Notice>> {
        match event {
            ActivityEvent::FollowStarted {
                follower,
                followed,
                subscription_uri,
            } => self.follow_started(follower, followed, subscription_uri),
            ActivityEvent::FollowStopped { follower, followed } => {
                self.follow_stopped(follower, followed)
            }
            ActivityEvent::FavoriteAdded {
                actor,
                notice,
                author,
                favorite_uri,
            } => self.favorite_added(actor, notice, author, favorite_uri),
            ActivityEvent::FavoriteRemoved {
                actor,
                notice,
                author,
            } => self.favorite_removed(actor, notice, author),
            ActivityEvent::GroupJoined {
                member,
                group,
                membership_uri,
            } => self.group_joined(member, group, membership_uri),
            ActivityEvent::GroupLeft { member, group } => self.group_left(member, group),
        }
    }
}

/// Object type for favorite/unfavorite notices.
///
/// A favorited plain post keeps its own object type; anything else (an
/// activity notice, say) is reported as `Activity`.
fn liked_object_type(notice: &Notice) -> ObjectType {
    if notice.verb == Verb::Post {
        notice.object_type.unwrap_or(ObjectType::Activity)
    } else {
        ObjectType::Activity
    }
}
