use std::sync::Arc;
use std::task::Poll;

use bytes::Bytes;
use futures::StreamExt;
use wayfare_catalog::Catalog;
use wayfare_store::{BlobStore, DocumentStore, Snapshot, Subscription};
use wayfare_types::{
    COMMENTS, Comment, Country, CountryId, Document, DocumentId, Filter, MEDIA, MediaItem,
    NewComment, NewMedia, PendingMedia, is_blank, media_blob_path,
};

use crate::{Error, Result};

/// Remote collaborators a view-model talks to.
#[derive(Clone)]
pub struct Services {
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Comments,
    Media,
}

impl Feed {
    pub fn collection(self) -> &'static str {
        match self {
            Feed::Comments => COMMENTS,
            Feed::Media => MEDIA,
        }
    }
}

/// Health of one live query as last observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// No query open (loading or unknown country)
    Idle,
    /// Query open, first snapshot not delivered yet
    Connecting,
    Live,
    /// Last delivery was an error; the previous snapshot is still shown
    Failed(String),
}

/// What `next_change` applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    Snapshot(Feed),
    Error(Feed, String),
    Closed(Feed),
}

/// Which page the detail view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    /// Route parameter not resolved yet
    Loading,
    NotFound(&'a CountryId),
    Ready(&'a CountryId, &'a Country),
}

/// Live view-model for one country page.
///
/// Owns the comments and media live queries for the selected country. Lists
/// are replaced wholesale by each snapshot, in the order delivered. Switching
/// country drops both queries before new ones are opened, so nothing queued
/// for the old country can reach the new page.
pub struct DetailViewModel {
    catalog: Arc<Catalog>,
    services: Services,
    country_id: Option<CountryId>,
    country: Option<Country>,
    draft: String,
    pending_media: Option<PendingMedia>,
    comments: Vec<Comment>,
    media: Vec<MediaItem>,
    comments_feed: Option<Subscription>,
    media_feed: Option<Subscription>,
    comments_status: FeedStatus,
    media_status: FeedStatus,
    last_error: Option<String>,
}

impl DetailViewModel {
    /// View-model with no route parameter yet (loading page).
    pub fn new(catalog: Arc<Catalog>, services: Services) -> Self {
        Self {
            catalog,
            services,
            country_id: None,
            country: None,
            draft: String::new(),
            pending_media: None,
            comments: Vec::new(),
            media: Vec::new(),
            comments_feed: None,
            media_feed: None,
            comments_status: FeedStatus::Idle,
            media_status: FeedStatus::Idle,
            last_error: None,
        }
    }

    pub fn open(catalog: Arc<Catalog>, services: Services, id: CountryId) -> Result<Self> {
        let mut vm = Self::new(catalog, services);
        vm.navigate(Some(id))?;
        Ok(vm)
    }

    /// Follows the route parameter. `None` means it is not resolved yet.
    ///
    /// Re-navigating to the current id keeps the open queries.
    pub fn navigate(&mut self, id: Option<CountryId>) -> Result<()> {
        if id == self.country_id {
            return Ok(());
        }

        self.teardown();

        let Some(id) = id else {
            return Ok(());
        };

        self.country = self.catalog.lookup(&id).cloned();
        self.country_id = Some(id.clone());

        if self.country.is_none() {
            tracing::debug!(country = %id, "country not in catalog");
            return Ok(());
        }

        let filter = Filter::by_country(&id);
        let comments = self.subscribe(Feed::Comments, filter.clone());
        let media = self.subscribe(Feed::Media, filter);
        comments.and(media)
    }

    fn subscribe(&mut self, feed: Feed, filter: Filter) -> Result<()> {
        match self.services.documents.subscribe(feed.collection(), filter) {
            Ok(sub) => {
                *self.slot(feed) = Some(sub);
                *self.status_mut(feed) = FeedStatus::Connecting;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(collection = feed.collection(), error = %err, "subscribe failed");
                *self.status_mut(feed) = FeedStatus::Failed(err.to_string());
                self.last_error = Some(format!("Live {} unavailable: {}", feed.collection(), err));
                Err(err.into())
            }
        }
    }

    /// Drops both live queries and everything tied to the current country.
    pub fn teardown(&mut self) {
        // Queries go first: nothing may be applied after this point.
        self.comments_feed = None;
        self.media_feed = None;

        self.country_id = None;
        self.country = None;
        self.comments.clear();
        self.media.clear();
        self.draft.clear();
        self.pending_media = None;
        self.comments_status = FeedStatus::Idle;
        self.media_status = FeedStatus::Idle;
        self.last_error = None;
    }

    fn slot(&mut self, feed: Feed) -> &mut Option<Subscription> {
        match feed {
            Feed::Comments => &mut self.comments_feed,
            Feed::Media => &mut self.media_feed,
        }
    }

    fn status_mut(&mut self, feed: Feed) -> &mut FeedStatus {
        match feed {
            Feed::Comments => &mut self.comments_status,
            Feed::Media => &mut self.media_status,
        }
    }

    // --------------------------------------------------------
    // Applying snapshots
    // --------------------------------------------------------

    /// Waits for the next delivery on either live query and applies it.
    ///
    /// Returns `None` right away when no query is open.
    pub async fn next_change(&mut self) -> Option<FeedUpdate> {
        let (feed, item) = match (&mut self.comments_feed, &mut self.media_feed) {
            (None, None) => return None,
            (Some(comments), None) => (Feed::Comments, comments.next().await),
            (None, Some(media)) => (Feed::Media, media.next().await),
            (Some(comments), Some(media)) => tokio::select! {
                item = comments.next() => (Feed::Comments, item),
                item = media.next() => (Feed::Media, item),
            },
        };
        Some(self.apply(feed, item))
    }

    /// Applies every delivery already queued, without waiting.
    pub fn drain(&mut self) -> Vec<FeedUpdate> {
        let mut updates = Vec::new();
        for feed in [Feed::Comments, Feed::Media] {
            while let Some(sub) = self.slot(feed).as_mut() {
                match sub.try_poll_next() {
                    Poll::Ready(item) => updates.push(self.apply(feed, item)),
                    Poll::Pending => break,
                }
            }
        }
        updates
    }

    fn apply(&mut self, feed: Feed, item: Option<wayfare_store::Result<Snapshot>>) -> FeedUpdate {
        match item {
            Some(Ok(snapshot)) => {
                match feed {
                    Feed::Comments => self.comments = self.decode(&snapshot),
                    Feed::Media => self.media = self.decode(&snapshot),
                }
                *self.status_mut(feed) = FeedStatus::Live;
                FeedUpdate::Snapshot(feed)
            }
            Some(Err(err)) => {
                tracing::warn!(collection = feed.collection(), error = %err, "live query error, keeping last snapshot");
                let reason = err.to_string();
                *self.status_mut(feed) = FeedStatus::Failed(reason.clone());
                FeedUpdate::Error(feed, reason)
            }
            None => {
                tracing::warn!(collection = feed.collection(), "live query closed by store");
                *self.slot(feed) = None;
                *self.status_mut(feed) = FeedStatus::Failed("feed closed".to_string());
                FeedUpdate::Closed(feed)
            }
        }
    }

    /// Decodes a snapshot, keeping only well-formed records of the current country.
    fn decode<T>(&self, snapshot: &[Document]) -> Vec<T>
    where
        T: for<'a> TryFrom<&'a Document, Error = wayfare_types::Error> + HasCountry,
    {
        snapshot
            .iter()
            .filter_map(|doc| match T::try_from(doc) {
                Ok(record) if Some(record.country_id()) == self.country_id.as_ref() => {
                    Some(record)
                }
                Ok(_) => {
                    tracing::debug!(id = %doc.id, "dropping record for another country");
                    None
                }
                Err(err) => {
                    tracing::warn!(id = %doc.id, error = %err, "skipping malformed document");
                    None
                }
            })
            .collect()
    }

    // --------------------------------------------------------
    // Intents
    // --------------------------------------------------------

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn select_media(&mut self, media: Option<PendingMedia>) {
        self.pending_media = media;
    }

    /// Posts the draft as a comment.
    ///
    /// Blank drafts do nothing and return `Ok(None)`. Otherwise the draft is
    /// cleared once the store answers, whatever the answer. The new comment
    /// shows up with the next comments snapshot.
    pub async fn add_comment(&mut self) -> Result<Option<DocumentId>> {
        if is_blank(&self.draft) {
            return Ok(None);
        }
        let country_id = match self.require_country("add a comment") {
            Ok(id) => id,
            Err(err) => return self.settle("Posting comment", Err(err)),
        };

        let record = NewComment {
            country_id,
            text: self.draft.clone(),
        };
        let result = self
            .services
            .documents
            .create(COMMENTS, record.into_fields())
            .await
            .map_err(Error::from);
        self.draft.clear();

        self.settle("Posting comment", result).map(Some)
    }

    pub async fn delete_comment(&mut self, id: &DocumentId) -> Result<()> {
        let result = self
            .services
            .documents
            .delete(COMMENTS, id)
            .await
            .map_err(Error::from);
        self.settle("Deleting comment", result)
    }

    /// Uploads the selected file and records it in the media collection.
    ///
    /// Steps: store the blob at `media/{country}/{file name}`, resolve its URL,
    /// create the metadata document. A failed step stops the sequence; a blob
    /// stored before the failure stays where it is. The selection is cleared
    /// whatever the outcome. No selection means nothing to do: `Ok(None)`.
    pub async fn upload_media(&mut self) -> Result<Option<DocumentId>> {
        let Some(pending) = self.pending_media.take() else {
            return Ok(None);
        };
        let result = match self.require_country("upload media") {
            Ok(country_id) => upload(&self.services, &country_id, pending).await,
            Err(err) => Err(err),
        };
        self.settle("Uploading media", result).map(Some)
    }

    /// Removes the media record only. The stored blob is left in place.
    pub async fn delete_media(&mut self, id: &DocumentId) -> Result<()> {
        let result = self
            .services
            .documents
            .delete(MEDIA, id)
            .await
            .map_err(Error::from);
        self.settle("Deleting media", result)
    }

    fn require_country(&self, action: &str) -> Result<CountryId> {
        match (&self.country_id, &self.country) {
            (Some(id), Some(_)) => Ok(id.clone()),
            (Some(id), None) => Err(Error::NoCountry(format!(
                "cannot {}: '{}' is not in the catalog",
                action, id
            ))),
            (None, _) => Err(Error::NoCountry(format!("cannot {} yet", action))),
        }
    }

    fn settle<T>(&mut self, action: &str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                tracing::warn!(action, error = %err, "intent failed");
                self.last_error = Some(format!("{} failed: {}", action, err));
            }
        }
        result
    }

    /// Surfaces a failure that happened outside the view-model, such as a
    /// file that could not be read for upload.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(error = %message, "recorded page error");
        self.last_error = Some(message);
    }

    // --------------------------------------------------------
    // Read access for views
    // --------------------------------------------------------

    pub fn page(&self) -> Page<'_> {
        match (&self.country_id, &self.country) {
            (None, _) => Page::Loading,
            (Some(id), None) => Page::NotFound(id),
            (Some(id), Some(country)) => Page::Ready(id, country),
        }
    }

    pub fn country_id(&self) -> Option<&CountryId> {
        self.country_id.as_ref()
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn pending_media(&self) -> Option<&PendingMedia> {
        self.pending_media.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn feed_status(&self, feed: Feed) -> &FeedStatus {
        match feed {
            Feed::Comments => &self.comments_status,
            Feed::Media => &self.media_status,
        }
    }

    /// True once both live queries delivered at least once (or failed).
    pub fn is_settled(&self) -> bool {
        [Feed::Comments, Feed::Media]
            .iter()
            .all(|&f| !matches!(self.feed_status(f), FeedStatus::Connecting))
    }

    pub fn is_live(&self) -> bool {
        self.comments_feed.is_some() || self.media_feed.is_some()
    }
}

async fn upload(services: &Services, country: &CountryId, pending: PendingMedia) -> Result<DocumentId> {
    let path = media_blob_path(country, &pending.name).ok_or_else(|| {
        Error::InvalidInput(format!("'{}' is not a usable file name", pending.name))
    })?;
    let handle = services
        .blobs
        .store(&path, Bytes::from(pending.bytes))
        .await?;
    let url = services.blobs.resolve_url(&handle).await.inspect_err(|err| {
        tracing::warn!(path = %path, error = %err, "blob stored but URL not resolved; blob left orphaned");
    })?;

    let record = NewMedia {
        country_id: country.clone(),
        url,
    };
    let id = services
        .documents
        .create(MEDIA, record.into_fields())
        .await
        .inspect_err(|err| {
            tracing::warn!(path = %path, error = %err, "media record not created; blob left orphaned");
        })?;

    tracing::info!(country = %country, path = %path, id = %id, "media uploaded");
    Ok(id)
}

/// Records that belong to one country.
pub trait HasCountry {
    fn country_id(&self) -> &CountryId;
}

impl HasCountry for Comment {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

impl HasCountry for MediaItem {
    fn country_id(&self) -> &CountryId {
        &self.country_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_store::{MemoryBlobStore, MemoryDocumentStore};

    fn setup() -> (MemoryDocumentStore, MemoryBlobStore, Services, Arc<Catalog>) {
        let documents = MemoryDocumentStore::new();
        let blobs = MemoryBlobStore::new();
        let services = Services {
            documents: Arc::new(documents.clone()),
            blobs: Arc::new(blobs.clone()),
        };
        (documents, blobs, services, Arc::new(Catalog::embedded().unwrap()))
    }

    #[test]
    fn test_new_is_loading_without_queries() {
        let (documents, _, services, catalog) = setup();
        let vm = DetailViewModel::new(catalog, services);
        assert_eq!(vm.page(), Page::Loading);
        assert!(!vm.is_live());
        assert_eq!(documents.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_open_known_country_subscribes_both_feeds() {
        let (documents, _, services, catalog) = setup();
        let mut vm = DetailViewModel::open(catalog, services, "thailand".into()).unwrap();
        assert_eq!(documents.listener_count(), 2);
        assert!(!vm.is_settled());

        let updates = vm.drain();
        assert_eq!(
            updates,
            vec![
                FeedUpdate::Snapshot(Feed::Comments),
                FeedUpdate::Snapshot(Feed::Media)
            ]
        );
        assert!(vm.is_settled());
        assert_eq!(vm.feed_status(Feed::Comments), &FeedStatus::Live);
    }

    #[tokio::test]
    async fn test_next_change_without_queries_returns_none() {
        let (_, _, services, catalog) = setup();
        let mut vm = DetailViewModel::new(catalog, services);
        assert_eq!(vm.next_change().await, None);
    }

    #[tokio::test]
    async fn test_renavigate_same_id_keeps_queries() {
        let (documents, _, services, catalog) = setup();
        let mut vm = DetailViewModel::open(catalog, services, "france".into()).unwrap();
        vm.drain();
        vm.set_draft("half-typed");
        vm.navigate(Some("france".into())).unwrap();
        assert_eq!(documents.listener_count(), 2);
        assert_eq!(vm.draft(), "half-typed");
        assert!(vm.drain().is_empty());
    }

    #[tokio::test]
    async fn test_navigate_to_none_tears_down() {
        let (documents, _, services, catalog) = setup();
        let mut vm = DetailViewModel::open(catalog, services, "france".into()).unwrap();
        vm.navigate(None).unwrap();
        assert_eq!(vm.page(), Page::Loading);
        assert_eq!(documents.listener_count(), 0);
        assert_eq!(vm.feed_status(Feed::Media), &FeedStatus::Idle);
    }

    #[tokio::test]
    async fn test_add_comment_without_country_is_error() {
        let (_, _, services, catalog) = setup();
        let mut vm = DetailViewModel::new(catalog, services);
        vm.set_draft("hello");
        assert!(matches!(
            vm.add_comment().await,
            Err(Error::NoCountry(_))
        ));
    }

    #[tokio::test]
    async fn test_intent_on_unknown_country_records_error() {
        let (_, blobs, services, catalog) = setup();
        let mut vm = DetailViewModel::open(catalog, services, "atlantis".into()).unwrap();

        vm.set_draft("hello");
        assert!(matches!(vm.add_comment().await, Err(Error::NoCountry(_))));
        assert!(vm.last_error().is_some_and(|e| e.starts_with("Posting comment failed")));

        vm.select_media(Some(PendingMedia::new("beach.png", b"png".to_vec())));
        assert!(matches!(vm.upload_media().await, Err(Error::NoCountry(_))));
        assert!(vm.last_error().is_some_and(|e| e.starts_with("Uploading media failed")));
        assert!(vm.pending_media().is_none());
        assert!(blobs.get("media/atlantis/beach.png").is_none());
    }

    #[test]
    fn test_record_error_sets_and_next_success_clears() {
        let (_, _, services, catalog) = setup();
        let mut vm = DetailViewModel::new(catalog, services);
        vm.record_error("Attaching file failed: no such file");
        assert_eq!(vm.last_error(), Some("Attaching file failed: no such file"));

        let _ = vm.settle("Deleting comment", Ok(()));
        assert_eq!(vm.last_error(), None);
    }

    #[tokio::test]
    async fn test_decode_skips_malformed_documents() {
        let (documents, _, services, catalog) = setup();
        let mut vm = DetailViewModel::open(catalog, services, "thailand".into()).unwrap();
        vm.drain();

        let mut bad = wayfare_types::Fields::new();
        bad.insert("countryId".into(), "thailand".into());
        documents.create(COMMENTS, bad).await.unwrap();
        vm.drain();

        assert!(vm.comments().is_empty());
        assert_eq!(vm.feed_status(Feed::Comments), &FeedStatus::Live);
    }
}
