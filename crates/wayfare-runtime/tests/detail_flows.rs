//! End-to-end flows of the country detail view-model against recording stores.

use anyhow::Result;
use wayfare_runtime::{Feed, FeedStatus, FeedUpdate, Page};
use wayfare_testing::assertions::{assert_comment_texts, assert_media_urls, assert_single_country};
use wayfare_testing::fixtures::sample_image;
use wayfare_testing::{BlobOp, DocumentOp, TestWorld, init_test_logging};
use wayfare_types::{COMMENTS, DocumentId, Filter, MEDIA, PendingMedia};

#[tokio::test]
async fn test_known_country_renders_card_with_empty_lists() -> Result<()> {
    init_test_logging();
    let world = TestWorld::new();
    let mut vm = world.open("thailand")?;
    vm.drain();

    let Page::Ready(id, country) = vm.page() else {
        anyhow::bail!("expected ready page, got {:?}", vm.page());
    };
    assert_eq!(id.as_str(), "thailand");
    assert_eq!(country.capital, "Bangkok");
    assert_eq!(country.airport_code, "Suvarnabhumi (BKK)");
    assert!(vm.comments().is_empty());
    assert!(vm.media().is_empty());
    assert!(vm.is_settled());
    Ok(())
}

#[tokio::test]
async fn test_subscriptions_are_filtered_by_country() -> Result<()> {
    let world = TestWorld::new();
    let _vm = world.open("japan")?;

    assert_eq!(
        world.documents().operations(),
        vec![
            DocumentOp::Subscribe {
                collection: COMMENTS.to_string(),
                filter: Filter::eq("countryId", "japan"),
            },
            DocumentOp::Subscribe {
                collection: MEDIA.to_string(),
                filter: Filter::eq("countryId", "japan"),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_country_is_not_found_without_queries() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("atlantis")?;

    assert!(matches!(vm.page(), Page::NotFound(id) if id.as_str() == "atlantis"));
    assert_eq!(world.documents().subscribe_count(), 0);
    assert!(!vm.is_live());
    assert_eq!(vm.next_change().await, None);
    Ok(())
}

#[tokio::test]
async fn test_loading_until_route_resolves() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.loading();
    assert_eq!(vm.page(), Page::Loading);
    assert_eq!(world.documents().subscribe_count(), 0);

    vm.navigate(Some("portugal".into()))?;
    assert!(matches!(vm.page(), Page::Ready(..)));
    assert_eq!(world.documents().subscribe_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_comments_mirror_latest_snapshot_in_order() -> Result<()> {
    let world = TestWorld::new()
        .with_comment("c1", "thailand", "Street food everywhere")
        .with_comment("c2", "france", "Bonjour")
        .with_comment("c3", "thailand", "Cheap massages");
    let mut vm = world.open("thailand")?;
    vm.drain();
    assert_comment_texts(&vm, &["Street food everywhere", "Cheap massages"])?;

    world
        .documents()
        .memory()
        .insert_with_id(
            COMMENTS,
            DocumentId::from("c4"),
            wayfare_testing::fixtures::comment_fields("thailand", "Islands!"),
        )?;
    let update = vm.next_change().await;
    assert_eq!(update, Some(FeedUpdate::Snapshot(Feed::Comments)));
    assert_comment_texts(
        &vm,
        &["Street food everywhere", "Cheap massages", "Islands!"],
    )?;
    assert_single_country(&vm)?;
    Ok(())
}

#[tokio::test]
async fn test_add_comment_flow() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("thailand")?;
    vm.drain();

    vm.set_draft("Great trip!");
    let id = vm.add_comment().await?;
    assert!(id.is_some());
    assert_eq!(vm.draft(), "");

    let creates = world.documents().creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].0, COMMENTS);
    assert_eq!(creates[0].1["countryId"], "thailand");
    assert_eq!(creates[0].1["text"], "Great trip!");

    vm.drain();
    assert_comment_texts(&vm, &["Great trip!"])?;
    assert_eq!(vm.last_error(), None);
    Ok(())
}

#[tokio::test]
async fn test_blank_draft_is_not_posted() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("france")?;
    vm.drain();

    for draft in ["", "   ", "\n\t"] {
        vm.set_draft(draft);
        assert_eq!(vm.add_comment().await?, None);
    }
    assert!(world.documents().creates().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_comment_flow() -> Result<()> {
    let world = TestWorld::new()
        .with_comment("c1", "thailand", "First")
        .with_comment("c2", "thailand", "Second");
    let mut vm = world.open("thailand")?;
    vm.drain();

    vm.delete_comment(&DocumentId::from("c1")).await?;
    assert_eq!(
        world.documents().deletes(),
        vec![(COMMENTS.to_string(), DocumentId::from("c1"))]
    );

    vm.drain();
    assert_comment_texts(&vm, &["Second"])?;
    Ok(())
}

#[tokio::test]
async fn test_upload_media_flow() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("thailand")?;
    vm.drain();

    vm.select_media(Some(sample_image("beach.png")));
    let id = vm.upload_media().await?;
    assert!(id.is_some());
    assert!(vm.pending_media().is_none());

    let ops = world.blobs().operations();
    assert_eq!(ops.len(), 2);
    assert!(matches!(&ops[0], BlobOp::Store { path, .. } if path == "media/thailand/beach.png"));
    assert_eq!(
        ops[1],
        BlobOp::ResolveUrl {
            path: "media/thailand/beach.png".to_string()
        }
    );

    let creates = world.documents().creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].0, MEDIA);
    assert_eq!(creates[0].1["url"], "memory://media/thailand/beach.png");

    vm.drain();
    assert_media_urls(&vm, &["memory://media/thailand/beach.png"])?;
    Ok(())
}

#[tokio::test]
async fn test_upload_without_selection_does_nothing() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("mexico")?;
    vm.drain();

    assert_eq!(vm.upload_media().await?, None);
    assert!(world.blobs().operations().is_empty());
    assert!(world.documents().creates().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_media_keeps_blob() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("japan")?;
    vm.drain();

    vm.select_media(Some(sample_image("fuji.png")));
    let id = vm.upload_media().await?.expect("uploaded");
    vm.drain();
    assert_eq!(vm.media().len(), 1);

    vm.delete_media(&id).await?;
    vm.drain();
    assert!(vm.media().is_empty());
    assert!(world.blobs().memory().get("media/japan/fuji.png").is_some());
    Ok(())
}

#[tokio::test]
async fn test_switching_country_does_not_bleed() -> Result<()> {
    let world = TestWorld::new()
        .with_comment("c1", "thailand", "Thai comment")
        .with_comment("c2", "france", "French comment");
    let mut vm = world.open("thailand")?;
    vm.drain();
    vm.set_draft("unsent");
    assert_eq!(world.documents().memory().listener_count(), 2);

    vm.navigate(Some("france".into()))?;
    assert_eq!(world.documents().memory().listener_count(), 2);
    assert_eq!(vm.draft(), "");
    assert!(vm.comments().is_empty());

    // A write for the old country after the switch.
    world
        .documents()
        .memory()
        .insert_with_id(
            COMMENTS,
            DocumentId::from("c3"),
            wayfare_testing::fixtures::comment_fields("thailand", "Late Thai comment"),
        )?;
    vm.drain();

    assert_comment_texts(&vm, &["French comment"])?;
    assert_single_country(&vm)?;
    Ok(())
}

#[tokio::test]
async fn test_failed_comment_keeps_list_and_clears_draft() -> Result<()> {
    let world = TestWorld::new().with_comment("c1", "france", "Existing");
    let mut vm = world.open("france")?;
    vm.drain();

    world.documents().fail_creates(COMMENTS);
    vm.set_draft("Will not land");
    assert!(vm.add_comment().await.is_err());

    assert_eq!(vm.draft(), "");
    let error = vm.last_error().expect("error surfaced");
    assert!(error.starts_with("Posting comment failed"));
    vm.drain();
    assert_comment_texts(&vm, &["Existing"])?;

    world.documents().heal();
    vm.set_draft("Second try");
    vm.add_comment().await?;
    assert_eq!(vm.last_error(), None);
    Ok(())
}

#[tokio::test]
async fn test_failed_blob_store_stops_upload() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("portugal")?;
    vm.drain();

    world.blobs().fail_stores();
    vm.select_media(Some(sample_image("lisbon.png")));
    assert!(vm.upload_media().await.is_err());

    assert!(vm.pending_media().is_none());
    assert_eq!(world.blobs().operations().len(), 1);
    assert!(world.documents().creates().is_empty());
    assert!(vm.last_error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_failed_metadata_create_leaves_orphan_blob() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("portugal")?;
    vm.drain();

    world.documents().fail_creates(MEDIA);
    vm.select_media(Some(sample_image("porto.png")));
    assert!(vm.upload_media().await.is_err());

    assert!(world.blobs().memory().get("media/portugal/porto.png").is_some());
    vm.drain();
    assert!(vm.media().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_resolve_stops_upload() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("portugal")?;
    vm.drain();

    world.blobs().fail_resolves();
    vm.select_media(Some(sample_image("sintra.png")));
    assert!(vm.upload_media().await.is_err());

    assert!(vm.pending_media().is_none());
    assert!(world.documents().creates().is_empty());
    assert!(world.blobs().memory().get("media/portugal/sintra.png").is_some());
    assert!(vm.last_error().is_some_and(|e| e.starts_with("Uploading media failed")));
    vm.drain();
    assert!(vm.media().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_upload_with_unusable_file_name_is_rejected() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("japan")?;
    vm.drain();

    for name in ["..", "photos/.", ""] {
        vm.select_media(Some(PendingMedia::new(name, b"bytes".to_vec())));
        assert!(matches!(
            vm.upload_media().await,
            Err(wayfare_runtime::Error::InvalidInput(_))
        ));
        assert!(vm.pending_media().is_none());
        assert!(vm.last_error().is_some_and(|e| e.starts_with("Uploading media failed")));
    }
    assert!(world.blobs().operations().is_empty());
    assert!(world.documents().creates().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_intents_on_unknown_country_surface_error() -> Result<()> {
    let world = TestWorld::new();
    let mut vm = world.open("atlantis")?;

    vm.set_draft("Is it real?");
    assert!(vm.add_comment().await.is_err());
    assert!(vm.last_error().is_some_and(|e| e.contains("atlantis")));

    vm.select_media(Some(sample_image("ruins.png")));
    assert!(vm.upload_media().await.is_err());
    assert!(vm.pending_media().is_none());
    assert!(vm.last_error().is_some_and(|e| e.starts_with("Uploading media failed")));
    assert!(world.blobs().operations().is_empty());
    assert!(world.documents().creates().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_deletes_keep_lists() -> Result<()> {
    let world = TestWorld::new()
        .with_comment("c1", "mexico", "Tacos")
        .with_media("m1", "mexico", "https://cdn/tacos.jpg");
    let mut vm = world.open("mexico")?;
    vm.drain();

    world.documents().fail_deletes(COMMENTS);
    assert!(vm.delete_comment(&DocumentId::from("c1")).await.is_err());
    assert!(vm.last_error().is_some_and(|e| e.starts_with("Deleting comment failed")));

    world.documents().fail_deletes(MEDIA);
    assert!(vm.delete_media(&DocumentId::from("m1")).await.is_err());
    assert!(vm.last_error().is_some_and(|e| e.starts_with("Deleting media failed")));

    vm.drain();
    assert_comment_texts(&vm, &["Tacos"])?;
    assert_media_urls(&vm, &["https://cdn/tacos.jpg"])?;
    Ok(())
}

#[tokio::test]
async fn test_closed_feed_is_reported_by_drain() -> Result<()> {
    let world = TestWorld::new().with_comment("c1", "thailand", "Pad thai");
    let mut vm = world.open("thailand")?;
    vm.drain();

    world.documents().memory().close_listeners(COMMENTS);
    let updates = vm.drain();
    assert_eq!(updates, vec![FeedUpdate::Closed(Feed::Comments)]);
    assert!(matches!(vm.feed_status(Feed::Comments), FeedStatus::Failed(_)));
    assert_eq!(vm.feed_status(Feed::Media), &FeedStatus::Live);
    assert_comment_texts(&vm, &["Pad thai"])?;
    assert!(vm.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_feed_error_keeps_last_snapshot() -> Result<()> {
    let world = TestWorld::new().with_comment("c1", "mexico", "Tacos");
    let mut vm = world.open("mexico")?;
    vm.drain();

    world
        .documents()
        .memory()
        .fail_listeners(COMMENTS, "listener revoked");
    let updates = vm.drain();
    assert!(matches!(
        updates.as_slice(),
        [FeedUpdate::Error(Feed::Comments, reason)] if reason.contains("listener revoked")
    ));
    assert!(matches!(vm.feed_status(Feed::Comments), FeedStatus::Failed(_)));
    assert_eq!(vm.feed_status(Feed::Media), &FeedStatus::Live);
    assert_comment_texts(&vm, &["Tacos"])?;
    Ok(())
}

#[tokio::test]
async fn test_failed_subscribe_surfaces_error() -> Result<()> {
    let world = TestWorld::new();
    world.documents().fail_subscribes(MEDIA);
    let mut vm = world.loading();

    assert!(vm.navigate(Some("japan".into())).is_err());
    assert!(vm.last_error().is_some_and(|e| e.contains("media")));
    assert!(matches!(vm.feed_status(Feed::Media), FeedStatus::Failed(_)));
    vm.drain();
    assert_eq!(vm.feed_status(Feed::Comments), &FeedStatus::Live);
    Ok(())
}

#[tokio::test]
async fn test_workspace_shares_world_stores() -> Result<()> {
    let world = TestWorld::new().with_comment("c1", "japan", "Onsen");
    let workspace = world.workspace(wayfare_runtime::Config::default());
    let mut vm = workspace.detail(Some("japan".into()))?;
    vm.drain();
    assert_comment_texts(&vm, &["Onsen"])?;
    Ok(())
}
