//! End-to-end behaviour of `SiteEditor` against the in-memory backend.

use std::sync::Arc;
use std::time::Duration;

use content_engine::testing::{
    self, seeded_backend, MockTranslator, TranslateCall, ABOUT, GRID_A, GRID_C, HOME, NAV_HOME,
    NEWS_1, NEWS_2, NEWS_3, SLIDER_B,
};
use content_engine::{
    audit, resolve_item_field, Collection, ContainerId, ContainerType, EngineConfig, EngineError,
    ItemFields, ItemId, LanguageCode, MemoryBackend, NavItemId, NavParent, NewItem,
    ReferentialError, Reorder, SiteEditor, Status, TranslationTarget, Warning,
};
use content_engine::types::item::NewsFields;

async fn editor_for(backend: &MemoryBackend, translator: MockTranslator) -> SiteEditor {
    let mut editor = SiteEditor::new(
        backend.registry(),
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(translator),
    )
    .with_config(EngineConfig::new().with_languages([LanguageCode::En, LanguageCode::De]));
    editor.load().await.unwrap();
    backend.clear_calls();
    editor
}

fn container(id: &str) -> ContainerId {
    ContainerId::from(id)
}

fn item(id: &str) -> ItemId {
    ItemId::from(id)
}

fn status(editor: &SiteEditor, id: &str) -> Status {
    editor
        .state()
        .item(Collection::News, &item(id))
        .unwrap()
        .status
}

/// Every news item is published exactly when some container tags it.
fn assert_publish_invariant(editor: &SiteEditor) {
    for news in editor.state().collections().items(Collection::News) {
        let tagged = editor.state().is_tagged_anywhere(Collection::News, &news.id);
        assert_eq!(news.is_published(), tagged, "item {}", news.id);
    }
}

#[tokio::test]
async fn test_load_reads_everything() {
    let backend = seeded_backend();
    let editor = editor_for(&backend, MockTranslator::new()).await;

    assert_eq!(editor.state().pages().len(), 2);
    assert_eq!(editor.state().collections().len(Collection::News), 3);
    assert_eq!(editor.state().nav().items().len(), 1);
}

#[tokio::test]
async fn test_load_failure_keeps_previous_state() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let before = editor.snapshot();

    backend.fail("list_items");
    let err = editor.load().await;
    assert!(matches!(err, Err(EngineError::Collaborator(_))));
    assert_eq!(editor.snapshot(), before);
}

#[tokio::test]
async fn test_tag_untag_sequences_keep_publish_invariant() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let steps: [(bool, &str, &str); 8] = [
        (true, GRID_A, NEWS_1),
        (true, SLIDER_B, NEWS_1),
        (true, GRID_C, NEWS_2),
        (false, GRID_A, NEWS_1),
        (true, GRID_A, NEWS_1),
        (false, GRID_C, NEWS_2),
        (false, SLIDER_B, NEWS_1),
        (false, GRID_A, NEWS_1),
    ];
    for (tag, target, id) in steps {
        if tag {
            let _outcome = editor.tag(&container(target), &item(id)).await.unwrap();
        } else {
            let _outcome = editor.untag(&container(target), &item(id)).await.unwrap();
        }
        assert_publish_invariant(&editor);
    }

    assert_eq!(status(&editor, NEWS_1), Status::Draft);
    assert_eq!(status(&editor, NEWS_2), Status::Draft);
}

#[tokio::test]
async fn test_untag_from_one_of_two_containers() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    let _outcome = editor.tag(&container(GRID_C), &item(NEWS_1)).await.unwrap();
    assert_eq!(status(&editor, NEWS_1), Status::Published);

    let _outcome = editor.untag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    assert_eq!(status(&editor, NEWS_1), Status::Published);

    let _outcome = editor.untag(&container(GRID_C), &item(NEWS_1)).await.unwrap();
    assert_eq!(status(&editor, NEWS_1), Status::Draft);

    let stored = backend.stored_item(Collection::News, &item(NEWS_1)).unwrap();
    assert_eq!(stored.status, Status::Draft);
    assert!(backend
        .stored_container(&container(GRID_C))
        .unwrap()
        .tagged_items()
        .is_empty());
}

#[tokio::test]
async fn test_tag_reports_underfilled_grid() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    assert_eq!(
        outcome.warnings,
        vec![Warning::UnderFilled {
            container: container(GRID_A),
            tagged: 1,
            columns: 3,
        }]
    );

    // One column slider is full with one item.
    let outcome = editor.tag(&container(SLIDER_B), &item(NEWS_1)).await.unwrap();
    assert!(outcome.is_clean());
}

#[tokio::test]
async fn test_tag_survives_storage_outage() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    backend.fail("save_container");
    backend.fail("update_item");

    let outcome = editor.tag(&container(SLIDER_B), &item(NEWS_2)).await.unwrap();
    let operations: Vec<_> = outcome
        .warnings
        .iter()
        .filter_map(|w| match w {
            Warning::CollaboratorUnavailable { operation, .. } => Some(*operation),
            _ => None,
        })
        .collect();
    assert_eq!(operations, vec!["save_container", "update_item"]);

    assert_eq!(status(&editor, NEWS_2), Status::Published);
    assert_eq!(
        backend.stored_item(Collection::News, &item(NEWS_2)).unwrap().status,
        Status::Draft
    );
}

#[tokio::test]
async fn test_create_and_tag_stays_draft() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let seed = NewItem::new(ItemFields::News(NewsFields {
        title: "Board election".into(),
        ..Default::default()
    }));
    let outcome = editor.create_and_tag(&container(GRID_A), seed).await.unwrap();
    let created = outcome.value;

    assert_eq!(created.status, Status::Draft);
    let grid = editor.state().container(&container(GRID_A)).unwrap();
    assert_eq!(grid.tagged_items(), &[created.id.clone()]);
    assert_eq!(
        editor.state().item(Collection::News, &created.id).unwrap().status,
        Status::Draft
    );
    assert!(backend
        .stored_container(&container(GRID_A))
        .unwrap()
        .tagged_items()
        .contains(&created.id));
}

#[tokio::test]
async fn test_create_and_tag_rejects_wrong_collection_and_empty_title() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let before = editor.snapshot();

    let contact = NewItem::new(ItemFields::Contact(Default::default()));
    let err = editor.create_and_tag(&container(GRID_A), contact).await;
    assert!(matches!(
        err,
        Err(EngineError::Referential(ReferentialError::CollectionMismatch { .. }))
    ));

    let untitled = NewItem::new(ItemFields::News(NewsFields::default()));
    let err = editor.create_and_tag(&container(GRID_A), untitled).await;
    assert!(matches!(err, Err(EngineError::Validation(_))));

    assert_eq!(editor.snapshot(), before);
    assert_eq!(backend.call_count("create_item"), 0);
}

#[tokio::test]
async fn test_delete_cascades_through_every_container() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    for target in [GRID_A, SLIDER_B, GRID_C] {
        let _outcome = editor.tag(&container(target), &item(NEWS_1)).await.unwrap();
    }
    backend.clear_calls();

    let deleted = editor.delete_item(Collection::News, &item(NEWS_1)).await.unwrap();
    assert_eq!(deleted.id, item(NEWS_1));

    for target in [GRID_A, SLIDER_B, GRID_C] {
        let in_memory = editor.state().container(&container(target)).unwrap();
        assert!(!in_memory.tagged_items().contains(&item(NEWS_1)));
        let stored = backend.stored_container(&container(target)).unwrap();
        assert!(!stored.tagged_items().contains(&item(NEWS_1)));
    }
    assert!(backend.stored_item(Collection::News, &item(NEWS_1)).is_none());
    assert_eq!(backend.call_count("save_containers"), 1);
    assert!(audit(editor.state()).iter().all(|f| f.is_advisory()));
}

#[tokio::test]
async fn test_failed_delete_rolls_back_purge() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    let _outcome = editor.tag(&container(GRID_C), &item(NEWS_1)).await.unwrap();
    let before = editor.snapshot();

    backend.fail("delete_item");
    let err = editor.delete_item(Collection::News, &item(NEWS_1)).await;
    assert!(matches!(err, Err(EngineError::Collaborator(_))));

    assert_eq!(editor.snapshot(), before);
    // Purge batch, then the compensating re-save.
    assert_eq!(backend.call_count("save_containers"), 2);
    for target in [GRID_A, GRID_C] {
        let stored = backend.stored_container(&container(target)).unwrap();
        assert!(stored.tagged_items().contains(&item(NEWS_1)));
    }
    assert!(backend.stored_item(Collection::News, &item(NEWS_1)).is_some());
}

#[tokio::test]
async fn test_failed_purge_keeps_item() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    let before = editor.snapshot();

    backend.fail("save_containers");
    let err = editor.delete_item(Collection::News, &item(NEWS_1)).await;
    assert!(err.is_err());
    assert_eq!(editor.snapshot(), before);
    assert_eq!(backend.call_count("delete_item"), 0);
}

#[tokio::test]
async fn test_container_reorder_persists_dense_order_once() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let page = content_engine::PageId::from(HOME);

    let outcome = editor.reorder_container(&container(SLIDER_B), 0).await.unwrap();
    assert_eq!(outcome.value, Reorder::Moved { from: 1, to: 0 });
    assert_eq!(backend.call_count("persist_page_order"), 1);

    let stored = backend.stored_page(&page).unwrap();
    let order: Vec<_> = stored
        .containers
        .iter()
        .map(|c| (c.id.as_str(), c.order))
        .collect();
    assert_eq!(order, vec![(SLIDER_B, 0), (GRID_A, 1)]);

    let again = editor.reorder_container(&container(SLIDER_B), 0).await.unwrap();
    assert_eq!(again.value, Reorder::Unchanged);
    assert_eq!(backend.call_count("persist_page_order"), 1);
}

#[tokio::test]
async fn test_nav_reorder_persists_tree_once() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let about = editor
        .attach_orphan_page(&content_engine::PageId::from(ABOUT), NavParent::Root)
        .await
        .unwrap()
        .value;
    backend.clear_calls();

    let outcome = editor.reorder_nav_item(&about, 0).await.unwrap();
    assert_eq!(outcome.value, Reorder::Moved { from: 1, to: 0 });
    assert!(outcome.is_clean());
    assert_eq!(backend.call_count("persist_nav_tree"), 1);

    let mut stored: Vec<_> = backend
        .stored_nav()
        .into_iter()
        .map(|n| (n.id.to_string(), n.order))
        .collect();
    stored.sort_by_key(|(_, order)| *order);
    assert_eq!(stored, vec![(about.to_string(), 0), (NAV_HOME.to_string(), 1)]);

    let again = editor.reorder_nav_item(&about, 0).await.unwrap();
    assert_eq!(again.value, Reorder::Unchanged);
    assert_eq!(backend.call_count("persist_nav_tree"), 1);
}

#[tokio::test]
async fn test_remove_container_releases_tags() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();
    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_2)).await.unwrap();
    let _outcome = editor.tag(&container(SLIDER_B), &item(NEWS_2)).await.unwrap();

    let _outcome = editor.remove_container(&container(GRID_A)).await.unwrap();

    assert_eq!(status(&editor, NEWS_1), Status::Draft);
    assert_eq!(status(&editor, NEWS_2), Status::Published);
    assert_publish_invariant(&editor);

    let home = editor.state().page(&content_engine::PageId::from(HOME)).unwrap();
    assert_eq!(home.containers.len(), 1);
    assert_eq!(home.containers[0].order, 0);
}

#[tokio::test]
async fn test_add_container_requires_source_for_data_types() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let page = content_engine::PageId::from(ABOUT);

    let err = editor.add_container(&page, ContainerType::CardGrid, None).await;
    assert!(matches!(err, Err(EngineError::Validation(_))));

    let outcome = editor
        .add_container(&page, ContainerType::Table, Some(Collection::Document))
        .await
        .unwrap();
    assert_eq!(outcome.value.order, 2);
    assert!(backend.stored_container(&outcome.value.id).is_some());
}

#[tokio::test]
async fn test_delete_page_unpublishes_and_detaches() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let _outcome = editor.tag(&container(GRID_A), &item(NEWS_1)).await.unwrap();

    let outcome = editor
        .delete_page(&content_engine::PageId::from(HOME))
        .await
        .unwrap();
    assert!(outcome.is_clean());

    assert_eq!(status(&editor, NEWS_1), Status::Draft);
    assert!(editor.state().nav().items().is_empty());
    assert!(backend.stored_nav().is_empty());
    assert!(backend.stored_page(&content_engine::PageId::from(HOME)).is_none());
}

#[tokio::test]
async fn test_orphan_pages_can_be_attached() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let about = content_engine::PageId::from(ABOUT);

    assert_eq!(editor.orphan_pages(), vec![about.clone()]);

    let outcome = editor
        .attach_orphan_page(&about, NavParent::Item(NavItemId::from(NAV_HOME)))
        .await
        .unwrap();
    assert!(editor.orphan_pages().is_empty());
    assert_eq!(backend.stored_nav().len(), 2);

    let err = editor.attach_orphan_page(&about, NavParent::Root).await;
    assert!(matches!(
        err,
        Err(EngineError::Referential(ReferentialError::PageAlreadyInNav(_)))
    ));

    // Detaching keeps the page; it is an orphan again.
    let _outcome = editor.detach_nav_item(&outcome.value).await.unwrap();
    assert_eq!(editor.orphan_pages(), vec![about.clone()]);
    assert!(editor.state().page(&about).is_some());
}

#[tokio::test]
async fn test_nav_cycle_is_rejected_without_persisting() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let about = content_engine::PageId::from(ABOUT);
    let child = editor
        .attach_orphan_page(&about, NavParent::Item(NavItemId::from(NAV_HOME)))
        .await
        .unwrap()
        .value;
    backend.clear_calls();
    let before = editor.snapshot();

    let err = editor
        .move_nav_item(&NavItemId::from(NAV_HOME), NavParent::Item(child.clone()))
        .await;
    assert!(matches!(
        err,
        Err(EngineError::Referential(ReferentialError::NavCycle { .. }))
    ));
    assert_eq!(editor.snapshot(), before);
    assert_eq!(backend.call_count("persist_nav_tree"), 0);

    let moved = editor.move_nav_item(&child, NavParent::Root).await.unwrap();
    assert!(moved.value);
    assert_eq!(backend.call_count("persist_nav_tree"), 1);
}

#[tokio::test]
async fn test_translations_run_one_at_a_time() {
    let backend = seeded_backend();
    // The first field answers slowly; parallel dispatch would let it land
    // after the second and overwrite it with a stale copy.
    let translator = MockTranslator::new()
        .with_delay("Spring fair", Duration::from_millis(40))
        .with_response("Spring fair", LanguageCode::De, "Frühlingsfest")
        .with_response("Spring fair summary", LanguageCode::De, "Zusammenfassung");
    let mut editor = editor_for(&backend, translator.clone()).await;

    let target = TranslationTarget::Item {
        collection: Collection::News,
        id: item(NEWS_1),
    };
    let outcome = editor.suggest_translations(&target).await.unwrap();
    assert_eq!(outcome.value, 2);
    assert!(outcome.is_clean());

    assert_eq!(translator.peak_concurrency(), 1);
    assert_eq!(
        translator.calls(),
        vec![
            TranslateCall {
                text: "Spring fair".into(),
                language: LanguageCode::De,
            },
            TranslateCall {
                text: "Spring fair summary".into(),
                language: LanguageCode::De,
            },
        ]
    );

    let news = editor.state().item(Collection::News, &item(NEWS_1)).unwrap();
    assert_eq!(resolve_item_field(news, LanguageCode::De, "title"), "Frühlingsfest");
    assert_eq!(resolve_item_field(news, LanguageCode::De, "summary"), "Zusammenfassung");
    // No suggestion for empty body; it still falls back to the base value.
    assert_eq!(resolve_item_field(news, LanguageCode::De, "body"), "");

    let stored = backend.stored_item(Collection::News, &item(NEWS_1)).unwrap();
    assert_eq!(stored.translation(LanguageCode::De, "title"), Some("Frühlingsfest"));
    assert_eq!(stored.translation(LanguageCode::De, "summary"), Some("Zusammenfassung"));
}

#[tokio::test]
async fn test_translation_misses_are_warnings() {
    let backend = seeded_backend();
    let translator = MockTranslator::new()
        .fail_text("Spring fair")
        .with_response("Spring fair summary", LanguageCode::De, "   ");
    let mut editor = editor_for(&backend, translator).await;

    let target = TranslationTarget::Item {
        collection: Collection::News,
        id: item(NEWS_1),
    };
    let outcome = editor.suggest_translations(&target).await.unwrap();
    assert_eq!(outcome.value, 0);
    assert_eq!(outcome.warnings.len(), 2);
    assert!(outcome
        .warnings
        .iter()
        .all(|w| matches!(w, Warning::TranslationMissing { .. })));
    assert_eq!(backend.call_count("update_item"), 0);
}

#[tokio::test]
async fn test_page_title_translation_and_preview() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;
    let about = content_engine::PageId::from(ABOUT);

    // Plain titles are language-invariant until a translation upgrades them.
    assert_eq!(
        editor.page_title(&about, Some(LanguageCode::De)).as_deref(),
        Some("About us")
    );

    let _outcome = editor
        .suggest_translations(&TranslationTarget::PageTitle(about.clone()))
        .await
        .unwrap();
    assert_eq!(
        editor.page_title(&about, Some(LanguageCode::De)).as_deref(),
        Some("[de] About us")
    );
    assert_eq!(editor.page_title(&about, Some(LanguageCode::Fr)).as_deref(), Some("About us"));
    assert_eq!(editor.page_title(&about, None).as_deref(), Some("About us"));

    let home = content_engine::PageId::from(HOME);
    assert_eq!(
        editor.page_title(&home, Some(LanguageCode::De)).as_deref(),
        Some("Startseite")
    );
    assert!(testing::sample_site().page(&home).is_some());
}

#[tokio::test]
async fn test_attach_item_image() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let outcome = editor
        .attach_item_image(Collection::News, &item(NEWS_2), b"\x89PNG", "hours.png")
        .await
        .unwrap();
    match &outcome.value.fields {
        ItemFields::News(fields) => {
            assert_eq!(fields.image_url.as_deref(), Some("memory://News/hours.png"))
        }
        other => panic!("unexpected fields: {other:?}"),
    }
    assert_eq!(backend.asset_count(), 1);

    let err = editor
        .attach_item_image(Collection::News, &item(NEWS_2), b"", "empty.png")
        .await;
    assert!(matches!(err, Err(EngineError::Validation(_))));
}

#[tokio::test]
async fn test_manual_publish_needs_a_tag() {
    let backend = seeded_backend();
    let mut editor = editor_for(&backend, MockTranslator::new()).await;

    let err = editor
        .set_item_status(Collection::News, &item(NEWS_3), Status::Published)
        .await;
    assert!(matches!(err, Err(EngineError::Validation(_))));

    let seed = NewItem::new(ItemFields::News(NewsFields {
        title: "Draft on the grid".into(),
        ..Default::default()
    }));
    let created = editor
        .create_and_tag(&container(GRID_A), seed)
        .await
        .unwrap()
        .value;
    let published = editor
        .set_item_status(Collection::News, &created.id, Status::Published)
        .await
        .unwrap();
    assert!(published.value.is_published());
    assert_publish_invariant(&editor);
}
