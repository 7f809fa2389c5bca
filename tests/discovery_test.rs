/// Integration tests for search-driven discovery.
///
/// Tests cover:
/// - Title creation from catalog search hits
/// - Name and external-id collision handling
/// - Actor lookup with known-for linking and the external-id merge policy
/// - The one-shot cast refresh guard
mod utils;

use std::sync::Arc;

use kino::modules::catalog::{Actor, Genre, Title, TitleKind};
use kino::shared::AppError;
use utils::factories::{known_for_movie, known_for_tv, person_match, title_hit, TitleDetailsFactory};
use utils::{db::TestDb, helpers, mocks::MockCatalog};

#[tokio::test]
async fn search_creates_the_title_under_its_catalog_id() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog.expect_search_titles().returning(|_, _, _| {
        Ok(vec![title_hit(603, "The Matrix", "The Matrix", vec![28, 31337])])
    });
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));
    services.genre_repo.insert(&Genre::new(28, "Action")).await.unwrap();

    let title = services
        .discovery_service
        .search_and_create_title(TitleKind::Movie, "The Matrix", Some(1999))
        .await
        .expect("A matching hit should create the title");

    assert_eq!(title.id, 603);
    assert_eq!(title.name, "The Matrix");
    assert_eq!(title.year, Some(1999));
    assert_eq!(
        title.genre_ids,
        vec![28],
        "Unknown genre ids from search hits are dropped"
    );

    let stored = services
        .title_service
        .get_title(TitleKind::Movie, 603)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn search_is_skipped_when_the_name_is_already_stored() {
    let test_db = TestDb::new();
    // No expectations: any catalog call panics the test
    let services = helpers::build_test_services(&test_db.database(), Arc::new(MockCatalog::new()));

    services
        .title_service
        .create_title(TitleKind::Movie, "The Matrix", Some(1999), &[])
        .await
        .unwrap();

    let err = services
        .discovery_service
        .search_and_create_title(TitleKind::Movie, "The Matrix", None)
        .await
        .expect_err("A stored name must short-circuit the search");
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn a_search_without_a_name_match_is_an_error() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog.expect_search_titles().returning(|_, _, _| {
        Ok(vec![title_hit(
            604,
            "The Matrix Reloaded",
            "The Matrix Reloaded",
            vec![],
        )])
    });
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    let err = services
        .discovery_service
        .search_and_create_title(TitleKind::Movie, "The Matrix", None)
        .await
        .expect_err("Near misses do not count as matches");
    assert!(matches!(err, AppError::NotFound(_)));

    let all = services.title_service.get_all_titles(TitleKind::Movie).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn the_original_name_matches_and_the_canonical_spelling_is_stored() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search_titles()
        .returning(|_, _, _| Ok(vec![title_hit(954, "Seven", "Se7en", vec![])]));
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    let title = services
        .discovery_service
        .search_and_create_title(TitleKind::Movie, "se7en", Some(1995))
        .await
        .unwrap();

    assert_eq!(title.id, 954);
    assert_eq!(title.name, "Seven", "The hit's canonical name wins");
    assert_eq!(title.year, Some(1995), "The caller's year is kept");
}

#[tokio::test]
async fn a_hit_whose_catalog_id_is_already_stored_is_rejected() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search_titles()
        .returning(|_, _, _| Ok(vec![title_hit(603, "The Matrix", "The Matrix", vec![])]));
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    services
        .title_repo
        .save(&Title::new(
            TitleKind::Movie,
            603,
            "Stored Under Another Name",
            None,
        ))
        .await
        .unwrap();

    let err = services
        .discovery_service
        .search_and_create_title(TitleKind::Movie, "The Matrix", None)
        .await
        .expect_err("One external identity may only be stored once");
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn actor_search_short_circuits_on_a_stored_name() {
    let test_db = TestDb::new();
    // No expectations: the catalog must stay untouched
    let services = helpers::build_test_services(&test_db.database(), Arc::new(MockCatalog::new()));

    services.actor_service.create_actor("Tom Hanks").await.unwrap();

    let linked = services
        .reconciler
        .search_and_link_actor("tom HANKS")
        .await
        .expect("A stored name is a quiet no-op");
    assert!(linked.is_none());
}

#[tokio::test]
async fn actor_search_ignores_non_acting_candidates() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search_person()
        .returning(|_| Ok(vec![person_match(31, "Tom Hanks", "Directing", vec![])]));
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    let linked = services
        .reconciler
        .search_and_link_actor("Tom Hanks")
        .await
        .unwrap();
    assert!(linked.is_none());
    assert!(services.actor_service.get_all_actors().await.unwrap().is_empty());
}

#[tokio::test]
async fn actor_search_links_known_for_movies_and_skips_tv() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog.expect_search_person().returning(|_| {
        Ok(vec![person_match(
            31,
            "Tom Hanks",
            "Acting",
            vec![
                known_for_movie(13, "Forrest Gump", Some("1994-07-06"), vec![18]),
                known_for_tv(456, "Band of Brothers"),
                known_for_movie(13, "Forrest Gump", Some("1994-07-06"), vec![18]),
                known_for_movie(862, "Toy Story", None, vec![16]),
            ],
        )])
    });
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));
    services.genre_repo.insert(&Genre::new(18, "Drama")).await.unwrap();

    let actor = services
        .reconciler
        .search_and_link_actor("Tom Hanks")
        .await
        .unwrap()
        .expect("An acting match must be linked");

    assert_eq!(actor.id, 31);
    assert_eq!(actor.full_name(), "Tom Hanks");
    assert_eq!(
        actor.movie_ids,
        vec![13, 862],
        "Duplicate known-for entries collapse"
    );
    assert!(actor.tv_show_ids.is_empty());

    let gump = services
        .title_service
        .get_title(TitleKind::Movie, 13)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(gump.year, Some(1994));
    assert_eq!(gump.genre_ids, vec![18]);
    assert_eq!(gump.actor_ids, vec![31]);

    let toy_story = services
        .title_service
        .get_title(TitleKind::Movie, 862)
        .await
        .unwrap()
        .unwrap();
    assert!(
        toy_story.genre_ids.is_empty(),
        "Unknown bare genre ids are dropped, not absorbed"
    );

    assert!(
        services
            .title_service
            .get_title(TitleKind::TvShow, 456)
            .await
            .unwrap()
            .is_none(),
        "TV entries in the known-for list are not created"
    );

    services.cast_service.verify_symmetry().await.expect("Store must be symmetric");
}

#[tokio::test]
async fn actor_search_reuses_the_row_behind_a_known_external_id() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog
        .expect_search_person()
        .returning(|_| Ok(vec![person_match(31, "Tom Hanks", "Acting", vec![])]));
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    // Same external identity, different spelling
    services
        .actor_repo
        .save(&Actor::new(31, "Thomas", "Hanks"))
        .await
        .unwrap();

    let actor = services
        .reconciler
        .search_and_link_actor("Tom Hanks")
        .await
        .unwrap()
        .expect("The search itself still matches");

    assert_eq!(actor.id, 31);
    assert_eq!(
        actor.full_name(),
        "Thomas Hanks",
        "The stored spelling wins over the catalog's"
    );
    assert_eq!(services.actor_service.get_all_actors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn actor_search_links_existing_titles_without_rewriting_them() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog.expect_search_person().returning(|_| {
        Ok(vec![person_match(
            31,
            "Tom Hanks",
            "Acting",
            vec![known_for_movie(13, "Forrest Gump", Some("1994-07-06"), vec![18])],
        )])
    });
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    let existing = Title::new(TitleKind::Movie, 13, "Forrest Gump (1994)", None);
    services.title_repo.save(&existing).await.unwrap();

    let actor = services
        .reconciler
        .search_and_link_actor("Tom Hanks")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(actor.movie_ids, vec![13]);

    let stored = services
        .title_service
        .get_title(TitleKind::Movie, 13)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        stored.name, "Forrest Gump (1994)",
        "Known-for linking must not rewrite a stored title"
    );
    assert_eq!(stored.year, None);
    assert_eq!(stored.actor_ids, vec![31]);
}

#[tokio::test]
async fn cast_refresh_is_a_one_shot_per_title() {
    let test_db = TestDb::new();
    let mut catalog = MockCatalog::new();
    catalog.expect_fetch_title_details().times(1).returning(|_, _| {
        Ok(TitleDetailsFactory::new()
            .with_id(550)
            .with_cast(vec![(819, "Edward Norton"), (287, "Brad Pitt"), (1283, "Helena Bonham Carter")])
            .build())
    });
    let services = helpers::build_test_services(&test_db.database(), Arc::new(catalog));

    services
        .title_repo
        .save(&Title::new(TitleKind::Movie, 550, "Fight Club", Some(1999)))
        .await
        .unwrap();

    let (title, linked) = services
        .reconciler
        .refresh_title_cast(TitleKind::Movie, 550, 12)
        .await
        .expect("The first refresh should succeed");
    assert_eq!(linked, 3);
    assert!(title.cast_fetched);
    assert_eq!(services.actor_service.get_all_actors().await.unwrap().len(), 3);

    // The times(1) above doubles as proof the catalog is not asked again
    let err = services
        .reconciler
        .refresh_title_cast(TitleKind::Movie, 550, 12)
        .await
        .expect_err("A fetched cast must not be fetched twice");
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn cast_refresh_of_a_missing_title_fails() {
    let test_db = TestDb::new();
    let services = helpers::build_test_services(&test_db.database(), Arc::new(MockCatalog::new()));

    let err = services
        .reconciler
        .refresh_title_cast(TitleKind::Movie, 9999, 12)
        .await
        .expect_err("Refreshing a missing title must fail");
    assert!(matches!(err, AppError::NotFound(_)));
}
