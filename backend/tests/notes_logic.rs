//! Note creation, slug handling and ownership of mutations.

#[allow(dead_code, reason = "helpers are shared across suites")]
mod support;

use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::Value;

use bulletin::domain::notes::duplicate_slug_warning;
use bulletin::domain::slugify;
use support::{Site, World, app, location, page, post, sign_in};

const TITLE: &str = "Заголовок";
const TEXT: &str = "Текст";
const SLUG: &str = "note-slug";

#[actix_web::test]
async fn user_can_create_a_note() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;

    let res = post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/done/");
    let notes = world.notes_of(author_id).await;
    assert_eq!(notes.len(), 1);
    let note = notes.first().expect("one note");
    assert_eq!(note.title, TITLE);
    assert_eq!(note.text, TEXT);
    assert_eq!(note.slug.to_string(), SLUG);
    assert_eq!(note.author, author_id);
}

#[rstest]
#[case("/add/")]
#[case("/edit/note-slug/")]
#[case("/delete/note-slug/")]
#[actix_web::test]
async fn anonymous_posts_change_nothing(#[case] path: &str) {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(
        &app,
        path,
        &[("title", "Другой"), ("text", "Другой"), ("slug", "other")],
        None,
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/auth/login/?next={path}"));
    let notes = world.notes_of(author_id).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes.first().map(|note| note.title.as_str()), Some(TITLE));
    assert!(world.note("other").await.is_none());
}

#[actix_web::test]
async fn duplicate_slugs_are_rejected() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;
    let form = [("title", TITLE), ("text", TEXT), ("slug", SLUG)];
    post(&app, "/add/", &form, Some(&author)).await;

    let res = post(&app, "/add/", &form, Some(&author)).await;

    let body = page(res).await;
    assert_eq!(world.notes_of(author_id).await.len(), 1);
    assert_eq!(
        body["form"]["errors"]["slug"],
        Value::from(vec![duplicate_slug_warning(SLUG)])
    );
}

#[actix_web::test]
async fn empty_slug_is_derived_from_the_title() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;

    let res = post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", "")],
        Some(&author),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    let notes = world.notes_of(author_id).await;
    let note = notes.first().expect("note stored");
    assert_eq!(note.slug.to_string(), slugify(TITLE));
    assert_eq!(note.slug.to_string(), "zagolovok");
}

#[actix_web::test]
async fn derived_slugs_must_be_unique_too() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;
    let form = [("title", "Новый заголовок"), ("text", TEXT), ("slug", "")];
    post(&app, "/add/", &form, Some(&author)).await;

    let res = post(&app, "/add/", &form, Some(&author)).await;

    let body = page(res).await;
    assert_eq!(world.notes_of(author_id).await.len(), 1);
    assert_eq!(
        body["form"]["errors"]["slug"],
        Value::from(vec![duplicate_slug_warning("novyij-zagolovok")])
    );
}

#[actix_web::test]
async fn author_can_edit_their_note() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (_, author) = sign_in(&app, &world, "author").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(
        &app,
        "/edit/note-slug/",
        &[("title", "Новый заголовок"), ("text", "Новый текст"), ("slug", "new-slug")],
        Some(&author),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/done/");
    assert!(world.note(SLUG).await.is_none());
    let note = world.note("new-slug").await.expect("renamed note");
    assert_eq!(note.title, "Новый заголовок");
    assert_eq!(note.text, "Новый текст");
}

#[actix_web::test]
async fn editing_may_keep_the_same_slug() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (_, author) = sign_in(&app, &world, "author").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(
        &app,
        "/edit/note-slug/",
        &[("title", TITLE), ("text", "Новый текст"), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    let note = world.note(SLUG).await.expect("note kept");
    assert_eq!(note.text, "Новый текст");
}

#[actix_web::test]
async fn other_user_cannot_edit_the_note() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (_, author) = sign_in(&app, &world, "author").await;
    let (_, reader) = sign_in(&app, &world, "reader").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(
        &app,
        "/edit/note-slug/",
        &[("title", "Чужой"), ("text", "Чужой"), ("slug", SLUG)],
        Some(&reader),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let note = world.note(SLUG).await.expect("note kept");
    assert_eq!(note.title, TITLE);
    assert_eq!(note.text, TEXT);
}

#[actix_web::test]
async fn author_can_delete_their_note() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(&app, "/delete/note-slug/", &[], Some(&author)).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/done/");
    assert!(world.notes_of(author_id).await.is_empty());
}

#[actix_web::test]
async fn other_user_cannot_delete_the_note() {
    let world = World::default();
    let app = app(&world, Site::Notes).await;
    let (author_id, author) = sign_in(&app, &world, "author").await;
    let (_, reader) = sign_in(&app, &world, "reader").await;
    post(
        &app,
        "/add/",
        &[("title", TITLE), ("text", TEXT), ("slug", SLUG)],
        Some(&author),
    )
    .await;

    let res = post(&app, "/delete/note-slug/", &[], Some(&reader)).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(world.notes_of(author_id).await.len(), 1);
}
