//! Handler tests for the news app, driven through mocked ports.

use chrono::{NaiveDate, TimeZone, Utc};

use super::*;
use crate::domain::moderation::WARNING;
use crate::domain::{Comment, Error, FieldErrors, News, UserId};
use crate::inbound::http::test_utils::{
    MockPorts, location, login_cookie, test_session_middleware, with_test_login,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const READER: i64 = 2;

fn news_item() -> News {
    News {
        id: NewsId::new(4),
        title: "Заголовок".into(),
        text: "Текст".into(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
    }
}

fn comment() -> Comment {
    Comment {
        id: CommentId::new(9),
        news: NewsId::new(4),
        author: UserId::new(READER),
        text: "Текст комментария".into(),
        created: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid time"),
    }
}

fn news_detail() -> NewsDetail {
    NewsDetail {
        news: news_item(),
        comments: vec![comment()],
    }
}

fn moderated() -> Error {
    let mut fields = FieldErrors::default();
    fields.add("text", WARNING);
    Error::invalid_form(fields)
}

fn app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .configure(with_test_login)
        .service(home)
        .service(detail)
        .service(add_comment)
        .service(edit_form)
        .service(edit)
        .service(delete_form)
        .service(delete)
}

#[fixture]
fn ports() -> MockPorts {
    MockPorts::default()
}

#[rstest]
#[actix_web::test]
async fn home_lists_news(mut ports: MockPorts) {
    ports.news.expect_home().return_once(|| Ok(vec![news_item()]));
    let app = actix_test::init_service(app(ports)).await;

    let req = actix_test::TestRequest::get().uri("/").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["objectList"][0]["date"], "2024-05-01");
}

#[rstest]
#[actix_web::test]
async fn anonymous_detail_has_no_form(mut ports: MockPorts) {
    ports.news.expect_detail().return_once(|_| Ok(news_detail()));
    let app = actix_test::init_service(app(ports)).await;

    let req = actix_test::TestRequest::get().uri("/news/4/").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["news"]["title"], "Заголовок");
    assert_eq!(body["news"]["comments"][0]["id"], 9);
    assert!(body.get("form").is_none());
}

#[rstest]
#[actix_web::test]
async fn readers_get_a_comment_form(mut ports: MockPorts) {
    ports.news.expect_detail().return_once(|_| Ok(news_detail()));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::get().uri("/news/4/").cookie(cookie).to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["form"]["name"], "CommentForm");
}

#[rstest]
#[actix_web::test]
async fn missing_news_is_not_found(mut ports: MockPorts) {
    ports
        .news
        .expect_detail()
        .return_once(|_| Err(Error::not_found("news 404 not found")));
    let app = actix_test::init_service(app(ports)).await;

    let req = actix_test::TestRequest::get().uri("/news/404/").to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn anonymous_comments_go_to_login(mut ports: MockPorts) {
    ports.comments.expect_add().never();
    let app = actix_test::init_service(app(ports)).await;

    let req = actix_test::TestRequest::post()
        .uri("/news/4/")
        .set_form([("text", "Текст")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/auth/login/?next=/news/4/"));
}

#[rstest]
#[actix_web::test]
async fn stored_comments_redirect_to_the_thread(mut ports: MockPorts) {
    ports
        .comments
        .expect_add()
        .withf(|news, author, input| {
            *news == NewsId::new(4) && *author == UserId::new(READER) && input.text == "Текст"
        })
        .times(1)
        .return_once(|_, _, _| Ok(comment()));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::post()
        .uri("/news/4/")
        .cookie(cookie)
        .set_form([("text", "Текст")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/news/4/#comments"));
}

#[rstest]
#[actix_web::test]
async fn moderated_comments_rerender_the_detail_page(mut ports: MockPorts) {
    ports.comments.expect_add().return_once(|_, _, _| Err(moderated()));
    ports.news.expect_detail().return_once(|_| Ok(news_detail()));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::post()
        .uri("/news/4/")
        .cookie(cookie)
        .set_form([("text", "негодяй")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["form"]["errors"]["text"], json!([WARNING]));
    assert_eq!(body["form"]["data"]["text"], "негодяй");
    assert_eq!(body["news"]["id"], 4);
}

#[rstest]
#[actix_web::test]
async fn edit_form_is_prefilled(mut ports: MockPorts) {
    ports
        .comments
        .expect_get_owned()
        .withf(|user, id| *user == UserId::new(READER) && *id == CommentId::new(9))
        .return_once(|_, _| Ok(comment()));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::get()
        .uri("/edit_comment/9/")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["form"]["data"]["text"], "Текст комментария");
    assert_eq!(body["object"]["id"], 9);
}

#[rstest]
#[actix_web::test]
async fn foreign_comments_are_not_found(mut ports: MockPorts) {
    ports
        .comments
        .expect_delete()
        .return_once(|_, _| Err(Error::not_found("comment not found")));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, 3).await;

    let req = actix_test::TestRequest::post()
        .uri("/delete_comment/9/")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn edits_redirect_to_the_thread(mut ports: MockPorts) {
    ports.comments.expect_edit().return_once(|_, _, input| {
        Ok(Comment {
            text: input.text.clone(),
            ..comment()
        })
    });
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::post()
        .uri("/edit_comment/9/")
        .cookie(cookie)
        .set_form([("text", "Обновлённый комментарий")])
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/news/4/#comments"));
}

#[rstest]
#[actix_web::test]
async fn deletes_redirect_to_the_thread(mut ports: MockPorts) {
    ports
        .comments
        .expect_delete()
        .return_once(|_, _| Ok(NewsId::new(4)));
    let app = actix_test::init_service(app(ports)).await;
    let cookie = login_cookie(&app, READER).await;

    let req = actix_test::TestRequest::post()
        .uri("/delete_comment/9/")
        .cookie(cookie)
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/news/4/#comments"));
}
