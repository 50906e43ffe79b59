use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    body::HttpBody,
    BoxError, Router,
};
use serde_json::{json, Value};
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, not_found, ServerError};

pub const API_PREFIX: &str = "/api";

pub fn router<B>(state: AppState) -> Router<(), B>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    let books = Router::new()
        .route("/books", get(list_books).post(add_book))
        .route("/books/:id",
               get(find_book_by_id).put(update_book).delete(remove_book));
    Router::new()
        .nest(API_PREFIX, books)
        .with_state(state)
}

// every request runs in its own unit of work
async fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.store, &state.memory).await
}

pub async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListBooksCommand::new(svc).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

pub async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<Json<BookDto>, ServerError> {
    let svc = build_service(&state).await;
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest::new(book_id)).await?;
    res.book.map(Json).ok_or_else(|| not_found(format!("book {} not found", book_id)))
}

pub async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<BookDto>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = AddBookCommand::new(svc).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res.book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    json: Json<Value>) -> Result<StatusCode, ServerError> {
    let req: UpdateBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    if req.id != book_id {
        return Err((StatusCode::BAD_REQUEST, Json(json!({
            "field": "id",
            "message": format!("path id {} does not match body id {}", book_id, req.id),
        }))));
    }
    let svc = build_service(&state).await;
    let res = UpdateBookCommand::new(svc).execute(req).await?;
    if res.updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("book {} not found", book_id)))
    }
}

pub async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<StatusCode, ServerError> {
    let svc = build_service(&state).await;
    let res = RemoveBookCommand::new(svc).execute(RemoveBookCommandRequest::new(book_id)).await?;
    if res.removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("book {} not found", book_id)))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use axum::body::Body;
    use axum::extract::{Path, State};
    use axum::http::{Request, StatusCode};
    use axum::response::Json;
    use lambda_http::tower::ServiceExt;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use crate::catalog::controller::{add_book, find_book_by_id, list_books, remove_book, router, update_book};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    fn build_state() -> AppState {
        AppState::new(Configuration::new("test"), RepositoryStore::Memory)
    }

    #[tokio::test]
    async fn test_should_serve_book_lifecycle() {
        let state = build_state();

        let (status, Json(book)) = add_book(State(state.clone()),
                                            Json(json!({"id": 7, "title": " A ", "author": "Author1", "price": 10})))
            .await.expect("should add book");
        assert_eq!(StatusCode::CREATED, status);
        assert_eq!(1, book.id);
        assert_eq!("A", book.title.as_str());

        let Json(books) = list_books(State(state.clone())).await.expect("should list books");
        assert_eq!(vec![book.clone()], books);

        let status = update_book(State(state.clone()), Path(1),
                                 Json(json!({"id": 1, "title": "New", "author": "Author1", "price": 20})))
            .await.expect("should update book");
        assert_eq!(StatusCode::NO_CONTENT, status);

        let Json(loaded) = find_book_by_id(State(state.clone()), Path(1)).await.expect("should get book");
        assert_eq!("New", loaded.title.as_str());
        assert_eq!(dec!(20), loaded.price);

        let status = remove_book(State(state.clone()), Path(1)).await.expect("should remove book");
        assert_eq!(StatusCode::NO_CONTENT, status);

        let (status, _) = find_book_by_id(State(state), Path(1)).await.expect_err("book should be gone");
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_reject_bad_requests() {
        let state = build_state();

        let (status, Json(body)) = add_book(State(state.clone()),
                                            Json(json!({"title": "A", "author": "B", "price": -1})))
            .await.expect_err("negative price should fail");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("price", body["field"]);

        let (status, _) = add_book(State(state.clone()), Json(json!({"title": "A"})))
            .await.expect_err("incomplete body should fail");
        assert_eq!(StatusCode::BAD_REQUEST, status);

        let (status, Json(body)) = update_book(State(state.clone()), Path(1),
                                               Json(json!({"id": 2, "title": "A", "author": "B", "price": 1})))
            .await.expect_err("id mismatch should fail");
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("id", body["field"]);
        assert!(state.memory.is_empty().await);
    }

    #[tokio::test]
    async fn test_should_report_missing_books() {
        let state = build_state();

        let (status, _) = update_book(State(state.clone()), Path(3),
                                      Json(json!({"id": 3, "title": "A", "author": "B", "price": 1})))
            .await.expect_err("missing book should fail");
        assert_eq!(StatusCode::NOT_FOUND, status);

        let (status, _) = remove_book(State(state), Path(3)).await.expect_err("missing book should fail");
        assert_eq!(StatusCode::NOT_FOUND, status);
    }

    #[tokio::test]
    async fn test_should_keep_price_precision() {
        let state = build_state();
        let body: Value = serde_json::from_str(r#"{"title":"A","author":"B","price":12345678901234.56789}"#)
            .expect("should parse body");
        let (_, Json(book)) = add_book(State(state.clone()), Json(body)).await.expect("should add book");

        let expected = Decimal::from_str("12345678901234.56789").expect("should parse decimal");
        assert_eq!(expected, book.price);
        let wire = serde_json::to_string(&book).expect("should serialize book");
        assert!(wire.contains(r#""price":12345678901234.56789"#), "{}", wire);

        let Json(loaded) = find_book_by_id(State(state), Path(book.id)).await.expect("should get book");
        assert_eq!(expected, loaded.price);
    }

    #[tokio::test]
    async fn test_should_route_books_under_api_prefix() {
        let state = build_state();

        let res = router(state.clone())
            .oneshot(Request::builder()
                .method("POST")
                .uri("/api/books")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"title":"A","author":"B","price":1}"#))
                .expect("should build request"))
            .await.expect("router should respond");
        assert_eq!(StatusCode::CREATED, res.status());

        let res = router(state.clone())
            .oneshot(Request::builder().uri("/api/books/1").body(Body::empty()).expect("should build request"))
            .await.expect("router should respond");
        assert_eq!(StatusCode::OK, res.status());

        let res = router(state.clone())
            .oneshot(Request::builder().method("DELETE").uri("/api/books/2").body(Body::empty()).expect("should build request"))
            .await.expect("router should respond");
        assert_eq!(StatusCode::NOT_FOUND, res.status());

        let res = router(state)
            .oneshot(Request::builder().uri("/books").body(Body::empty()).expect("should build request"))
            .await.expect("router should respond");
        assert_eq!(StatusCode::NOT_FOUND, res.status());
    }
}
