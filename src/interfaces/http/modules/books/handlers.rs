//! Book REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{BookDto, CreateBookRequest, GenreDto, ListBooksParams, UpdateBookRequest};
use crate::application::BookService;
use crate::domain::book::{BookQuery, Genre};
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, PaginatedResponse, ValidatedJson, ValidatedQuery,
};
use crate::shared::pagination::PaginationParams;

/// Book handler state
#[derive(Clone)]
pub struct BookState {
    pub books: Arc<BookService>,
}

fn parse_query(params: &ListBooksParams) -> Result<BookQuery, ApiError> {
    let genre = match params.genre.as_deref().map(str::trim) {
        Some(g) if !g.is_empty() => Some(g.parse::<Genre>().map_err(|e| {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e)))
        })?),
        _ => None,
    };

    Ok(BookQuery {
        search: params.search.clone(),
        genre,
        min_rating: params.min_rating,
        sort: params.sort.unwrap_or_default(),
        order: params.order.unwrap_or_default(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "Books",
    params(ListBooksParams),
    responses(
        (status = 200, description = "Book list", body = ApiResponse<PaginatedResponse<BookDto>>),
        (status = 400, description = "Unknown genre or malformed query"),
        (status = 422, description = "Minimum rating outside 1..=5")
    )
)]
pub async fn list_books(
    State(state): State<BookState>,
    ValidatedQuery(params): ValidatedQuery<ListBooksParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookDto>>>, ApiError> {
    let query = parse_query(&params)?;
    let page = state
        .books
        .list_books(&query, PaginationParams::new(params.page, params.limit))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/genres",
    tag = "Books",
    responses(
        (status = 200, description = "Available genres", body = ApiResponse<Vec<GenreDto>>)
    )
)]
pub async fn list_genres(State(state): State<BookState>) -> Json<ApiResponse<Vec<GenreDto>>> {
    let genres = state
        .books
        .list_genres()
        .iter()
        .copied()
        .map(GenreDto::from)
        .collect();
    Json(ApiResponse::success(genres))
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "Books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = ApiResponse<BookDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_book(
    State(state): State<BookState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BookDto>>, ApiError> {
    let book = state.books.get_book(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(book.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "Books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<BookDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn create_book(
    State(state): State<BookState>,
    ValidatedJson(req): ValidatedJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookDto>>), ApiError> {
    let book = state
        .books
        .create_book(req.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(book.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "Books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<BookDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Invalid data")
    )
)]
pub async fn update_book(
    State(state): State<BookState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateBookRequest>,
) -> Result<Json<ApiResponse<BookDto>>, ApiError> {
    let book = state
        .books
        .update_book(id, req.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(book.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "Books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_book(
    State(state): State<BookState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.books.delete_book(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
