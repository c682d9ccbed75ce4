use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    AppState,
    error::{AppError, AppResult},
    forms::{AddForm, FieldErrors, RateForm},
    models::Candidate,
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.list_all().await?;
    Ok(Html(templates::list_page(&movies)))
}

pub async fn add_form() -> Html<String> {
    Html(templates::add_page(&AddForm::default(), &FieldErrors::default()))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let title = match form.validate() {
        Ok(title) => title,
        Err(errors) => return Ok(invalid(templates::add_page(&form, &errors))),
    };

    let results = state.tmdb.search_movies(&title).await?;

    let mut candidates = Vec::with_capacity(results.len());
    for result in results {
        let existing_id = state.store.find_by_title(&result.title).await?.map(|m| m.id);
        candidates.push(Candidate { result, existing_id });
    }

    Ok(Html(templates::select_page(&title, &candidates)).into_response())
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(tmdb_id): Path<i32>,
) -> AppResult<Redirect> {
    let details = state.tmdb.movie_details(tmdb_id).await?;
    let movie = state.store.insert(state.tmdb.to_new_movie(details)).await?;

    info!(tmdb_id = tmdb_id, movie_id = movie.id, title = %movie.title, "movie added");
    Ok(Redirect::to(&format!("/edit/{}", movie.id)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = state.store.get(id).await?.ok_or_else(|| AppError::movie_not_found(id))?;
    let form = RateForm::from_movie(&movie);
    Ok(Html(templates::edit_page(&movie, &form, &FieldErrors::default())))
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let rating = match form.validate() {
        Ok(rating) => rating,
        Err(errors) => {
            let movie =
                state.store.get(id).await?.ok_or_else(|| AppError::movie_not_found(id))?;
            return Ok(invalid(templates::edit_page(&movie, &form, &errors)));
        },
    };

    state.store.update_review(id, rating.rating, rating.review).await?;
    info!(movie_id = id, rating = rating.rating, "movie reviewed");

    Ok(Redirect::to("/").into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state.store.delete(id).await?;
    info!(movie_id = id, "movie deleted");
    Ok(Redirect::to("/"))
}

fn invalid(body: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}
