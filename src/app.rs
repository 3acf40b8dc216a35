use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use log::info;
use serde::Deserialize;
use std::fmt::Display;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::answer::{Answer, ExtendedQuestionData, ListData};
use crate::api::CreatedSurvey;
use crate::config::Config;
use crate::downloader::{self, XLSX_CONTENT_TYPE, workbook_file_name};
use crate::error::AppError;
use crate::form::{CoverImage, SurveyForm};
use crate::render;
use crate::results::ResultGrid;
use crate::selection::{ResponseInput, Selection};
use crate::store::{IMAGES_ROUTE, SurveyRecord, SurveyStore, SurveySummary};

pub struct AppState {
    store: Arc<SurveyStore>,
}

#[derive(Deserialize)]
struct ListQuery {
    #[serde(rename = "userId")]
    user_id: Option<u64>,
}

#[derive(Deserialize)]
struct ResponseSubmission {
    answers: Vec<Answer>,
}

fn internal(e: impl Display) -> AppError {
    AppError::InternalError(e.to_string().into())
}

/// Build the router over `store`.
pub fn router(store: Arc<SurveyStore>) -> Router {
    let images = ServeDir::new(store.images_dir());
    let app_state = Arc::new(AppState { store });

    Router::new()
        .route("/api/surveys", get(list_surveys).post(create_survey))
        .route("/api/surveys/:id", get(get_survey))
        .route("/api/surveys/:id/responses", axum::routing::post(record_response))
        .route("/api/surveys/:id/results", get(get_results))
        .route("/api/surveys/:id/grid", get(get_grid))
        .route("/api/surveys/:id/excel", get(download_excel))
        .route("/surveys/:id/respond", get(serve_respond_page))
        .route("/surveys/:id/responses/:n", get(serve_response_page))
        .nest_service(IMAGES_ROUTE, images)
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(SurveyStore::open(&config.database_dir)?);
    let app = router(store);

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{address}");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn create_survey(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = SurveyForm::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("unknown").to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?.to_vec();
                if !bytes.is_empty() {
                    form.push_file(
                        &name,
                        CoverImage {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
            }
            None => {
                let value = field.text().await?;
                form.push_text(&name, value);
            }
        }
    }

    let submission = form.to_submission()?;
    let record = state.store.create(submission)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedSurvey {
            survey_id: record.survey_id,
        }),
    ))
}

async fn list_surveys(
    Query(params): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SurveySummary>> {
    Json(state.store.list(params.user_id))
}

async fn get_survey(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SurveyRecord>, AppError> {
    Ok(Json(state.store.get(id)?))
}

async fn record_response(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResponseSubmission>,
) -> Result<StatusCode, AppError> {
    state.store.record_response(id, payload.answers)?;
    Ok(StatusCode::CREATED)
}

async fn get_results(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListData>, AppError> {
    Ok(Json(state.store.list_data(id)?))
}

async fn get_grid(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResultGrid>, AppError> {
    let list = state.store.list_data(id)?;
    Ok(Json(ResultGrid::from_list(&list)?))
}

async fn download_excel(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store.get(id)?;
    let list = state.store.list_data(id)?;
    let buffer = downloader::to_xlsx(&list).map_err(internal)?;

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&workbook_file_name(&record.title))
    );
    info!("Serving workbook for survey {id} ({} rows)", list.rows.len());

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

async fn serve_respond_page(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let record = state.store.get(id)?;

    let questions = record
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let input = ResponseInput::new(question.clone(), |_: &Selection| {});
            render::render_response(&input, i + 1, record.color.as_str())
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;

    let page = render::render_page(&record.title, &record.description, record.font, &questions)
        .map_err(internal)?;
    Ok(Html(page))
}

async fn serve_response_page(
    Path((id, n)): Path<(u64, usize)>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let record = state.store.get(id)?;
    let responses = state.store.responses(id)?;
    let response = n
        .checked_sub(1)
        .and_then(|i| responses.get(i))
        .ok_or(AppError::NotFound)?;

    let skipped = Answer::Skipped;
    let questions = record
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = response.answers.get(i).unwrap_or(&skipped);
            let extended = ExtendedQuestionData::new(question.clone(), answer);
            render::render_static(&extended, i + 1, record.color.as_str())
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;

    let page = render::render_page(&record.title, &record.description, record.font, &questions)
        .map_err(internal)?;
    Ok(Html(page))
}
