use actix_files::{Files, NamedFile};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, ResponseError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::query::{QueryError, QueryService};
use crate::store::QuestionPair;

#[cfg(test)]
mod tests;

const API_BANNER: &str = "Robotics Test Portal API";
const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct AppState {
    pub queries: QueryService,
    pub static_dir: PathBuf,
}

/// Presentation mode requested by the front-end. Both modes receive the same
/// questions, answers included; hiding answers is up to the client.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Flashcards,
    Test,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Flashcards
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    category: String,
    #[serde(default)]
    mode: Mode,
    #[serde(default = "default_page_size")]
    limit: i64,
    #[serde(default)]
    offset: usize,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    category: String,
    question: String,
    answer: String,
}

#[derive(Serialize)]
struct CategoriesResponse<'a> {
    categories: Vec<&'a str>,
}

#[derive(Serialize)]
struct QuestionsResponse<'a> {
    items: &'a [QuestionPair],
}

#[derive(Serialize)]
struct Banner {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

impl ResponseError for QueryError {
    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}

#[get("/")]
async fn index(state: web::Data<AppState>, request: HttpRequest) -> HttpResponse {
    match NamedFile::open(state.static_dir.join("index.html")) {
        Ok(file) => file.into_response(&request),
        Err(_) => HttpResponse::Ok().json(Banner {
            message: API_BANNER,
        }),
    }
}

#[get("/api/categories")]
async fn categories(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(CategoriesResponse {
        categories: state.queries.list_categories(),
    })
}

#[get("/api/questions")]
async fn questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionsQuery>,
) -> Result<HttpResponse, QueryError> {
    debug!(
        "Questions for {:?} in {:?} mode (limit {}, offset {})",
        query.category, query.mode, query.limit, query.offset
    );
    let items = state
        .queries
        .get_questions(&query.category, query.limit, query.offset)?;
    Ok(HttpResponse::Ok().json(QuestionsResponse { items }))
}

#[post("/api/check")]
async fn check(
    state: web::Data<AppState>,
    body: web::Json<CheckRequest>,
) -> Result<HttpResponse, QueryError> {
    let result = state
        .queries
        .check_answer(&body.category, &body.question, &body.answer)?;
    Ok(HttpResponse::Ok().json(result))
}

pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let static_dir = state.static_dir.clone();
    cfg.app_data(state)
        .service(index)
        .service(categories)
        .service(questions)
        .service(check);
    if static_dir.is_dir() {
        cfg.service(Files::new("/static", static_dir));
    }
}
