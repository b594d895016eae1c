use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use morphsearch_lexicon::IrregularLexicon;
use morphsearch_stem::stem_with;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::pattern::{FragmentSource, MatchFragment, PatternBuilder};
use crate::search::{Match, Matcher, SearchError};

pub const MAX_QUERY_WORDS: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<IrregularLexicon>,
}

#[derive(Deserialize)]
pub struct PatternQuery {
    pub words: String,
}

#[derive(Deserialize)]
pub struct StemQuery {
    pub word: String,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub words: Vec<String>,
    pub text: String,
    #[serde(default)]
    pub ignore_case: bool,
}

#[derive(Serialize)]
pub struct FragmentView {
    word: String,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    pattern: String,
}

#[derive(Serialize)]
pub struct PatternResponse {
    words: Vec<String>,
    pattern: String,
    fragments: Vec<FragmentView>,
}

#[derive(Serialize)]
pub struct SynsetView {
    id: u32,
    forms: Vec<String>,
}

#[derive(Serialize)]
pub struct IrregularView {
    class: String,
    synsets: Vec<SynsetView>,
}

#[derive(Serialize)]
pub struct StemResponse {
    word: String,
    stem: String,
    irregular: Option<IrregularView>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pattern: String,
    matches: Vec<Match>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/pattern", get(pattern))
        .route("/v1/stem", get(stem))
        .route("/v1/search", post(search))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn pattern(
    State(state): State<AppState>,
    Query(params): Query<PatternQuery>,
) -> Result<Json<PatternResponse>, ApiError> {
    let words = parse_words(params.words.split_whitespace().map(str::to_owned))?;
    let query = PatternBuilder::new(&state.lexicon).compose_query(&words);
    debug!("pattern for {:?}: {}", words, query);

    Ok(Json(PatternResponse {
        pattern: query.to_string(),
        fragments: query.fragments().iter().map(FragmentView::from).collect(),
        words,
    }))
}

async fn stem(
    State(state): State<AppState>,
    Query(params): Query<StemQuery>,
) -> Result<Json<StemResponse>, ApiError> {
    let word = params.word.trim();
    if word.is_empty() {
        return Err(ApiError::bad_request("word is required"));
    }

    let lexicon = &state.lexicon;
    let outcome = stem_with(word, |cand| lexicon.find(cand));
    let irregular = outcome.irregular.map(|hit| IrregularView {
        class: hit.class.to_string(),
        synsets: hit
            .ids
            .iter()
            .map(|id| SynsetView {
                id: id.get(),
                forms: lexicon
                    .forms_of(hit.class, *id)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
            })
            .collect(),
    });

    Ok(Json(StemResponse {
        word: word.to_string(),
        stem: outcome.stem,
        irregular,
    }))
}

async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let words = parse_words(
        request
            .words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .map(str::to_owned),
    )?;
    let query = PatternBuilder::new(&state.lexicon).compose_query(&words);
    let matcher = Matcher::new(&query, !request.ignore_case)?;

    Ok(Json(SearchResponse {
        pattern: matcher.as_str().to_string(),
        matches: matcher.find_all(&request.text),
    }))
}

fn parse_words(words: impl Iterator<Item = String>) -> Result<Vec<String>, ApiError> {
    let words: Vec<String> = words.collect();
    if words.is_empty() {
        return Err(ApiError::bad_request("words is required"));
    }
    if words.len() > MAX_QUERY_WORDS {
        return Err(ApiError::bad_request(format!(
            "at most {MAX_QUERY_WORDS} words are allowed"
        )));
    }
    Ok(words)
}

impl From<&MatchFragment> for FragmentView {
    fn from(fragment: &MatchFragment) -> Self {
        let (source, stem, class) = match fragment.source() {
            FragmentSource::Irregular { class } => ("irregular", None, Some(class.to_string())),
            FragmentSource::Literal => ("literal", None, None),
            FragmentSource::Stem { stem } => ("stem", Some(stem.clone()), None),
            FragmentSource::StemIrregular { stem, class } => (
                "stem_irregular",
                Some(stem.clone()),
                Some(class.to_string()),
            ),
        };
        FragmentView {
            word: fragment.word().to_string(),
            source,
            stem,
            class,
            pattern: fragment.as_str().to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => ApiError::bad_request("words is required"),
            SearchError::Pattern(source) => {
                error!("generated pattern failed to compile: {source}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
