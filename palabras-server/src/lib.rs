use std::path::PathBuf;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::game_manager::GameManager;
use palabras_persistence::repositories::WordRepository;
use palabras_types::{
    AnswerRequest, ErrorResponse, GameError, GameMode, PointsRecord, ResetModeRequest,
    SessionRequest, SpeakRequest, StartSessionRequest,
};

pub mod config;
pub mod game_manager;

pub fn create_routes(
    game_manager: Arc<GameManager>,
    word_repository: Arc<WordRepository>,
    public_dir: PathBuf,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    let words_filter = warp::any().map({
        let word_repository = word_repository.clone();
        move || word_repository.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Word endpoints read the word file on every request
    let all_words = warp::path!("api" / "words")
        .and(warp::get())
        .and(words_filter.clone())
        .and_then(handle_all_words);

    let words_by_mode = warp::path!("api" / "words" / String)
        .and(warp::get())
        .and(words_filter)
        .and_then(handle_words_by_mode);

    // Points endpoints
    let get_points = warp::path!("api" / "points")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_get_points);

    let save_points = warp::path!("api" / "points")
        .and(warp::post())
        .and(warp::body::json::<PointsRecord>())
        .and(game_manager_filter.clone())
        .and_then(handle_save_points);

    let reset_points = warp::path!("api" / "points" / "reset")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_reset_points);

    // Session endpoints
    let start_session = warp::path!("api" / "session")
        .and(warp::post())
        .and(warp::body::json::<StartSessionRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_start_session);

    let get_session = warp::path!("api" / "session")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_get_session);

    let answer = warp::path!("api" / "session" / "answer")
        .and(warp::post())
        .and(warp::body::json::<AnswerRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_answer);

    let next = warp::path!("api" / "session" / "next")
        .and(warp::post())
        .and(warp::body::json::<SessionRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_next);

    let listen = warp::path!("api" / "session" / "listen")
        .and(warp::post())
        .and(warp::body::json::<SessionRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_listen);

    let reset_mode = warp::path!("api" / "session" / "reset-mode")
        .and(warp::post())
        .and(warp::body::json::<ResetModeRequest>())
        .and(game_manager_filter.clone())
        .and_then(handle_reset_mode);

    let speak = warp::path!("api" / "speak")
        .and(warp::post())
        .and(warp::body::json::<SpeakRequest>())
        .and(game_manager_filter)
        .and_then(handle_speak);

    // Static front end
    let index = warp::path::end()
        .and(warp::get())
        .and(warp::fs::file(public_dir.join("index.html")));
    let assets = warp::fs::dir(public_dir);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(all_words)
        .or(words_by_mode)
        .or(get_points)
        .or(save_points)
        .or(reset_points)
        .or(start_session)
        .or(get_session)
        .or(answer)
        .or(next)
        .or(listen)
        .or(reset_mode)
        .or(speak)
        .or(index)
        .or(assets)
        .with(cors)
        .with(warp::log("palabras"))
}

fn status_for(err: &GameError) -> StatusCode {
    match err {
        GameError::UnknownMode { .. } => StatusCode::BAD_REQUEST,
        GameError::NoActiveSession
        | GameError::StaleSession { .. }
        | GameError::InvalidSessionState { .. } => StatusCode::CONFLICT,
        GameError::WordsUnavailable | GameError::PointsUnavailable => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> warp::reply::Response {
    warp::reply::with_status(warp::reply::json(&ErrorResponse::new(message)), status).into_response()
}

fn json_reply<T: serde::Serialize>(
    result: Result<T, GameError>,
) -> Result<warp::reply::Response, warp::Rejection> {
    Ok(match result {
        Ok(body) => warp::reply::json(&body).into_response(),
        Err(err) => {
            tracing::debug!("Request rejected: {}", err);
            error_reply(status_for(&err), err.to_string())
        }
    })
}

async fn handle_all_words(
    word_repository: Arc<WordRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    match word_repository.all().await {
        Ok(words) => Ok(warp::reply::json(&words).into_response()),
        Err(err) => {
            tracing::error!("Failed to load words: {}", err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No se pudieron cargar las palabras",
            ))
        }
    }
}

async fn handle_words_by_mode(
    mode: String,
    word_repository: Arc<WordRepository>,
) -> Result<warp::reply::Response, warp::Rejection> {
    let mode: GameMode = match mode.parse() {
        Ok(mode) => mode,
        Err(err) => return json_reply::<()>(Err(GameError::from(err))),
    };

    match word_repository.by_mode(mode).await {
        Ok(words) => Ok(warp::reply::json(&words).into_response()),
        Err(err) => {
            tracing::error!("Failed to filter words for {}: {}", mode, err);
            Ok(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "No se pudieron filtrar las palabras",
            ))
        }
    }
}

async fn handle_get_points(
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(Ok(game_manager.points().await))
}

async fn handle_save_points(
    record: PointsRecord,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.restore_points(record).await)
}

async fn handle_reset_points(
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.reset_points().await)
}

async fn handle_start_session(
    request: StartSessionRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.start_session(request.mode).await)
}

async fn handle_get_session(
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(
        game_manager
            .snapshot()
            .await
            .ok_or(GameError::NoActiveSession),
    )
}

async fn handle_answer(
    request: AnswerRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(
        game_manager
            .submit_answer(request.session_id, &request.answer)
            .await,
    )
}

async fn handle_next(
    request: SessionRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.advance(request.session_id).await)
}

async fn handle_listen(
    request: SessionRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.listen(request.session_id).await)
}

async fn handle_reset_mode(
    request: ResetModeRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(game_manager.reset_mode(request.mode).await)
}

async fn handle_speak(
    request: SpeakRequest,
    game_manager: Arc<GameManager>,
) -> Result<warp::reply::Response, warp::Rejection> {
    json_reply(Ok(game_manager.speak(&request.text).await))
}
