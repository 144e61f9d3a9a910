use crate::models::response::{ErrorResponse, SendCommandRequest, StatusResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

const MISSING_FIELDS: &str = "Missing command or chat_id";
const FORWARD_FAILED: &str = "Failed to send command to bot";

type RelayResult = Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)>;

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub async fn send_command(
    State(app_state): State<AppState>,
    payload: Result<Json<SendCommandRequest>, JsonRejection>,
) -> RelayResult {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected relay request body: {}", rejection.body_text());
            return Err(error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS));
        }
    };

    let Some((command, chat_id)) = request.validated() else {
        return Err(error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS));
    };

    info!("Relaying command to chat {:?}", chat_id);

    match app_state.sender.send_text(chat_id, command).await {
        Ok(()) => Ok(Json(StatusResponse {
            status: "Command sent successfully".to_string(),
        })),
        Err(e) => {
            error!("Failed to relay command: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                FORWARD_FAILED,
            ))
        }
    }
}
