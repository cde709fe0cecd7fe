use crate::error::ServerResult;
use crate::middleware::SubmitterAddr;
use crate::state::ServerState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use ingest::{FormPart, MultipartForm};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use tracing::debug;

/// Body returned for every accepted submission
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LprResponse {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl LprResponse {
    fn success() -> Self {
        Self {
            status: "success".to_string(),
            code: 200,
            message: "LPR data processed successfully".to_string(),
        }
    }
}

/// Camera event endpoint
///
/// Accepts the multipart submission, runs it through the ingestion pipeline and
/// acknowledges as soon as the capture is mapped. Archiving and processing
/// continue in the background.
pub async fn receive_event(
    State(state): State<Arc<ServerState>>,
    SubmitterAddr(submitter): SubmitterAddr,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<impl IntoResponse> {
    let form = match multipart {
        Ok(multipart) => read_form(multipart).await,
        Err(rejection) => {
            debug!(ip = %submitter, error = %rejection, "request is not multipart");
            None
        }
    };

    // dropping the dispatch handle leaves archiving and processing detached
    let _accepted = state.orchestrator.ingest(form, &submitter).await?;

    Ok(Json(LprResponse::success()))
}

/// Buffer every named field into a [`MultipartForm`].
///
/// A broken multipart envelope yields `None`, unless some fields were
/// already read, in which case those are kept. A field whose body fails
/// mid-read is kept as a failed part. Either way reading stops there, since
/// the stream cannot be resumed.
async fn read_form(mut multipart: Multipart) -> Option<MultipartForm> {
    let mut form = MultipartForm::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) if form.is_empty() => {
                debug!(error = %err, "malformed multipart body");
                return None;
            }
            Err(err) => {
                debug!(error = %err, "multipart body ended early, keeping parts read so far");
                break;
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        match field.bytes().await {
            Ok(data) => form.push(name, FormPart::from_bytes(file_name, content_type, data)),
            Err(err) => {
                debug!(part = %name, error = %err, "multipart field failed mid-read");
                let err = io::Error::other(err.to_string());
                form.push(name, FormPart::failed(file_name, content_type, err));
                break;
            }
        }
    }

    Some(form)
}
