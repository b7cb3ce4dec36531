//! CSV import routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use huddle_core::import::{ImportEntity, ImportSummary, ensure_csv_filename, parse_csv};
use huddle_db::ImportRepository;
use tracing::{debug, info};

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the import router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/import/templates/{entity_type}", get(download_template))
        .route("/import/{entity_type}", post(import_csv))
}

/// Reads the first file field of the upload.
async fn read_csv_upload(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError::validation("No file uploaded"))?;

    ensure_csv_filename(field.file_name())?;
    let file_name = field.file_name().unwrap_or_default().to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::validation(format!("Could not read uploaded file: {e}")))?;
    debug!(file_name = %file_name, bytes = data.len(), "Received CSV upload");
    Ok(data.to_vec())
}

/// POST /import/{entity_type} - Import a CSV file, skipping bad rows.
async fn import_csv(
    State(state): State<AppState>,
    caller: Caller,
    Path(entity_type): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportSummary>), ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    let entity: ImportEntity = entity_type.parse()?;
    let data = read_csv_upload(&mut multipart).await?;

    let repo = ImportRepository::new((*state.db).clone(), state.import_batch_size);
    let reader = data.as_slice();
    let summary = match entity {
        ImportEntity::Organizations => repo.import_organizations(parse_csv(reader)?).await?,
        ImportEntity::Seasons => repo.import_seasons(parse_csv(reader)?).await?,
        ImportEntity::Teams => repo.import_teams(parse_csv(reader)?).await?,
        ImportEntity::Expenses => {
            repo.import_expenses(parse_csv(reader)?, caller.user_id())
                .await?
        }
        ImportEntity::Revenues => {
            repo.import_revenues(parse_csv(reader)?, caller.user_id())
                .await?
        }
    };

    info!(
        entity = entity.as_str(),
        created = summary.created,
        skipped = summary.errors.len(),
        "CSV import finished"
    );
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /import/templates/{entity_type} - Header-only CSV to fill in.
async fn download_template(Path(entity_type): Path<String>) -> Result<Response, ApiError> {
    let entity: ImportEntity = entity_type.parse()?;
    let disposition = format!("attachment; filename=\"{}\"", entity.template_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        entity.template(),
    )
        .into_response())
}
