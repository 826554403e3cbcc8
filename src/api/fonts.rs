use crate::error::{Result, ServiceError};
use crate::state::AppState;
use crate::storage::sanitize_file_name;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};

pub const FONTS_FIELD: &str = "fonts";

/// Store uploaded fonts in the font directory.
///
/// Parts without a file name or with an empty body are skipped. The first
/// failed write ends the request; fonts written before it stay on disk.
pub async fn upload_fonts(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String> {
    let mut provided = 0usize;
    let mut stored = 0usize;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(FONTS_FIELD) {
            continue;
        }
        provided += 1;

        let original = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await.map_err(read_error)?;

        let Some(original) = original else {
            tracing::debug!("Skipping font part without a file name");
            continue;
        };
        if bytes.is_empty() {
            tracing::debug!("Skipping empty font '{}'", original);
            continue;
        }
        let Some(file_name) = sanitize_file_name(&original) else {
            tracing::warn!("Skipping font with unusable file name '{}'", original);
            continue;
        };

        state
            .font_store
            .store(file_name, &bytes)
            .await
            .map_err(|e| ServiceError::Storage {
                file_name: original.clone(),
                message: e.to_string(),
            })?;

        if file_name != original {
            tracing::info!("Stored font '{}' as '{}'", original, file_name);
        } else {
            tracing::info!("Stored font '{}'", file_name);
        }
        stored += 1;
    }

    if provided == 0 {
        return Err(ServiceError::InvalidRequest(
            "No font files provided.".to_string(),
        ));
    }
    if stored == 0 {
        return Err(ServiceError::InvalidRequest(
            "No valid font files were uploaded.".to_string(),
        ));
    }

    Ok(format!("Stored {} font file(s).", stored))
}

/// List the fonts currently in the font directory.
pub async fn list_fonts(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let names = state
        .font_store
        .list()
        .await
        .map_err(|e| ServiceError::FontListing(e.to_string()))?;

    Ok(Json(names))
}

pub(crate) fn read_error(err: MultipartError) -> ServiceError {
    ServiceError::InputRead(err.body_text())
}
