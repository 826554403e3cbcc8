use crate::api::fonts::read_error;
use crate::error::{Result, ServiceError};
use crate::pipeline::RenderRequest;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const XML_FIELD: &str = "xml";
pub const XSL_FIELD: &str = "xsl";

/// Render from two uploaded files, `xml` and `xsl`.
pub async fn render_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut xml = None;
    let mut xsl = None;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let slot = match field.name() {
            Some(XML_FIELD) => &mut xml,
            Some(XSL_FIELD) => &mut xsl,
            _ => continue,
        };
        *slot = Some(field.bytes().await.map_err(read_error)?);
    }

    let request = RenderRequest {
        xml: required(xml, XML_FIELD)?,
        xsl: required(xsl, XSL_FIELD)?,
    };

    tracing::info!(
        "Render request from files (xml {} bytes, xsl {} bytes)",
        request.xml.len(),
        request.xsl.len()
    );

    render(&state, request).await
}

/// Render from two text fields, `xml` and `xsl`.
pub async fn render_strings(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut xml = None;
    let mut xsl = None;

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let slot = match field.name() {
            Some(XML_FIELD) => &mut xml,
            Some(XSL_FIELD) => &mut xsl,
            _ => continue,
        };
        let text = field.text().await.map_err(read_error)?;
        *slot = Some(Bytes::from(text.into_bytes()));
    }

    let request = RenderRequest {
        xml: required(xml, XML_FIELD)?,
        xsl: required(xsl, XSL_FIELD)?,
    };

    tracing::info!(
        "Render request from strings (xml {} bytes, xsl {} bytes)",
        request.xml.len(),
        request.xsl.len()
    );

    render(&state, request).await
}

async fn render(state: &AppState, request: RenderRequest) -> Result<Response> {
    let pdf_bytes = state.pipeline.render(&request).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"document.pdf\"",
            ),
        ],
        pdf_bytes,
    )
        .into_response())
}

fn required(part: Option<Bytes>, name: &str) -> Result<Bytes> {
    part.ok_or_else(|| ServiceError::InvalidRequest(format!("Missing required part '{}'.", name)))
}
