use axum::{extract::Path, http::StatusCode, Json};
use icsr_core::{get_field_definition, FieldDefinition};

pub async fn get_field(
    Path(id): Path<String>,
) -> Result<Json<&'static FieldDefinition>, (StatusCode, String)> {
    get_field_definition(&id)
        .map(Json)
        .map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}
