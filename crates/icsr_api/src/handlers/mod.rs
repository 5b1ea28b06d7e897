pub mod cases;
pub mod fields;

pub async fn health_check() -> &'static str {
    "OK"
}
