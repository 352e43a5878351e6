//! Request extractors that turn axum rejections into `DartsError`.

pub mod json_body;
pub mod params;
