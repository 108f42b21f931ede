use crate::result::AppError;

use askama::Template;
use axum::response::{self, IntoResponse, Response};
use minify_html::Cfg;

/// Renders a template and minifies the markup.
pub struct Html<T>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        let rendered = match self.0.render() {
            Ok(rendered) => rendered,
            Err(err) => return AppError::from(err).into_response(),
        };

        let minified = minify_html::minify(rendered.as_bytes(), &Cfg::new());

        return response::Html(String::from_utf8_lossy(&minified).into_owned()).into_response();
    }
}
