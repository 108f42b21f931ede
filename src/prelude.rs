pub use crate::{config::Config, html::Html, result::Result, AppState};
