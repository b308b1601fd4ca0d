//! Askama templates for the web frontend.

use askama::Template;

/// Map page with the start/finish form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Miles between stops, shown in the page copy
    pub interval_miles: f64,
    pub mpg: f64,
}
