use strum_macros::{Display, EnumIter};

/// Pages of the client. The backend serves `index.html` for each of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Route {
    Landing,
    Predict,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Predict => "/predict",
        }
    }

    /// Unknown paths land on the home page.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/predict" => Route::Predict,
            _ => Route::Landing,
        }
    }
}
