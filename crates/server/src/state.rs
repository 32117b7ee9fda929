use sea_orm::DatabaseConnection;

/// Shared handler state. `DatabaseConnection` is a pool handle and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
