use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::TleLoader;
use crate::config::Config;
use crate::tracker::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tracker: Arc<Mutex<Tracker>>,
    pub tle_loader: Arc<TleLoader>,
}
