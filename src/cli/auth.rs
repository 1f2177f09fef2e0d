use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{spotify, types::PkceToken};

pub async fn auth() {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    spotify::auth::auth(shared_state).await;
}
