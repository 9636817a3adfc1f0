//! Build-time Store Configuration
//!
//! `TASK_BOARD_STORE_URL` and `TASK_BOARD_ANON_KEY` are read when the
//! frontend is compiled; the URL falls back to the local development stack.

use task_store::{StoreConfig, StoreResult};

pub fn store_config() -> StoreResult<StoreConfig> {
    StoreConfig::from_parts(
        option_env!("TASK_BOARD_STORE_URL"),
        option_env!("TASK_BOARD_ANON_KEY"),
    )
}
