//! HTTP surface of the trade calculator
//!
//! | Route | Method | Handler |
//! |---|---|---|
//! | `/calculate` | POST | [`handlers::calculate`] |
//! | `/players` | GET | [`handlers::players`] |
//! | `/check_player_lockout` | GET, POST | [`handlers::check_player_lockout`] |
//! | `/health` | GET | [`handlers::health`] |
//! | `/admin/reload` | POST | [`handlers::admin_reload`] |

pub mod assembler;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use server::ApiServer;
