pub mod errors;
pub mod services;
pub mod session;
pub mod state;
pub mod time;
pub mod utils;
pub mod validation;

pub use errors::{CoreError, CoreResult, StoreError};
pub use session::ExpenseSession;
pub use state::AppState;
pub use time::{Clock, FixedClock, SystemClock};
