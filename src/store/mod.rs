pub mod storage;
pub mod summary;
pub mod types;

pub use storage::{get_store_path, load_store, save_store};
pub use summary::{summarize, DashboardSummary};
pub use types::{StoredValuation, ValuationStore};
