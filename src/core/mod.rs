pub mod derivation;
pub mod sessions;

pub use derivation::{derive_record, derive_trade_metrics, DerivationInput, DerivedFields};
pub use sessions::{SessionWindow, SESSION_WINDOWS};
