// ── Primitives ──
pub mod address;
pub mod dater;

// ── Analysis pipeline ──
pub mod analysis;
pub mod balance;
pub mod compare;
pub mod pricing;

// ── Client side ──
pub mod backend;
pub mod workspace;

pub use analysis::{AnalysisInput, Analyzer};
pub use backend::BackendClient;
pub use balance::resolve_month_back;
pub use dater::BlockDater;
pub use workspace::init_workspace;
