pub mod cli;
pub mod remote;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod server;

pub use cli::Cli;
pub use remote::{Cloner, RemoteError, Workspace};
pub use report::{ReportEntry, aggregate};
pub use rules::ScanMode;
pub use scanner::{RawFinding, scan};
pub use server::{AppState, build_router};
