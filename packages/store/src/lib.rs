// ABOUTME: Shared domain store for construction project dashboards
// ABOUTME: Owns every collection, enforces cross-entity rules, broadcasts changes, and derives metrics

pub mod derive;
pub mod error;
pub mod events;
pub mod fixtures;
mod queries;
pub mod state;
pub mod store;

pub use derive::{
    project_progress, AssigneeWorkload, BoardColumn, FinanceSummary, ProjectOverview,
    ProjectReport, TaskBoard,
};
pub use error::{EntityKind, StoreError, StoreResult};
pub use events::{Collection, StoreChange, StoreEvent};
pub use state::{StoreSnapshot, StoreState};
pub use store::ProjectStore;
