//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod budget;
pub mod cascade;
pub mod expense;
pub mod import;
pub mod organization;
pub mod player;
pub mod quick_entry;
pub mod reference;
pub mod report;
pub mod revenue;
pub mod season;
pub mod team;
pub mod user;

pub use budget::{BudgetError, BudgetFilter, BudgetRepository, CreateBudgetInput};
pub use expense::{CreateExpenseInput, ExpenseError, ExpenseFilter, ExpenseRepository};
pub use import::{DEFAULT_BATCH_SIZE, ImportError, ImportRepository};
pub use organization::{CreateOrganizationInput, OrganizationError, OrganizationRepository};
pub use player::{CreatePlayerInput, PlayerError, PlayerRepository};
pub use quick_entry::{
    BulkRegistrationInput, BulkRegistrationOutcome, QuickEntryError, QuickEntryRepository,
    QuickExpenseInput, QuickExpenseOutcome,
};
pub use reference::ReferenceError;
pub use report::{ReportError, ReportRepository};
pub use revenue::{CreateRevenueInput, RevenueError, RevenueFilter, RevenueRepository};
pub use season::{SeasonError, SeasonInput, SeasonRepository};
pub use team::{CreateTeamInput, TeamError, TeamRepository};
pub use user::{CreateUserInput, UserError, UserRepository};
