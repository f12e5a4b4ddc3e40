mod auth;
mod dashboard;
mod objectives;
mod payroll;
mod profile;
mod recurring;
mod settings;
mod transactions;

pub use auth::AuthScreen;
pub use dashboard::DashboardPage;
pub use objectives::ObjectivesPage;
pub use payroll::PayrollPage;
pub use profile::ProfilePage;
pub use settings::SettingsPage;
pub use transactions::TransactionsPage;
