//! Routed views

mod dashboard;
mod login;
mod not_found;
mod products;
mod settings;
mod users;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use products::ProductsPage;
pub use settings::SettingsPage;
pub use users::UsersPage;
