//! Application use cases (dashboard data orchestration).

mod load_admin_dashboard;
mod load_customer_dashboard;
mod view_proposal;

pub use load_admin_dashboard::{AdminDashboardView, LoadAdminDashboard};
pub use load_customer_dashboard::{CustomerDashboardView, LoadCustomerDashboard};
pub use view_proposal::ViewProposal;
