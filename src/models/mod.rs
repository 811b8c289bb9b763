pub mod account;
pub mod activity;
pub mod branding;
pub mod company;
pub mod post;

pub use account::{Account, AccountView, Role, Tier};
pub use activity::UserActivity;
pub use branding::Branding;
pub use company::{Company, SubscriptionType};
pub use post::PostRecord;
