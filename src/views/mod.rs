//! Server-rendered storefront and admin pages.

pub mod admin;
pub mod layout;
pub mod storefront;

pub use admin::admin_router;
pub use storefront::storefront;
