//! Domain models for the admin panel.

pub mod admin_user;
pub mod item;
pub mod session;
pub mod staff;
pub mod transaction;

pub use admin_user::AdminUser;
pub use item::{InventoryItem, ItemInput};
pub use session::{CurrentAdmin, keys as session_keys};
pub use staff::{StaffInput, StaffMember};
pub use transaction::{NewTransaction, StockTransaction};
