pub mod order_items;
pub mod orders;
pub mod profiles;
pub mod users;

pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use profiles::Entity as Profiles;
pub use users::Entity as Users;
