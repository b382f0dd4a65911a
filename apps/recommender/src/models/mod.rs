pub mod preferences;
pub mod product;

pub use preferences::UserPreferences;
pub use product::Product;
