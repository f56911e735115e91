pub mod browserless;
pub mod driver;
pub mod error;
pub mod fixture;

pub use browserless::BrowserlessDriver;
pub use driver::{BrowserDriver, BrowserPage};
pub use error::BrowserError;
