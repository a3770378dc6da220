mod expense;
mod money;
mod results;
mod sales;

pub use expense::*;
pub use money::*;
pub use results::*;
pub use sales::*;
