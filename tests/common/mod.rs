pub mod builders;
pub mod rules;
pub mod strategies;

pub use builders::*;
pub use rules::*;
pub use strategies::*;
