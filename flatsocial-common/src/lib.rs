pub mod chain;
pub mod content;
pub mod flatten;
pub mod legacy;
pub mod model;
pub mod util;
