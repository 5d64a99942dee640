pub mod forecast;
pub mod historical;
pub mod macros;
pub mod refresh;
pub mod util;
