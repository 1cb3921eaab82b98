pub mod scenario;
pub mod util;
