mod traits;
pub use traits::*;

mod itunes;

mod types;
pub use types::*;

mod session;
pub use session::*;
