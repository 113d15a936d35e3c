pub mod session;

pub use session::{root_redirect, session_middleware, Session};
