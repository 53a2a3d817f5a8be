// ABOUTME: Library half of the sitedesk command-line tool
// ABOUTME: Session bootstrap and table rendering shared by the binary and its tests

pub mod render;
pub mod session;

pub use session::open_session;
