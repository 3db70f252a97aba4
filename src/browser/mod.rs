pub mod connection;

pub use connection::open_url_in_browser;
