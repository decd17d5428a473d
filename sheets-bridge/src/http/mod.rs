mod server;
pub use server::Server;

pub mod response;
pub mod routes;
