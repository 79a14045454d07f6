pub mod app;
pub mod extract;
pub mod route_auth;

// vim: ts=4
