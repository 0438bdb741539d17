pub mod config;
pub mod dates;
pub mod dispatcher;
pub mod explorer;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod params;
pub mod response;
