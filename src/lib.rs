pub mod club;
pub mod config;
pub mod dataset;
pub mod demo_data;
pub mod http_client;
pub mod images;
pub mod position;
pub mod rating;
pub mod roster;
pub mod scouting;
pub mod state;
pub mod value;
