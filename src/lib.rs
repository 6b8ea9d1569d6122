pub mod llm_wrapper;
pub mod logger;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod settings;
pub mod state;
