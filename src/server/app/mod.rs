mod factory;
mod state;

pub use factory::create_app;
pub use state::AppState;
