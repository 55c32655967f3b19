mod cors;

pub use cors::CorsMiddleware;
