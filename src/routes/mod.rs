pub mod auth;

pub mod offerings;

pub mod issues;

pub mod grading;

pub use auth::configure_auth_routes;
pub use grading::configure_grading_routes;
pub use issues::configure_issues_routes;
pub use offerings::configure_offerings_routes;
