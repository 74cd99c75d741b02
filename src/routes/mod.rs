pub mod default_route;
pub mod score_route;
