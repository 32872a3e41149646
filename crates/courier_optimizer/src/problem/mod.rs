pub mod delivery_problem;
pub mod request;
pub mod stop;
