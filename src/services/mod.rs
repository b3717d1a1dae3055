pub mod movies;
pub mod profiles;
pub mod providers;
pub mod recommendations;
