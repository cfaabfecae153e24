pub mod recruit_api;
