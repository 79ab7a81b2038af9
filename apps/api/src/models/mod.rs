pub mod analysis;
pub mod questionnaire;
pub mod user;
