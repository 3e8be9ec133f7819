pub mod check;
pub mod interpret;
pub mod reference;
pub mod rules;
