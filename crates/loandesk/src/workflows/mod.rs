pub mod assessment;
pub mod statement;
