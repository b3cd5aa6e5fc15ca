pub mod edit;
pub mod manual;
pub mod report;
