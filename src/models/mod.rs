pub mod contractmodel;
pub mod messagemodel;
pub mod projectmodel;
pub mod proposalmodel;
pub mod reviewmodel;
pub mod usermodel;
