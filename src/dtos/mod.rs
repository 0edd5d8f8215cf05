pub mod contractdtos;
pub mod messagedtos;
pub mod projectdtos;
pub mod proposaldtos;
pub mod reviewdtos;
pub mod userdtos;
