pub mod access;
pub mod contract_service;
pub mod error;
pub mod message_service;
pub mod project_service;
pub mod proposal_service;
pub mod review_service;
