pub mod comment_kind;
pub mod discrepancy_kind;
pub mod reception_status;
pub mod transfer_status;
