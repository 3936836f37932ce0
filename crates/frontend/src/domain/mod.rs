pub mod a001_warehouse;
pub mod a002_warehouse_transfer;
pub mod a003_transfer_reception;
