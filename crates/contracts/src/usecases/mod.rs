pub mod u101_receive_transfer;
