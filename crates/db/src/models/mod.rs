pub mod voucher;
