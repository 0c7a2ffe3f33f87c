pub mod voucher_repo;
