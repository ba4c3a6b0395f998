pub mod postgres_account_repository;
pub mod postgres_donation_repository;

pub use postgres_account_repository::PostgresAccountRepository;
pub use postgres_donation_repository::PostgresDonationRepository;
